use thiserror::Error;

pub mod demand;
pub mod history;
pub mod reporting;

/// Failure reading or writing one of the planner's CSV files.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
