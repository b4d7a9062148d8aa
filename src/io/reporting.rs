// src/io/reporting.rs

use std::path::Path;

use tracing::info;

use crate::io::FileError;
use crate::simulation::engine::DayRecord;

/// Writes a replayed plan schedule to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/plan.csv").
/// * `data` - One record per planned day, as produced by the replay engine.
pub fn write_plan_schedule(file_path: impl AsRef<Path>, data: &[DayRecord]) -> Result<(), FileError> {
    let path = file_path.as_ref();

    let mut wtr = csv::Writer::from_path(path)?;
    for record in data {
        wtr.serialize(record)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "plan schedule exported");
    Ok(())
}
