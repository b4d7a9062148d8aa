// src/io/history.rs

use std::path::Path;

use serde::Deserialize;

use crate::io::FileError;

/// One logged consumption event, in the order it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsumptionRecord {
    pub item: String,
    pub quantity: u32,
}

/// Reads an `item,quantity` CSV file with a header row.
pub fn load_consumption_csv(file_path: impl AsRef<Path>) -> Result<Vec<ConsumptionRecord>, FileError> {
    let mut rdr = csv::Reader::from_path(file_path)?;
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<ConsumptionRecord>, csv::Error>>()?;
    Ok(records)
}

/// Chronological quantities consumed for one item.
pub fn history_for(records: &[ConsumptionRecord], item: &str) -> Vec<u32> {
    records
        .iter()
        .filter(|record| record.item == item)
        .map(|record| record.quantity)
        .collect()
}
