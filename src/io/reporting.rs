// src/io/reporting.rs

use crate::model::curves::CurveSamples;
use std::error::Error;
use std::path::Path;

/// Writes sampled curve points to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "inventory_curve.csv").
/// * `samples` - A curve sampled from the model.
pub fn write_curve_csv(file_path: &str, samples: CurveSamples) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);

    let mut wtr = csv::Writer::from_path(path)?;

    let mut rows = 0usize;
    for point in samples {
        wtr.serialize(point)?;
        rows += 1;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    tracing::debug!(rows, file_path, "curve exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::curves::CurveKind;
    use crate::model::inventory::InventoryModel;

    #[test]
    fn writes_header_and_one_row_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");
        let path = path.to_str().unwrap();

        let model = InventoryModel::default();
        let samples = model.sample_curve(CurveKind::Inventory, 0.1).unwrap();
        write_curve_csv(path, samples).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("t,value"));
        assert_eq!(lines.count(), 150);
    }
}
