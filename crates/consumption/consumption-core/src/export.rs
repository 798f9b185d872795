//! CSV export of prediction records

use consumption_spi::{ConsumptionError, PredictionRecord, Result};

/// Column headers of the exported table
pub const CSV_HEADERS: [&str; 3] = [
    "Temperature (°C)",
    "Rainfall (mm)",
    "Predicted Water Consumed (liters)",
];

/// Serialize records as CSV, one row per record in the given order.
///
/// The predicted value is written with two decimal places; temperature and
/// rainfall use their shortest exact representation.
pub fn to_csv(records: &[PredictionRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(export_error)?;

    for record in records {
        writer
            .write_record([
                record.temperature.to_string(),
                record.rainfall.to_string(),
                format!("{:.2}", record.predicted),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConsumptionError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ConsumptionError::Export(e.to_string()))
}

fn export_error(e: csv::Error) -> ConsumptionError {
    ConsumptionError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_for_empty_log() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "Temperature (°C),Rainfall (mm),Predicted Water Consumed (liters)"
        );
    }

    #[test]
    fn test_rows_use_two_decimal_prediction() {
        let records = [
            PredictionRecord {
                temperature: 25.0,
                rainfall: 100.0,
                predicted: 130.0,
                sequence: 1,
            },
            PredictionRecord {
                temperature: 31.5,
                rainfall: 12.25,
                predicted: 144.4567,
                sequence: 2,
            },
        ];
        let csv = to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "25,100,130.00");
        assert_eq!(lines[2], "31.5,12.25,144.46");
    }
}
