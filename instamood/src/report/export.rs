use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Anomaly, SummaryRow};

const SUMMARY_HEADER: [&str; 5] = ["date", "source", "happy", "neutral", "sad"];

/// Write the summary table as comma-separated text with a header row.
/// All three label columns are always present.
pub fn write_summary_csv<W: Write>(rows: &[SummaryRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(SUMMARY_HEADER)?;

    for row in rows {
        csv_writer.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.source.to_string(),
            row.happy.to_string(),
            row.neutral.to_string(),
            row.sad.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn summary_csv_string(rows: &[SummaryRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_summary_csv(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn save_summary_csv(rows: &[SummaryRow], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_summary_csv(rows, file)
}

pub fn write_anomalies_json<W: Write>(anomalies: &[Anomaly], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, anomalies)?;
    Ok(())
}

pub fn save_anomalies_json(anomalies: &[Anomaly], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_anomalies_json(anomalies, file)
}
