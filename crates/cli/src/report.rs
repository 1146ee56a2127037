//! Per-case results report, written as CSV.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// One row per evaluation case. Ratings are stored in their canonical
/// string form so the file shows exactly the labels the classification
/// report was computed on.
#[derive(Debug, Serialize)]
pub struct CaseReport {
    #[serde(rename = "Prompt")]
    pub prompt: String,
    #[serde(rename = "Movie")]
    pub movie: String,
    #[serde(rename = "Output")]
    pub output: String,
    #[serde(rename = "Prediction")]
    pub prediction: String,
    #[serde(rename = "Truth")]
    pub truth: String,
}

/// Write all case rows to `path` (prompts contain newlines and quotes,
/// which is why this goes through a real CSV writer).
pub fn write_report(path: &Path, rows: &[CaseReport]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Creating report file {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("Writing report row")?;
    }
    writer.flush().context("Flushing report file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_csv() {
        let path = std::env::temp_dir().join("cli_test_results.csv");
        let rows = vec![CaseReport {
            prompt: "A user rated with 5.0 stars the movie \"Heat (1995)\".\n\nQuestion?"
                .to_string(),
            movie: "Heat (1995)".to_string(),
            output: "4 stars".to_string(),
            prediction: "4.0".to_string(),
            truth: "3.5".to_string(),
        }];

        write_report(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            ["Prompt", "Movie", "Output", "Prediction", "Truth"]
        );
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        // The embedded newline survives quoting
        assert!(records[0][0].contains('\n'));
        assert_eq!(&records[0][3], "4.0");
    }
}
