use crate::error::AnalyzerError;
use crate::models::{AnalysisReport, FormattedRecord};
use std::io::Write;

pub const POSITIVE_NON_B0: &str = "Positive Non-B0";
pub const POSITIVE_B0: &str = "Positive B0";
pub const NEGATIVE_NON_B0: &str = "Negative Non-B0";
pub const NEGATIVE_B0: &str = "Negative B0";

/// Suggested file name for a downloaded report.
pub fn file_name(report: &AnalysisReport) -> String {
    format!("{}_Targeting_Results.csv", report.variant)
}

/// Write the four buckets as consecutive CSV sections, each a title row,
/// the header row and its records. Sections are separated by an empty row.
pub fn write_sections<W: Write>(report: &AnalysisReport, out: W) -> Result<(), AnalyzerError> {
    let labels = report.variant.schema().output_labels();
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

    let sections: [(&str, &[FormattedRecord]); 4] = [
        (POSITIVE_NON_B0, &report.positive.no_b0),
        (POSITIVE_B0, &report.positive.only_b0),
        (NEGATIVE_NON_B0, &report.negative.no_b0),
        (NEGATIVE_B0, &report.negative.only_b0),
    ];

    for (idx, (title, records)) in sections.iter().enumerate() {
        if idx > 0 {
            writer.write_record(vec![""; labels.len()])?;
        }
        writer.write_record([*title])?;
        writer.write_record(&labels)?;
        for record in records.iter() {
            writer.write_record(record.cells())?;
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_to_csv(report: &AnalysisReport) -> Result<Vec<u8>, AnalyzerError> {
    let mut buffer = Vec::new();
    write_sections(report, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Buckets, ClassificationStats, Variant};
    use serde_json::json;

    fn record(key: &str) -> FormattedRecord {
        let mut r = FormattedRecord::default();
        for label in Variant::Display.schema().output_labels() {
            r.insert(label, serde_json::Value::Null);
        }
        r.insert("matched target", json!(key));
        r.insert("spend", json!(4));
        r
    }

    #[test]
    fn writes_four_titled_sections() {
        let report = AnalysisReport {
            variant: Variant::Display,
            generated_at: chrono::Utc::now(),
            stats: ClassificationStats::default(),
            positive: Buckets {
                no_b0: vec![record("shoes")],
                only_b0: vec![record("B0ABC")],
            },
            negative: Buckets::default(),
        };

        let text = String::from_utf8(export_to_csv(&report).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], POSITIVE_NON_B0);
        assert_eq!(
            lines[1],
            "matched target,campaign name,14 day total orders (#),14 day total sales,spend,impressions,clicks,acos"
        );
        assert_eq!(lines[2], "shoes,,,,4,,,");
        assert_eq!(lines[3], ",,,,,,,");
        assert_eq!(lines[4], POSITIVE_B0);
        assert_eq!(lines[6], "B0ABC,,,,4,,,");
        assert!(lines.contains(&NEGATIVE_NON_B0));
        assert_eq!(lines.last(), Some(&lines[1]));
        assert_eq!(file_name(&report), "display_Targeting_Results.csv");
    }
}
