
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

use crate::data_types::contingency::ContingencyTable;
use crate::data_types::pathogenicity::Grouping;

/// Contains all the data written to each row of a statistics summary
#[derive(Debug, Serialize)]
struct StatisticsRow {
    /// The category this row summarizes
    #[serde(rename = "Pathogenicity")]
    pathogenicity: String,
    /// F1 = harmonic mean of precision and recall, 0.0 when both are 0
    #[serde(rename = "F1")]
    f1: f64,
    /// Precision = TP / (TP + FP)
    #[serde(rename = "Precision")]
    precision: f64,
    /// Recall = TP / (TP + FN)
    #[serde(rename = "Recall")]
    recall: f64
}

/// Writes per-category precision / recall / F1 rows for a contingency table under
/// the given grouping. Every category of the grouping gets a row, even when empty.
/// # Arguments
/// * `table` - the contingency table to summarize; collapsed with `grouping` first
/// * `grouping` - selects both the collapse and the category list to report
/// * `filename` - the filename for the output (tsv/csv)
/// # Errors
/// * if the file does not open or a row fails to serialize
pub fn write_statistics_summary(table: &ContingencyTable, grouping: Grouping, filename: &Path) -> anyhow::Result<()> {
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let collapsed = table.grouped(grouping);
    for &category in grouping.categories() {
        let summary = collapsed.category_summary(category);
        let row = StatisticsRow {
            pathogenicity: category.to_string(),
            f1: summary.f1(),
            precision: summary.precision(),
            recall: summary.recall()
        };
        csv_writer.serialize(&row)
            .with_context(|| format!("Error while writing {filename:?}:"))?;
    }

    csv_writer.flush()
        .with_context(|| format!("Error while flushing {filename:?}:"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::pathogenicity::Pathogenicity;
    use crate::writers::contingency_summary::read_contingency_summary;

    #[test]
    fn test_statistics_from_example_summary() {
        let table = read_contingency_summary(&std::path::PathBuf::from("test_data/example_contingency.tsv")).unwrap();

        // spot check the derived P-row counts: TP=40, FP=0, FN=10
        let summary = table.category_summary(Pathogenicity::Pathogenic);
        assert_eq!(summary.true_positives, 40);
        assert_eq!(summary.false_positives, 0);
        assert_eq!(summary.false_negatives, 10);

        let out_fn = std::env::temp_dir().join("pathobench_statistics_summary.tsv");
        write_statistics_summary(&table, Grouping::Standard, &out_fn).unwrap();

        let written = std::fs::read_to_string(&out_fn).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Pathogenicity\tF1\tPrecision\tRecall");
        // one row per standard category plus the header
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "P\t0.889\t1.0\t0.8");
        std::fs::remove_file(&out_fn).unwrap();
    }
}
