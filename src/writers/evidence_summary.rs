
use anyhow::Context;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::data_types::evidence_codes::EvidenceCode;
use crate::data_types::evidence_metrics::EvidenceConfusion;

/// Contains all the data written to each row of an evidence-code summary
#[derive(Debug, Serialize)]
struct EvidenceRow {
    /// The canonical evidence code
    evidence_code: String,
    /// Asserted and met
    true_positives: u64,
    /// Asserted but unmet
    false_positives: u64,
    /// Unasserted and unmet
    true_negatives: u64,
    /// Unasserted but met
    false_negatives: u64
}

/// Contains all the data written to each row of a double-counting summary
#[derive(Debug, Serialize)]
struct DoubleCountingRow {
    /// The sorted overlapping codes asserted together, joined with ","
    evidence_codes: String,
    /// Number of records asserting this combination
    observations: u64
}

/// Writes the per-code confusion tallies, one row per canonical code in list order.
/// # Arguments
/// * `evidence_codes` - the per-code tallies from a benchmark
/// * `filename` - the filename for the output (tsv/csv)
/// # Errors
/// * if the file does not open or a row fails to serialize
pub fn write_evidence_summary(evidence_codes: &BTreeMap<EvidenceCode, EvidenceConfusion>, filename: &Path) -> anyhow::Result<()> {
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    for (code, tally) in evidence_codes.iter() {
        let row = EvidenceRow {
            evidence_code: code.to_string(),
            true_positives: tally.true_positives,
            false_positives: tally.false_positives,
            true_negatives: tally.true_negatives,
            false_negatives: tally.false_negatives
        };
        csv_writer.serialize(&row)
            .with_context(|| format!("Error while writing {filename:?}:"))?;
    }

    csv_writer.flush()
        .with_context(|| format!("Error while flushing {filename:?}:"))?;
    Ok(())
}

/// Writes the double-counting diagnostic tally. The file may legitimately contain no
/// data rows when a predictor never stacks the overlapping codes.
/// # Arguments
/// * `double_counting` - observation counts keyed by sorted code combinations
/// * `filename` - the filename for the output (tsv/csv)
/// # Errors
/// * if the file does not open or a row fails to serialize
pub fn write_double_counting_summary(double_counting: &BTreeMap<Vec<String>, u64>, filename: &Path) -> anyhow::Result<()> {
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false) // written manually so an empty tally still gets its header row
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    csv_writer.write_record(["evidence_codes", "observations"])
        .with_context(|| format!("Error while writing {filename:?}:"))?;
    for (codes, count) in double_counting.iter() {
        let row = DoubleCountingRow {
            evidence_codes: codes.iter().join(","),
            observations: *count
        };
        csv_writer.serialize(&row)
            .with_context(|| format!("Error while writing {filename:?}:"))?;
    }

    csv_writer.flush()
        .with_context(|| format!("Error while flushing {filename:?}:"))?;
    Ok(())
}
