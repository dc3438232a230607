
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data_types::contingency::ContingencyTable;
use crate::data_types::pathogenicity::{Grouping, Pathogenicity};
use crate::util::json_io::open_text_reader;

/// Contains all the data written to each row of a contingency summary.
/// The column names match the long-standing report format.
#[derive(Debug, Deserialize, Serialize)]
struct ContingencyRow {
    /// The reference category
    #[serde(rename = "Clingen pathogenicity")]
    clingen_pathogenicity: String,
    /// The predictor's category
    #[serde(rename = "Predicted pathogenicity")]
    predicted_pathogenicity: String,
    /// Number of records observed for this pair
    #[serde(rename = "Variants counts")]
    variant_count: u64
}

/// Writes a contingency table to a TSV (or CSV) file under the given grouping.
/// # Arguments
/// * `table` - the full-resolution contingency table
/// * `grouping` - the reporting grouping to collapse with before writing
/// * `filename` - the filename for the output (tsv/csv)
/// # Errors
/// * if the file does not open or a row fails to serialize
pub fn write_contingency_summary(table: &ContingencyTable, grouping: Grouping, filename: &Path) -> anyhow::Result<()> {
    // modify the delimiter to "," if it ends with .csv
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let collapsed = table.grouped(grouping);
    for (&(truth, predicted), &count) in collapsed.iter() {
        let row = ContingencyRow {
            clingen_pathogenicity: truth.to_string(),
            predicted_pathogenicity: predicted.to_string(),
            variant_count: count
        };
        csv_writer.serialize(&row)
            .with_context(|| format!("Error while writing {filename:?}:"))?;
    }

    csv_writer.flush()
        .with_context(|| format!("Error while flushing {filename:?}:"))?;
    Ok(())
}

/// Reads a previously written contingency summary back into a table,
/// e.g. for the statistics-recompute subcommand.
/// # Arguments
/// * `filename` - a TSV file written by `write_contingency_summary`
/// # Errors
/// * if the file does not open or parse
/// * if a category label is outside the canonical alphabet
pub fn read_contingency_summary(filename: &Path) -> anyhow::Result<ContingencyTable> {
    let reader = open_text_reader(filename)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(reader);

    let mut table = ContingencyTable::default();
    for result in csv_reader.deserialize() {
        let row: ContingencyRow = result
            .with_context(|| format!("Error while reading {filename:?}:"))?;
        let truth = Pathogenicity::from_truth_label(&row.clingen_pathogenicity)
            .with_context(|| format!("Error while parsing truth category in {filename:?}:"))?;
        let predicted = Pathogenicity::from_truth_label(&row.predicted_pathogenicity)
            .with_context(|| format!("Error while parsing predicted category in {filename:?}:"))?;
        table.increment_by(truth, predicted, row.variant_count);
    }

    Ok(table)
}
