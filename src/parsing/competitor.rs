
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::data_types::comparable_record::ComparableRecord;
use crate::data_types::pathogenicity::Pathogenicity;
use crate::util::json_io::open_text_reader;
use crate::util::normalize::{canonical_identifier, normalize_code_token};

/// One row of competitor output; only the compared columns are deserialized.
/// The exports carry many more columns ("Variant", "RS ID", transcript details, ...)
/// which the csv deserializer skips.
#[derive(Debug, Deserialize)]
pub struct CompetitorRow {
    #[serde(rename = "Chromosome")]
    chromosome: String,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Ref seq")]
    ref_seq: String,
    #[serde(rename = "Var seq")]
    var_seq: String,
    #[serde(rename = "Germline Class")]
    germline_class: String,
    /// Comma-joined, underscore-suffixed evidence codes, e.g. "PS1_strong,PM2_moderate"
    #[serde(rename = "Germline rules")]
    germline_rules: String
}

/// Converts one competitor row into the common comparable form.
/// # Arguments
/// * `row` - the parsed competitor row
/// # Errors
/// * if the germline classification is outside the closed mapping table
pub fn adapt_competitor_row(row: CompetitorRow) -> anyhow::Result<ComparableRecord> {
    let identifier = canonical_identifier(&row.chromosome, &row.position, &row.ref_seq, &row.var_seq);

    let category = Pathogenicity::from_germline_class(&row.germline_class)?;

    let evidence_codes: BTreeSet<String> = row.germline_rules.split(',')
        .map(normalize_code_token)
        .filter(|code| !code.is_empty())
        .collect();

    Ok(ComparableRecord::new(identifier, category, evidence_codes))
}

/// Streaming reader over a competitor TSV export (optionally gzip-compressed),
/// yielding one comparable record per data row.
pub struct CompetitorReader {
    /// Source filename, retained for error messages
    filename: PathBuf,
    /// The underlying csv deserializer
    rows: csv::DeserializeRecordsIntoIter<Box<dyn BufRead>, CompetitorRow>
}

impl CompetitorReader {
    /// Opens a competitor annotation file.
    /// # Arguments
    /// * `filename` - the annotation file path
    /// # Errors
    /// * if the file does not open properly
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let reader = open_text_reader(filename)?;
        let csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);
        Ok(Self {
            filename: filename.to_path_buf(),
            rows: csv_reader.into_deserialize()
        })
    }
}

impl Iterator for CompetitorReader {
    type Item = anyhow::Result<ComparableRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(r) => r,
            Err(e) => {
                return Some(Err(anyhow::Error::new(e)
                    .context(format!("Error while reading {:?}:", self.filename))));
            }
        };
        let adapted = adapt_competitor_row(row)
            .with_context(|| format!("Error while adapting row from {:?}:", self.filename));
        Some(adapted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_row(header: &str, line: &str) -> CompetitorRow {
        let data = format!("{header}\n{line}\n");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(data.as_bytes());
        reader.deserialize().next().unwrap().unwrap()
    }

    const HEADER: &str = "Chromosome\tPosition\tRef seq\tVar seq\tGermline Class\tGermline rules";

    #[test]
    fn test_adapt_row() {
        let row = parse_row(HEADER, "chr1\t100\tA\tT\tPathogenic\tPS1_strong,PM2_moderate");
        let comparable = adapt_competitor_row(row).unwrap();
        assert_eq!(comparable.identifier.as_deref(), Some("1-100-A-T"));
        assert_eq!(comparable.category, Pathogenicity::Pathogenic);

        let expected: BTreeSet<String> = ["PS1", "PM2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(comparable.evidence_codes, expected);
    }

    #[test]
    fn test_adapt_row_placeholders() {
        // empty alleles become "." and the chr prefix is stripped
        let row = parse_row(HEADER, "chr2\t50\t\tG\tBenign\t");
        let comparable = adapt_competitor_row(row).unwrap();
        assert_eq!(comparable.identifier.as_deref(), Some("2-50-.-G"));
        assert_eq!(comparable.category, Pathogenicity::Benign);
        assert!(comparable.evidence_codes.is_empty());
    }

    #[test]
    fn test_adapt_row_missing_position() {
        let row = parse_row(HEADER, "chr2\t\tA\tG\tBenign\t");
        let comparable = adapt_competitor_row(row).unwrap();
        assert_eq!(comparable.identifier, None);
    }

    #[test]
    fn test_adapt_row_unknown_class() {
        let row = parse_row(HEADER, "chr1\t100\tA\tT\tRisk factor\tPS1");
        assert!(adapt_competitor_row(row).is_err());
    }

    #[test]
    fn test_example_competitor_file() {
        let competitor_fn = PathBuf::from("test_data/example_competitor.tsv");
        let reader = CompetitorReader::new(&competitor_fn).unwrap();
        let records: Vec<ComparableRecord> = reader.collect::<anyhow::Result<_>>().unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].identifier.as_deref(), Some("1-100-A-T"));
        assert_eq!(records[0].category, Pathogenicity::Pathogenic);
        assert_eq!(records[1].identifier.as_deref(), Some("2-50-.-G"));
        assert_eq!(records[2].category, Pathogenicity::VusModerate);
    }
}
