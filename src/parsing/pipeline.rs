
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::data_types::comparable_record::ComparableRecord;
use crate::data_types::pathogenicity::Pathogenicity;
use crate::util::json_io::JsonLinesReader;
use crate::util::normalize::normalize_code_token;

/// The pipeline emits this literal as a placeholder assertion; it is always excluded
/// before normalization so it can never surface as a real BA1 call.
const BA1_SENTINEL: &str = "BA1-";

/// One line of pipeline output; only the fields we compare on are deserialized
#[derive(Debug, Deserialize)]
pub struct PipelineRecord {
    annotations: PipelineAnnotations
}

#[derive(Debug, Deserialize)]
struct PipelineAnnotations {
    variant: VariantAnnotations,
    transcript: TranscriptAnnotations
}

#[derive(Debug, Deserialize)]
struct VariantAnnotations {
    /// Truth-set cross-references for this variant, often empty
    #[serde(default)]
    clingen: Vec<TruthCrossReference>
}

/// A truth-set cross-reference as embedded in pipeline output. The full entries carry
/// many more fields (disease, inheritance, transcripts); only the identifier matters
/// for comparison since everything else is re-read from the truth-set index.
#[derive(Debug, Deserialize)]
struct TruthCrossReference {
    #[serde(default)]
    identifier: Option<String>
}

#[derive(Debug, Deserialize)]
struct TranscriptAnnotations {
    /// Modifier-suffixed category code, e.g. "P--" or "VUS++-"
    auto_pathogenicity: String,
    /// Modifier-suffixed asserted evidence codes
    #[serde(default)]
    acmg_evidence_codes: Vec<String>
}

/// Converts one parsed pipeline record into the common comparable form.
/// When a record carries multiple truth cross-references only the first is used;
/// a record with none yields no identifier and is later counted as missing.
/// # Arguments
/// * `record` - the parsed pipeline record
/// # Errors
/// * if the auto-pathogenicity code is outside the closed mapping table
pub fn adapt_pipeline_record(record: PipelineRecord) -> anyhow::Result<ComparableRecord> {
    let identifier = record.annotations.variant.clingen.first()
        .and_then(|cross_ref| cross_ref.identifier.clone());

    let category = Pathogenicity::from_modifier_code(&record.annotations.transcript.auto_pathogenicity)?;

    let evidence_codes: BTreeSet<String> = record.annotations.transcript.acmg_evidence_codes.iter()
        .filter(|raw| raw.as_str() != BA1_SENTINEL)
        .map(|raw| normalize_code_token(raw))
        .filter(|code| !code.is_empty())
        .collect();

    Ok(ComparableRecord::new(identifier, category, evidence_codes))
}

/// Lazy reader over a newline-delimited JSON pipeline annotation file, yielding one
/// comparable record per line. The source is streamed, never fully materialized.
pub struct PipelineReader {
    /// Source filename, retained for error messages
    filename: std::path::PathBuf,
    /// The underlying line-delimited JSON reader
    lines: JsonLinesReader<PipelineRecord>
}

impl PipelineReader {
    /// Opens a pipeline annotation file (optionally gzip-compressed).
    /// # Arguments
    /// * `filename` - the annotation file path
    /// # Errors
    /// * if the file does not open properly
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let lines = JsonLinesReader::new(filename)?;
        Ok(Self {
            filename: filename.to_path_buf(),
            lines
        })
    }
}

impl Iterator for PipelineReader {
    type Item = anyhow::Result<ComparableRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let parsed = self.lines.next()?;
        let adapted = parsed.and_then(|record| {
            adapt_pipeline_record(record)
                .with_context(|| format!("Error while adapting record from {:?}:", self.filename))
        });
        Some(adapted)
    }
}
