
use anyhow::Context;
use rustc_hash::FxHashMap as HashMap;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::data_types::pathogenicity::Pathogenicity;
use crate::util::json_io::load_json;
use crate::util::normalize::normalize_code_token;

/// On-disk shape of the truth-set file: one top-level list under "data"
#[derive(Debug, Deserialize)]
struct TruthSetFile {
    data: Vec<TruthSetEntry>
}

/// On-disk shape of one truth-set entry; unknown fields are ignored
#[derive(Debug, Deserialize)]
struct TruthSetEntry {
    identifier: String,
    pathogenicity: String,
    evidence_codes: Vec<String>,
    #[serde(default)]
    unmet_evidence_codes: Vec<String>
}

/// One curated reference assertion, read-only after loading.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TruthRecord {
    /// The reference pathogenicity category
    pub pathogenicity: Pathogenicity,
    /// Evidence codes the reference judged met, normalized to bare tokens
    pub met_codes: BTreeSet<String>,
    /// Evidence codes the reference judged unmet, normalized to bare tokens
    pub unmet_codes: BTreeSet<String>
}

/// In-memory index over the truth set, built once per run.
/// Lookup is exact-match on the canonical identifier; there is no fuzzy matching.
#[derive(Clone, Debug, Default)]
pub struct TruthSet {
    /// Lookup from canonical identifier to the reference assertion
    records: HashMap<String, TruthRecord>
}

impl TruthSet {
    /// Loads the truth-set JSON file (optionally gzip-compressed) into an index.
    /// Evidence codes are normalized here so asserted codes compare against bare tokens.
    /// # Arguments
    /// * `filename` - the truth-set file path
    /// # Errors
    /// * if the file does not open or deserialize
    /// * if an entry carries a pathogenicity label outside the canonical alphabet
    pub fn from_json(filename: &Path) -> anyhow::Result<Self> {
        let payload: TruthSetFile = load_json(filename)?;

        let mut records: HashMap<String, TruthRecord> = Default::default();
        for entry in payload.data {
            let pathogenicity = Pathogenicity::from_truth_label(&entry.pathogenicity)
                .with_context(|| format!("Error while parsing truth entry {:?} in {filename:?}:", entry.identifier))?;
            let met_codes = entry.evidence_codes.iter()
                .map(|code| normalize_code_token(code))
                .collect();
            let unmet_codes = entry.unmet_evidence_codes.iter()
                .map(|code| normalize_code_token(code))
                .collect();

            // a duplicated identifier keeps the last entry
            records.insert(entry.identifier, TruthRecord {
                pathogenicity,
                met_codes,
                unmet_codes
            });
        }

        Ok(Self {
            records
        })
    }

    /// Builds an index directly from records, primarily for tests.
    /// # Arguments
    /// * `records` - (identifier, record) pairs to index
    pub fn from_records(records: impl IntoIterator<Item = (String, TruthRecord)>) -> Self {
        Self {
            records: records.into_iter().collect()
        }
    }

    /// Exact-match lookup on a canonical identifier.
    pub fn get(&self, identifier: &str) -> Option<&TruthRecord> {
        self.records.get(identifier)
    }

    /// Number of indexed truth records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_example_truth_set() {
        let truth_fn = PathBuf::from("test_data/example_truth_set.json");
        let truth_set = TruthSet::from_json(&truth_fn).unwrap();
        assert_eq!(truth_set.len(), 3);

        // suffixed codes must be stored as bare tokens
        let record = truth_set.get("1-100-A-T").unwrap();
        assert_eq!(record.pathogenicity, Pathogenicity::Pathogenic);
        assert!(record.met_codes.contains("PS1"));
        assert!(!record.met_codes.contains("PS1_strong"));
        assert!(record.unmet_codes.contains("PM2"));

        let record = truth_set.get("2-5000-G-C").unwrap();
        assert_eq!(record.pathogenicity, Pathogenicity::Vus);

        // entries without unmet codes default to an empty set
        let record = truth_set.get("17-4300-T-TA").unwrap();
        assert_eq!(record.pathogenicity, Pathogenicity::LikelyBenign);
        assert!(record.unmet_codes.is_empty());

        assert!(truth_set.get("1-101-A-T").is_none());
    }

    #[test]
    fn test_unknown_pathogenicity_label() {
        let payload = r#"{"data": [{"identifier": "1-1-A-T", "pathogenicity": "Conflicting", "evidence_codes": [], "unmet_evidence_codes": []}]}"#;
        let parsed: TruthSetFile = serde_json::from_str(payload).unwrap();
        assert!(Pathogenicity::from_truth_label(&parsed.data[0].pathogenicity).is_err());
    }
}
