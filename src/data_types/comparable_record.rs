
use std::collections::BTreeSet;

use crate::data_types::pathogenicity::Pathogenicity;

/// The common intermediate form both source adapters produce, consumed uniformly by
/// the comparator. Normalization happens in the adapters; the comparator never sees
/// raw source fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparableRecord {
    /// Canonical `chrom-pos-ref-alt` identifier; None when the source row lacks the
    /// required fields or carries no truth cross-reference
    pub identifier: Option<String>,
    /// The predicted pathogenicity category
    pub category: Pathogenicity,
    /// Normalized asserted evidence-code tokens. Tokens outside the canonical tally
    /// alphabet are retained here since the double-counting check still needs them.
    pub evidence_codes: BTreeSet<String>
}

impl ComparableRecord {
    /// Constructor
    /// # Arguments
    /// * `identifier` - canonical identifier, if one could be derived
    /// * `category` - the predicted category
    /// * `evidence_codes` - normalized asserted code tokens
    pub fn new(identifier: Option<String>, category: Pathogenicity, evidence_codes: BTreeSet<String>) -> Self {
        Self {
            identifier,
            category,
            evidence_codes
        }
    }
}
