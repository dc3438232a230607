
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::data_types::contingency::ContingencyTable;
use crate::data_types::evidence_codes::EvidenceCode;
use crate::data_types::evidence_metrics::EvidenceConfusion;
use crate::data_types::pathogenicity::Pathogenicity;

/// Captures all of the results from comparing one annotation source to the truth set.
/// All counters are monotonically non-decreasing while a pass runs, and
/// `matched_records() + missing_records() == total_records()` holds throughout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcordanceBenchmark {
    /// (truth, predicted) category pair counts for truth-matched records
    contingency: ContingencyTable,
    /// Per-code confusion tallies; every canonical code is present from the start
    evidence_codes: BTreeMap<EvidenceCode, EvidenceConfusion>,
    /// Observation counts keyed by the sorted overlapping-code subsets (length >= 2)
    double_counting: BTreeMap<Vec<String>, u64>,
    /// Records with no identifier or no truth-set match
    missing_records: u64,
    /// Every record consumed from the source
    total_records: u64
}

impl Default for ConcordanceBenchmark {
    fn default() -> Self {
        // pre-populate the full code alphabet so reports always carry all 14 rows
        let evidence_codes = EvidenceCode::iter()
            .map(|code| (code, EvidenceConfusion::default()))
            .collect();
        Self {
            contingency: Default::default(),
            evidence_codes,
            double_counting: Default::default(),
            missing_records: 0,
            total_records: 0
        }
    }
}

impl ConcordanceBenchmark {
    /// Records a consumed input record; every other adder assumes this was called first.
    pub fn add_record(&mut self) {
        self.total_records += 1;
    }

    /// Records an input record with no usable truth-set match.
    pub fn add_missing(&mut self) {
        self.missing_records += 1;
    }

    /// Records a (truth, predicted) category observation for a matched record.
    /// # Arguments
    /// * `truth` - the reference category
    /// * `predicted` - the predictor's category
    pub fn add_category_pair(&mut self, truth: Pathogenicity, predicted: Pathogenicity) {
        self.contingency.increment(truth, predicted);
    }

    /// Adds one per-code confusion observation.
    /// # Arguments
    /// * `code` - the canonical code this observation is for
    /// * `asserted` - true if the predictor asserted the code
    /// * `met` - true if the truth set lists the code as met
    pub fn add_evidence_observation(&mut self, code: EvidenceCode, asserted: bool, met: bool) {
        // the benchmark always carries the full alphabet, so the entry exists
        let tally = self.evidence_codes.entry(code).or_default();
        match (asserted, met) {
            (true, true) => tally.true_positives += 1,
            (true, false) => tally.false_positives += 1,
            (false, true) => tally.false_negatives += 1,
            (false, false) => tally.true_negatives += 1
        }
    }

    /// Records a double-counting observation for a sorted overlapping-code subset.
    /// # Arguments
    /// * `codes` - the sorted intersection with the overlapping-code set, length >= 2
    pub fn add_double_counting(&mut self, codes: Vec<String>) {
        debug_assert!(codes.len() >= 2);
        *self.double_counting.entry(codes).or_default() += 1;
    }

    /// Number of records that had a truth-set match
    pub fn matched_records(&self) -> u64 {
        self.contingency.total()
    }

    // getters
    pub fn contingency(&self) -> &ContingencyTable {
        &self.contingency
    }

    pub fn evidence_codes(&self) -> &BTreeMap<EvidenceCode, EvidenceConfusion> {
        &self.evidence_codes
    }

    pub fn double_counting(&self) -> &BTreeMap<Vec<String>, u64> {
        &self.double_counting
    }

    pub fn missing_records(&self) -> u64 {
        self.missing_records
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_carries_full_alphabet() {
        let benchmark = ConcordanceBenchmark::default();
        assert_eq!(benchmark.evidence_codes().len(), 14);
        assert!(benchmark.evidence_codes().values().all(|t| *t == EvidenceConfusion::default()));
    }

    #[test]
    fn test_record_accounting() {
        let mut benchmark = ConcordanceBenchmark::default();
        benchmark.add_record();
        benchmark.add_missing();
        benchmark.add_record();
        benchmark.add_category_pair(Pathogenicity::Pathogenic, Pathogenicity::LikelyPathogenic);

        assert_eq!(benchmark.total_records(), 2);
        assert_eq!(benchmark.missing_records(), 1);
        assert_eq!(benchmark.matched_records(), 1);
        assert_eq!(benchmark.matched_records() + benchmark.missing_records(), benchmark.total_records());
    }

    #[test]
    fn test_evidence_observations() {
        let mut benchmark = ConcordanceBenchmark::default();
        benchmark.add_evidence_observation(EvidenceCode::Ps1, true, true);
        benchmark.add_evidence_observation(EvidenceCode::Ps1, true, false);
        benchmark.add_evidence_observation(EvidenceCode::Pm2, false, true);
        benchmark.add_evidence_observation(EvidenceCode::Pm2, false, false);

        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Ps1], EvidenceConfusion::new(1, 1, 0, 0));
        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Pm2], EvidenceConfusion::new(0, 0, 1, 1));
    }

    #[test]
    fn test_double_counting_tally() {
        let mut benchmark = ConcordanceBenchmark::default();
        let key = vec!["PM5".to_string(), "PS1".to_string()];
        benchmark.add_double_counting(key.clone());
        benchmark.add_double_counting(key.clone());

        assert_eq!(benchmark.double_counting()[&key], 2);
    }
}
