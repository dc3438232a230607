
use derive_builder::Builder;
use log::debug;
use strum::IntoEnumIterator;

use crate::data_types::comparable_record::ComparableRecord;
use crate::data_types::concordance_benchmark::ConcordanceBenchmark;
use crate::data_types::evidence_codes::{EvidenceCode, OVERLAPPING_EVIDENCE_CODES};
use crate::parsing::truth_set::TruthSet;

/// Controls what happens during a comparison pass
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct CompareConfig {
    /// if True, VUS sub-tier predictions (VUS+, VUS++) are collapsed into plain VUS before tabulation
    merge_vus: bool
}

impl Default for CompareConfig {
    fn default() -> Self {
        // full category resolution is the reasonable default for unit tests;
        // main.rs sets this from user input
        Self {
            merge_vus: false
        }
    }
}

/// Entry point for comparing one annotation source against the truth set.
/// Consumes the record stream sequentially; the accumulators are owned exclusively
/// by this pass, so record order never changes the result.
/// # Arguments
/// * `records` - lazy stream of comparable records from one source adapter
/// * `truth_set` - the pre-loaded truth-set index
/// * `compare_config` - collection of configuration items for the pass
/// # Errors
/// * if the stream yields a record error (malformed row, unknown category label)
pub fn compare_records<I>(records: I, truth_set: &TruthSet, compare_config: CompareConfig) -> anyhow::Result<ConcordanceBenchmark>
where
    I: IntoIterator<Item = anyhow::Result<ComparableRecord>>
{
    let mut benchmark = ConcordanceBenchmark::default();

    for record in records {
        // record-level errors abort the pass
        let record = record?;
        benchmark.add_record();

        // records without a usable identifier or truth match contribute nothing further
        let truth_record = match record.identifier.as_deref().and_then(|id| truth_set.get(id)) {
            Some(tr) => tr,
            None => {
                debug!("No truth match for record: {record:?}");
                benchmark.add_missing();
                continue;
            }
        };

        // category concordance
        let predicted = if compare_config.merge_vus {
            record.category.merge_vus()
        } else {
            record.category
        };
        benchmark.add_category_pair(truth_record.pathogenicity, predicted);

        // per-code confusion; a code in neither truth list is skipped for this record,
        // and a code in both lists counts as met
        for code in EvidenceCode::iter() {
            let code_token = code.to_string();
            let asserted = record.evidence_codes.contains(&code_token);
            let met = truth_record.met_codes.contains(&code_token);
            let unmet = truth_record.unmet_codes.contains(&code_token);
            if met || unmet {
                benchmark.add_evidence_observation(code, asserted, met);
            }
        }

        // double-counting diagnostic over the overlapping-rationale codes
        let overlapping: Vec<String> = OVERLAPPING_EVIDENCE_CODES.iter()
            .filter(|code| record.evidence_codes.contains(**code))
            .map(|code| code.to_string())
            .collect();
        if overlapping.len() >= 2 {
            benchmark.add_double_counting(overlapping);
        }
    }

    Ok(benchmark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::data_types::evidence_metrics::EvidenceConfusion;
    use crate::data_types::pathogenicity::Pathogenicity;
    use crate::parsing::truth_set::TruthRecord;

    fn code_set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    /// One truth entry: 1-100-A-T is pathogenic with PS1 met (from "PS1_strong") and PM2 unmet
    fn build_truth_set() -> TruthSet {
        TruthSet::from_records([
            ("1-100-A-T".to_string(), TruthRecord {
                pathogenicity: Pathogenicity::Pathogenic,
                met_codes: code_set(&["PS1"]),
                unmet_codes: code_set(&["PM2"])
            })
        ])
    }

    #[test]
    fn test_matched_record() {
        let truth_set = build_truth_set();
        let records = vec![
            Ok(ComparableRecord::new(
                Some("1-100-A-T".to_string()),
                Pathogenicity::Pathogenic,
                code_set(&["PS1", "PM2"])
            ))
        ];

        let benchmark = compare_records(records, &truth_set, CompareConfig::default()).unwrap();
        assert_eq!(benchmark.total_records(), 1);
        assert_eq!(benchmark.missing_records(), 0);
        assert_eq!(benchmark.contingency().get(Pathogenicity::Pathogenic, Pathogenicity::Pathogenic), 1);

        // asserted+met => TP, asserted+unmet => FP
        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Ps1], EvidenceConfusion::new(1, 0, 0, 0));
        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Pm2], EvidenceConfusion::new(0, 1, 0, 0));

        // PVS1 is in neither truth list, so it was skipped entirely
        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Pvs1].total(), 0);
    }

    #[test]
    fn test_unasserted_codes() {
        let truth_set = build_truth_set();
        let records = vec![
            Ok(ComparableRecord::new(
                Some("1-100-A-T".to_string()),
                Pathogenicity::LikelyPathogenic,
                code_set(&[])
            ))
        ];

        let benchmark = compare_records(records, &truth_set, CompareConfig::default()).unwrap();
        assert_eq!(benchmark.contingency().get(Pathogenicity::Pathogenic, Pathogenicity::LikelyPathogenic), 1);

        // unasserted+met => FN, unasserted+unmet => TN
        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Ps1], EvidenceConfusion::new(0, 0, 0, 1));
        assert_eq!(benchmark.evidence_codes()[&EvidenceCode::Pm2], EvidenceConfusion::new(0, 0, 1, 0));
    }

    #[test]
    fn test_missing_records() {
        let truth_set = build_truth_set();
        let records = vec![
            // unknown identifier
            Ok(ComparableRecord::new(
                Some("2-50-.-G".to_string()),
                Pathogenicity::Benign,
                code_set(&[])
            )),
            // no identifier at all
            Ok(ComparableRecord::new(
                None,
                Pathogenicity::Vus,
                code_set(&[])
            ))
        ];

        let benchmark = compare_records(records, &truth_set, CompareConfig::default()).unwrap();
        assert_eq!(benchmark.total_records(), 2);
        assert_eq!(benchmark.missing_records(), 2);
        assert_eq!(benchmark.matched_records(), 0);
        assert_eq!(benchmark.matched_records() + benchmark.missing_records(), benchmark.total_records());
    }

    #[test]
    fn test_double_counting() {
        let truth_set = build_truth_set();
        let records = vec![
            Ok(ComparableRecord::new(
                Some("1-100-A-T".to_string()),
                Pathogenicity::Pathogenic,
                code_set(&["PS1", "PM5", "PP5"])
            ))
        ];

        let benchmark = compare_records(records, &truth_set, CompareConfig::default()).unwrap();
        let expected_key = vec!["PM5".to_string(), "PP5".to_string(), "PS1".to_string()];
        assert_eq!(benchmark.double_counting().len(), 1);
        assert_eq!(benchmark.double_counting()[&expected_key], 1);
    }

    #[test]
    fn test_single_overlap_not_flagged() {
        let truth_set = build_truth_set();
        let records = vec![
            Ok(ComparableRecord::new(
                Some("1-100-A-T".to_string()),
                Pathogenicity::Pathogenic,
                code_set(&["PS1"])
            ))
        ];

        let benchmark = compare_records(records, &truth_set, CompareConfig::default()).unwrap();
        assert!(benchmark.double_counting().is_empty());
    }

    #[test]
    fn test_pairwise_double_counting() {
        let truth_set = build_truth_set();
        let records = vec![
            Ok(ComparableRecord::new(
                Some("1-100-A-T".to_string()),
                Pathogenicity::Pathogenic,
                code_set(&["PM5", "PP5", "PM1"])
            ))
        ];

        let benchmark = compare_records(records, &truth_set, CompareConfig::default()).unwrap();
        let expected_key = vec!["PM5".to_string(), "PP5".to_string()];
        assert_eq!(benchmark.double_counting()[&expected_key], 1);
    }

    #[test]
    fn test_merge_vus_config() {
        let truth_set = build_truth_set();
        let records = vec![
            Ok(ComparableRecord::new(
                Some("1-100-A-T".to_string()),
                Pathogenicity::VusHigh,
                code_set(&[])
            ))
        ];

        let compare_config = CompareConfigBuilder::default()
            .merge_vus(true)
            .build().unwrap();
        let benchmark = compare_records(records, &truth_set, compare_config).unwrap();
        assert_eq!(benchmark.contingency().get(Pathogenicity::Pathogenic, Pathogenicity::Vus), 1);
        assert_eq!(benchmark.contingency().get(Pathogenicity::Pathogenic, Pathogenicity::VusHigh), 0);
    }

    #[test]
    fn test_record_error_aborts() {
        let truth_set = build_truth_set();
        let records = vec![
            Err(anyhow::anyhow!("malformed row"))
        ];
        assert!(compare_records(records, &truth_set, CompareConfig::default()).is_err());
    }
}
