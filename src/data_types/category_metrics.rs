
/// Rounds a metric to the 3 decimal digits we report
fn round_metric(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Per-category counts derived from one contingency table, with the derived
/// precision / recall / F1 metrics. All metrics are reported rounded to 3 decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategorySummary {
    /// Diagonal cell: truth and prediction agree on this category
    pub true_positives: u64,
    /// Column sum minus the diagonal: predicted as this category, truth disagrees
    pub false_positives: u64,
    /// Row sum minus the diagonal: truth is this category, prediction disagrees
    pub false_negatives: u64
}

impl CategorySummary {
    /// Constructor
    pub fn new(true_positives: u64, false_positives: u64, false_negatives: u64) -> Self {
        Self {
            true_positives, false_positives, false_negatives
        }
    }

    /// Precision = TP / (TP + FP), explicitly 0.0 when the denominator is 0
    pub fn precision(&self) -> f64 {
        let denom = self.true_positives + self.false_positives;
        if denom > 0 {
            round_metric(self.true_positives as f64 / denom as f64)
        } else {
            0.0
        }
    }

    /// Recall = TP / (TP + FN), explicitly 0.0 when the denominator is 0
    pub fn recall(&self) -> f64 {
        let denom = self.true_positives + self.false_negatives;
        if denom > 0 {
            round_metric(self.true_positives as f64 / denom as f64)
        } else {
            0.0
        }
    }

    /// F1 = 2 * precision * recall / (precision + recall), computed from the already
    /// rounded precision and recall. When precision + recall is 0 the ratio is
    /// undefined; our policy is to report 0.0 rather than error.
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall > 0.0 {
            round_metric(2.0 * precision * recall / (precision + recall))
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_metrics() {
        let summary = CategorySummary::new(9, 3, 1);
        assert_approx_eq!(summary.precision(), 0.75);
        assert_approx_eq!(summary.recall(), 0.9);
        assert_approx_eq!(summary.f1(), round_metric(2.0 * 0.75 * 0.9 / 1.65));
    }

    #[test]
    fn test_balanced_metrics() {
        // precision = recall = 0.5 must produce F1 = 0.5 exactly
        let summary = CategorySummary::new(5, 5, 5);
        assert_approx_eq!(summary.precision(), 0.5);
        assert_approx_eq!(summary.recall(), 0.5);
        assert_approx_eq!(summary.f1(), 0.5);
    }

    #[test]
    fn test_rounding() {
        // 1/3 must come out as 0.333, not the full ratio
        let summary = CategorySummary::new(1, 2, 2);
        assert_approx_eq!(summary.precision(), 0.333);
        assert_approx_eq!(summary.recall(), 0.333);
        assert_approx_eq!(summary.f1(), 0.333);
    }

    #[test]
    fn test_degenerate_metrics() {
        // nothing predicted and nothing expected: every metric is an explicit 0.0
        let summary = CategorySummary::default();
        assert_approx_eq!(summary.precision(), 0.0);
        assert_approx_eq!(summary.recall(), 0.0);
        assert_approx_eq!(summary.f1(), 0.0);

        // all disagreements: precision and recall are 0, F1 stays defined as 0.0
        let summary = CategorySummary::new(0, 4, 7);
        assert_approx_eq!(summary.f1(), 0.0);
    }
}
