
use std::collections::BTreeMap;

use crate::data_types::category_metrics::CategorySummary;
use crate::data_types::pathogenicity::{Grouping, Pathogenicity};

/// Counts of (truth category, predicted category) pairs accumulated over one
/// comparison pass. Accumulation is associative and commutative over record order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContingencyTable {
    /// Lookup from (truth, predicted) to the number of observed records
    counts: BTreeMap<(Pathogenicity, Pathogenicity), u64>
}

impl ContingencyTable {
    /// Adds one observation for a (truth, predicted) pair.
    /// # Arguments
    /// * `truth` - the reference category
    /// * `predicted` - the predictor's category
    pub fn increment(&mut self, truth: Pathogenicity, predicted: Pathogenicity) {
        self.increment_by(truth, predicted, 1);
    }

    /// Adds a batch of observations for a (truth, predicted) pair.
    /// # Arguments
    /// * `truth` - the reference category
    /// * `predicted` - the predictor's category
    /// * `count` - the number of observations to add
    pub fn increment_by(&mut self, truth: Pathogenicity, predicted: Pathogenicity, count: u64) {
        *self.counts.entry((truth, predicted)).or_default() += count;
    }

    /// Returns the count for a (truth, predicted) pair; absent cells are 0.
    pub fn get(&self, truth: Pathogenicity, predicted: Pathogenicity) -> u64 {
        self.counts.get(&(truth, predicted)).copied().unwrap_or(0)
    }

    /// Iterates the populated cells in deterministic category order.
    pub fn iter(&self) -> impl Iterator<Item = (&(Pathogenicity, Pathogenicity), &u64)> {
        self.counts.iter()
    }

    /// The sum of all cells, which equals the number of truth-matched records.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Collapses both axes of the table under the given grouping.
    /// # Arguments
    /// * `grouping` - the reporting grouping to collapse with
    pub fn grouped(&self, grouping: Grouping) -> Self {
        let mut collapsed = Self::default();
        for (&(truth, predicted), &count) in self.counts.iter() {
            collapsed.increment_by(grouping.apply(truth), grouping.apply(predicted), count);
        }
        collapsed
    }

    /// Derives the per-category summary for one category of this table:
    /// TP on the diagonal, FP down the predicted column, FN across the truth row.
    /// # Arguments
    /// * `category` - the category of interest
    pub fn category_summary(&self, category: Pathogenicity) -> CategorySummary {
        let mut summary = CategorySummary::default();
        for (&(truth, predicted), &count) in self.counts.iter() {
            if truth == category && predicted == category {
                summary.true_positives += count;
            } else if predicted == category {
                summary.false_positives += count;
            } else if truth == category {
                summary.false_negatives += count;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulation() {
        let mut table = ContingencyTable::default();
        table.increment(Pathogenicity::Pathogenic, Pathogenicity::Pathogenic);
        table.increment(Pathogenicity::Pathogenic, Pathogenicity::Pathogenic);
        table.increment(Pathogenicity::Pathogenic, Pathogenicity::Vus);

        assert_eq!(table.get(Pathogenicity::Pathogenic, Pathogenicity::Pathogenic), 2);
        assert_eq!(table.get(Pathogenicity::Pathogenic, Pathogenicity::Vus), 1);
        assert_eq!(table.get(Pathogenicity::Vus, Pathogenicity::Pathogenic), 0);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_grouped_standard() {
        let mut table = ContingencyTable::default();
        table.increment(Pathogenicity::Vus, Pathogenicity::VusHigh);
        table.increment(Pathogenicity::Vus, Pathogenicity::VusModerate);
        table.increment(Pathogenicity::Vus, Pathogenicity::Vus);
        table.increment(Pathogenicity::Pathogenic, Pathogenicity::LikelyPathogenic);

        let folded = table.grouped(Grouping::Standard);
        assert_eq!(folded.get(Pathogenicity::Vus, Pathogenicity::Vus), 3);
        assert_eq!(folded.get(Pathogenicity::Pathogenic, Pathogenicity::LikelyPathogenic), 1);
        assert_eq!(folded.total(), table.total());
    }

    #[test]
    fn test_grouped_merged() {
        let mut table = ContingencyTable::default();
        table.increment(Pathogenicity::Pathogenic, Pathogenicity::LikelyPathogenic);
        table.increment(Pathogenicity::LikelyPathogenic, Pathogenicity::Pathogenic);
        table.increment(Pathogenicity::LikelyBenign, Pathogenicity::Benign);
        table.increment(Pathogenicity::Vus, Pathogenicity::VusHigh);

        let merged = table.grouped(Grouping::Merged);
        assert_eq!(merged.get(Pathogenicity::Pathogenic, Pathogenicity::Pathogenic), 2);
        assert_eq!(merged.get(Pathogenicity::Benign, Pathogenicity::Benign), 1);
        assert_eq!(merged.get(Pathogenicity::Vus, Pathogenicity::Vus), 1);
        assert_eq!(merged.total(), table.total());
    }

    #[test]
    fn test_category_summary() {
        let mut table = ContingencyTable::default();
        table.increment_by(Pathogenicity::Pathogenic, Pathogenicity::Pathogenic, 8);
        table.increment_by(Pathogenicity::Vus, Pathogenicity::Pathogenic, 2);
        table.increment_by(Pathogenicity::Pathogenic, Pathogenicity::LikelyPathogenic, 3);
        table.increment_by(Pathogenicity::Benign, Pathogenicity::Benign, 5);

        let summary = table.category_summary(Pathogenicity::Pathogenic);
        assert_eq!(summary, CategorySummary::new(8, 2, 3));

        // a category with no observations at all is fully zeroed
        let summary = table.category_summary(Pathogenicity::LikelyBenign);
        assert_eq!(summary, CategorySummary::default());
    }
}
