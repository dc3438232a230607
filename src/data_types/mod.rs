
/// Per-category precision / recall / F1 derived from a contingency table
pub mod category_metrics;
/// The common record form both source adapters produce
pub mod comparable_record;
/// Contains the full comparison results for one annotation source
pub mod concordance_benchmark;
/// Contains the (truth, predicted) category pair counts
pub mod contingency;
/// The closed evidence-code alphabet and the overlapping-code subset
pub mod evidence_codes;
/// Contains per-code TP, FP, TN, FN tallies
pub mod evidence_metrics;
/// The closed pathogenicity alphabet, label mappings, and report groupings
pub mod pathogenicity;
