
/*!
# Writers module
Contains the logic for writing the TSV output files for one comparison run.
*/
/// Writes (and re-reads) the category contingency summaries
pub mod contingency_summary;
/// Writes the per-code confusion and double-counting summaries
pub mod evidence_summary;
/// Writes the per-category precision / recall / F1 summaries
pub mod statistics_summary;
