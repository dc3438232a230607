
/*!
# Parsing module
Contains the logic for parsing the input files into comparable records.
*/
/// Streaming reader and adapter for competitor TSV exports
pub mod competitor;
/// Streaming reader and adapter for pipeline JSON-lines annotations
pub mod pipeline;
/// Loader and exact-match index for the ClinGen truth set
pub mod truth_set;
