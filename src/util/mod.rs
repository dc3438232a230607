
/// Helper functions for reading/writing JSON and JSON-lines via serde
pub mod json_io;
/// Identifier composition and evidence-code token normalization
pub mod normalize;
