
/// Settings and checks for the compare sub-command
pub mod compare;
/// Shared CLI definitions and filename check helpers
pub mod core;
/// Settings and checks for the stats sub-command
pub mod stats;
