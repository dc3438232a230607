
/// Command line interface functionality
pub mod cli;
/// Core logic for comparing one annotation source against the truth set
pub mod compare;
/// Contains various shared data types
pub mod data_types;
/// Tooling for parsing input files into comparable records
pub mod parsing;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
