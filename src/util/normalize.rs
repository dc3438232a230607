
/// Placeholder for an empty REF or ALT field in a composed identifier
const EMPTY_ALLELE_PLACEHOLDER: &str = ".";

/// Composes the canonical `chrom-pos-ref-alt` identifier from raw source fields.
/// A leading "chr" prefix is stripped from the chromosome and empty alleles are
/// replaced with ".". Returns None when the chromosome or position is empty; the
/// caller is expected to count such rows as unmatched rather than raise an error.
/// # Arguments
/// * `chromosome` - raw chromosome field, may carry a "chr" prefix
/// * `position` - raw position field, kept as a string since it is only used for matching
/// * `ref_seq` - raw reference allele, may be empty
/// * `var_seq` - raw alternate allele, may be empty
pub fn canonical_identifier(chromosome: &str, position: &str, ref_seq: &str, var_seq: &str) -> Option<String> {
    if chromosome.is_empty() || position.is_empty() {
        return None;
    }

    let chromosome = chromosome.strip_prefix("chr").unwrap_or(chromosome);
    let ref_seq = if ref_seq.is_empty() { EMPTY_ALLELE_PLACEHOLDER } else { ref_seq };
    let var_seq = if var_seq.is_empty() { EMPTY_ALLELE_PLACEHOLDER } else { var_seq };
    Some(format!("{chromosome}-{position}-{ref_seq}-{var_seq}"))
}

/// Reduces a raw evidence-code token to the bare code by truncating at the first
/// underscore and then trimming any run of trailing '+' / '-' modifier characters.
/// Tokens that are not canonical codes are returned unchanged; filtering against
/// the canonical alphabet happens downstream.
/// # Examples
/// * `PS1_strong` => `PS1`
/// * `PM2-` => `PM2`
/// * `PP3++` => `PP3`
pub fn normalize_code_token(raw: &str) -> String {
    let bare = match raw.find('_') {
        Some(index) => &raw[..index],
        None => raw
    };
    bare.trim_end_matches(['+', '-']).to_string()
}
