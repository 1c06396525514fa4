// File: cli.rs
// Small parsing helpers for CLI argument values.

use crate::error::RmsdError;

/// Parse a comma-separated list of atom indices, e.g. "0,3,5".
/// Any unparsable token is an error rather than being skipped, so a typo
/// cannot silently change which atoms are compared.
pub fn parse_index_list(input: &str) -> Result<Vec<usize>, RmsdError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse()
                .map_err(|_| RmsdError::Parse(format!("invalid atom index: {}", token)))
        })
        .collect()
}
