// File: error.rs
// Error type shared across the alignment engine.

use std::fmt;

/// Errors surfaced by the alignment and correspondence engine.
///
/// Numerical degeneracies (SVD reflection sign, negative mean-squared
/// deviation from floating-point error, antiparallel axis vectors) are
/// handled inside the solvers and never reach this type.
#[derive(Debug, Clone, PartialEq)]
pub enum RmsdError {
    /// The two structures differ in atom count.
    SizeMismatch { p_size: usize, q_size: usize },
    /// Label multisets differ, or labels are ordered differently and no
    /// reordering was requested.
    LabelMismatch,
    /// A label has no entry in the atomic mass table.
    UnknownElement(String),
    /// Unrecognized rotation or reorder method name.
    UnknownMethod(String),
    /// The winning correspondence does not equate the two label sequences.
    /// This indicates a defect in a correspondence solver.
    AlignmentConsistency,
    /// Structure file could not be read or parsed.
    Parse(String),
}

impl fmt::Display for RmsdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RmsdError::SizeMismatch { p_size, q_size } => {
                write!(f, "structures not same size: {} vs {} atoms", p_size, q_size)
            }
            RmsdError::LabelMismatch => {
                write!(
                    f,
                    "atoms are not in the same order; use --reorder to align them"
                )
            }
            RmsdError::UnknownElement(symbol) => {
                write!(f, "unknown element symbol: {}", symbol)
            }
            RmsdError::UnknownMethod(name) => {
                write!(f, "unknown method: {}", name)
            }
            RmsdError::AlignmentConsistency => {
                write!(f, "reordered atom labels do not match; correspondence solver defect")
            }
            RmsdError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for RmsdError {}

impl From<std::io::Error> for RmsdError {
    fn from(e: std::io::Error) -> Self {
        RmsdError::Parse(e.to_string())
    }
}
