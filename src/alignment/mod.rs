//! Rotation solvers and reflection search.
//!
//! All solvers are pure functions of their inputs. Rotation matrices are
//! proper (determinant +1) and applied in the row-vector convention,
//! `p' = p * U`.

pub mod kabsch;
pub mod quaternion;
pub mod reflection;

use crate::error::RmsdError;

/// Plain Euclidean RMSD between two already aligned, already corresponded
/// point sets.
pub fn rmsd(v: &[[f64; 3]], w: &[[f64; 3]]) -> Result<f64, RmsdError> {
    if v.len() != w.len() {
        return Err(RmsdError::SizeMismatch {
            p_size: v.len(),
            q_size: w.len(),
        });
    }
    let n = v.len() as f64;
    let sum_sq: f64 = v
        .iter()
        .zip(w.iter())
        .map(|(a, b)| {
            let dx = a[0] - b[0];
            let dy = a[1] - b[1];
            let dz = a[2] - b[2];
            dx * dx + dy * dy + dz * dz
        })
        .sum();
    Ok((sum_sq / n).sqrt())
}

/// How to score a candidate alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMethod {
    Kabsch,
    Quaternion,
    /// No rotation; plain RMSD of the coordinates as given.
    None,
}

impl RotationMethod {
    pub fn from_name(name: &str) -> Result<Self, RmsdError> {
        match name.to_ascii_lowercase().as_str() {
            "kabsch" => Ok(RotationMethod::Kabsch),
            "quaternion" => Ok(RotationMethod::Quaternion),
            "none" => Ok(RotationMethod::None),
            _ => Err(RmsdError::UnknownMethod(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RotationMethod::Kabsch => "kabsch",
            RotationMethod::Quaternion => "quaternion",
            RotationMethod::None => "none",
        }
    }

    /// RMSD of `p` against `q` under this method's optimal rotation.
    pub fn score(&self, p: &[[f64; 3]], q: &[[f64; 3]]) -> Result<f64, RmsdError> {
        match self {
            RotationMethod::Kabsch => kabsch::kabsch_rmsd(p, q, None, false),
            RotationMethod::Quaternion => quaternion::quaternion_rmsd(p, q),
            RotationMethod::None => rmsd(p, q),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rmsd_identical_is_zero() {
        let v = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_eq!(rmsd(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn test_rmsd_size_mismatch() {
        let v = vec![[0.0, 0.0, 0.0]];
        let w = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        assert!(matches!(
            rmsd(&v, &w),
            Err(RmsdError::SizeMismatch { p_size: 1, q_size: 2 })
        ));
    }

    #[test]
    fn test_rmsd_unit_displacement() {
        let v = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let w = vec![[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        assert!((rmsd(&v, &w).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(
            RotationMethod::from_name("KABSCH").unwrap(),
            RotationMethod::Kabsch
        );
        assert_eq!(
            RotationMethod::from_name("quaternion").unwrap(),
            RotationMethod::Quaternion
        );
        assert!(matches!(
            RotationMethod::from_name("svd"),
            Err(RmsdError::UnknownMethod(_))
        ));
    }
}
