//! Geometric primitives shared by the rotation and correspondence solvers.
//!
//! Rotation matrices follow the row-vector convention throughout the crate:
//! a point `p` is rotated as `p * U`.

use nalgebra::{Matrix3, Vector3};

use crate::error::RmsdError;
use crate::structure::atom::atomic_mass_checked;

/// Mean position of all points.
pub fn centroid(coords: &[[f64; 3]]) -> [f64; 3] {
    let n = coords.len() as f64;
    let mut c = [0.0f64; 3];
    for p in coords {
        c[0] += p[0];
        c[1] += p[1];
        c[2] += p[2];
    }
    [c[0] / n, c[1] / n, c[2] / n]
}

/// Subtract `center` from every point, returning the translated set.
pub fn translate_to(coords: &[[f64; 3]], center: &[f64; 3]) -> Vec<[f64; 3]> {
    coords
        .iter()
        .map(|p| [p[0] - center[0], p[1] - center[1], p[2] - center[2]])
        .collect()
}

/// Center a point set on its own centroid.
pub fn center(coords: &[[f64; 3]]) -> Vec<[f64; 3]> {
    translate_to(coords, &centroid(coords))
}

/// Rotate every point as a row vector: `p' = p * u`.
pub fn rotate_coords(coords: &[[f64; 3]], u: &Matrix3<f64>) -> Vec<[f64; 3]> {
    coords
        .iter()
        .map(|p| {
            [
                p[0] * u[(0, 0)] + p[1] * u[(1, 0)] + p[2] * u[(2, 0)],
                p[0] * u[(0, 1)] + p[1] * u[(1, 1)] + p[2] * u[(2, 1)],
                p[0] * u[(0, 2)] + p[1] * u[(1, 2)] + p[2] * u[(2, 2)],
            ]
        })
        .collect()
}

/// Mass-weighted center of a point set.
///
/// Fails with `UnknownElement` when a label has no mass entry.
pub fn get_cm(atoms: &[String], coords: &[[f64; 3]]) -> Result<Vector3<f64>, RmsdError> {
    let mut total_mass = 0.0;
    let mut cm = Vector3::zeros();
    for (atom, p) in atoms.iter().zip(coords.iter()) {
        let mass = atomic_mass_checked(atom)?;
        total_mass += mass;
        cm += mass * Vector3::new(p[0], p[1], p[2]);
    }
    Ok(cm / total_mass)
}

/// Mass-weighted moment-of-inertia tensor, accumulated about the center of
/// mass.
pub fn get_inertia_tensor(
    atoms: &[String],
    coords: &[[f64; 3]],
) -> Result<Matrix3<f64>, RmsdError> {
    let cm = get_cm(atoms, coords)?;

    let mut ixx = 0.0;
    let mut iyy = 0.0;
    let mut izz = 0.0;
    let mut ixy = 0.0;
    let mut ixz = 0.0;
    let mut iyz = 0.0;

    for (atom, p) in atoms.iter().zip(coords.iter()) {
        let mass = atomic_mass_checked(atom)?;
        let x = p[0] - cm[0];
        let y = p[1] - cm[1];
        let z = p[2] - cm[2];
        ixx += mass * (y * y + z * z);
        iyy += mass * (x * x + z * z);
        izz += mass * (x * x + y * y);
        ixy -= mass * x * y;
        ixz -= mass * x * z;
        iyz -= mass * y * z;
    }

    Ok(Matrix3::new(ixx, ixy, ixz, ixy, iyy, iyz, ixz, iyz, izz))
}

/// Principal axis of a structure: eigenvector of the largest eigenvalue of
/// the inertia tensor.
///
/// When two eigenvalues are equal (symmetric tops), the axis is ambiguous;
/// the eigenvector at the lowest index of the maximal eigenvalue is taken.
pub fn get_principal_axis(
    atoms: &[String],
    coords: &[[f64; 3]],
) -> Result<Vector3<f64>, RmsdError> {
    let tensor = get_inertia_tensor(atoms, coords)?;
    let eigen = tensor.symmetric_eigen();

    let mut max_idx = 0;
    for i in 1..3 {
        if eigen.eigenvalues[i] > eigen.eigenvalues[max_idx] {
            max_idx = i;
        }
    }
    Ok(eigen.eigenvectors.column(max_idx).into_owned())
}

/// Rotation matrix mapping `v1` onto `v2` via Rodrigues' formula.
///
/// Identical vectors give the identity; exactly antiparallel vectors give a
/// 180-degree rotation about the y-axis, since the cross product is singular
/// there.
pub fn rotation_matrix_vectors(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Matrix3<f64> {
    if v1 == v2 {
        return Matrix3::identity();
    }
    if *v1 == -v2 {
        return Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0);
    }

    let v = v1.cross(v2);
    let s = v.norm();
    let c = v1.dot(v2);

    let vx = Matrix3::new(0.0, -v[2], v[1], v[2], 0.0, -v[0], -v[1], v[0], 0.0);

    Matrix3::identity() + vx + vx * vx * ((1.0 - c) / (s * s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid() {
        let coords = vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 3.0, 0.0]];
        let c = centroid(&coords);
        assert!((c[0] - 1.0).abs() < 1e-12);
        assert!((c[1] - 1.0).abs() < 1e-12);
        assert!(c[2].abs() < 1e-12);

        let centered = center(&coords);
        let c2 = centroid(&centered);
        assert!(c2[0].abs() < 1e-12 && c2[1].abs() < 1e-12 && c2[2].abs() < 1e-12);
    }

    #[test]
    fn test_inertia_tensor_symmetric() {
        let atoms = vec!["O".to_string(), "H".to_string(), "H".to_string()];
        let coords = vec![[0.0, 0.0, 0.0], [0.96, 0.0, 0.0], [-0.24, 0.93, 0.0]];
        let tensor = get_inertia_tensor(&atoms, &coords).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!((tensor[(i, j)] - tensor[(j, i)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_inertia_tensor_unknown_element() {
        let atoms = vec!["Zq".to_string()];
        let coords = vec![[0.0, 0.0, 0.0]];
        assert!(matches!(
            get_inertia_tensor(&atoms, &coords),
            Err(RmsdError::UnknownElement(_))
        ));
    }

    #[test]
    fn test_principal_axis_of_linear_molecule() {
        // CO2-like rod along x: largest moment is perpendicular to the rod,
        // so the principal axis has no x component.
        let atoms = vec!["O".to_string(), "C".to_string(), "O".to_string()];
        let coords = vec![[-1.16, 0.0, 0.0], [0.0, 0.0, 0.0], [1.16, 0.0, 0.0]];
        let axis = get_principal_axis(&atoms, &coords).unwrap();
        assert!(axis[0].abs() < 1e-9);
        assert!((axis.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_matrix_vectors() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);

        let id = rotation_matrix_vectors(&x, &x);
        assert!((id - Matrix3::identity()).norm() < 1e-12);

        // column convention inside the formula: R * v1 == v2
        let r = rotation_matrix_vectors(&x, &y);
        assert!((r * x - y).norm() < 1e-12);
        assert!((r.determinant() - 1.0).abs() < 1e-12);

        // antiparallel special case must still be a proper rotation
        let anti = rotation_matrix_vectors(&x, &-x);
        assert!((anti * x + x).norm() < 1e-12);
        assert!((anti.determinant() - 1.0).abs() < 1e-12);
    }
}
