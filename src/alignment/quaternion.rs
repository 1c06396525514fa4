// File: quaternion.rs
// Quaternion-based optimal rotation, after doi:10.1016/1049-9660(91)90036-O.
// Mathematically equivalent to Kabsch but solved by eigendecomposition
// instead of SVD, which avoids the SVD reflection ambiguity.

use nalgebra::{Matrix3, Matrix4, Vector4};

use crate::alignment::rmsd;
use crate::error::RmsdError;
use crate::geometry::rotate_coords;

/// Left quaternion-multiplication matrix of r.
fn make_w(r: &Vector4<f64>) -> Matrix4<f64> {
    let (r1, r2, r3, r4) = (r[0], r[1], r[2], r[3]);
    Matrix4::new(
        r4, r3, -r2, r1, //
        -r3, r4, r1, r2, //
        r2, -r1, r4, r3, //
        -r1, -r2, -r3, r4,
    )
}

/// Right quaternion-multiplication matrix of r.
fn make_q(r: &Vector4<f64>) -> Matrix4<f64> {
    let (r1, r2, r3, r4) = (r[0], r[1], r[2], r[3]);
    Matrix4::new(
        r4, -r3, r2, r1, //
        r3, r4, -r1, r2, //
        -r2, r1, r4, r3, //
        -r1, -r2, -r3, r4,
    )
}

/// 3x3 rotation matrix of the unit quaternion r.
fn quaternion_transform(r: &Vector4<f64>) -> Matrix3<f64> {
    let m = make_w(r).transpose() * make_q(r);
    m.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Optimal rotation matrix mapping `x` onto `y` for two point sets already
/// centered at the origin.
///
/// Accumulates A = sum_k Q_k^T * W_k over all point pairs and takes the
/// eigenvector of A's largest eigenvalue as the optimal quaternion.
pub fn quaternion_rotate(x: &[[f64; 3]], y: &[[f64; 3]]) -> Matrix3<f64> {
    let mut a = Matrix4::zeros();
    for (xk, yk) in x.iter().zip(y.iter()) {
        let w = make_w(&Vector4::new(yk[0], yk[1], yk[2], 0.0));
        let q = make_q(&Vector4::new(xk[0], xk[1], xk[2], 0.0));
        a += q.transpose() * w;
    }

    let eigen = a.symmetric_eigen();
    let mut max_idx = 0;
    for i in 1..4 {
        if eigen.eigenvalues[i] > eigen.eigenvalues[max_idx] {
            max_idx = i;
        }
    }
    let r = eigen.eigenvectors.column(max_idx).into_owned();
    quaternion_transform(&r)
}

/// RMSD of `p` rotated onto `q` via the quaternion method.
pub fn quaternion_rmsd(p: &[[f64; 3]], q: &[[f64; 3]]) -> Result<f64, RmsdError> {
    if p.len() != q.len() {
        return Err(RmsdError::SizeMismatch {
            p_size: p.len(),
            q_size: q.len(),
        });
    }
    let rot = quaternion_rotate(p, q);
    rmsd(&rotate_coords(p, &rot), q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::kabsch::kabsch_rmsd;
    use crate::geometry::center;
    use nalgebra::{Rotation3, Unit, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_quaternion_identity() {
        let p = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(quaternion_rmsd(&p, &p).unwrap() < 1e-9);
    }

    #[test]
    fn test_quaternion_recovers_rotation() {
        let p = center(&[
            [1.0, 0.0, 0.3],
            [0.0, 2.0, -0.4],
            [-1.0, -1.0, 0.8],
            [0.5, 0.5, 0.5],
        ]);
        let rot = Rotation3::from_axis_angle(
            &Unit::new_normalize(Vector3::new(1.0, 2.0, 3.0)),
            1.234,
        );
        let q: Vec<[f64; 3]> = p
            .iter()
            .map(|x| {
                let v = rot * Vector3::new(x[0], x[1], x[2]);
                [v[0], v[1], v[2]]
            })
            .collect();
        assert!(quaternion_rmsd(&p, &q).unwrap() < 1e-9);
    }

    #[test]
    fn test_quaternion_agrees_with_kabsch() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            let p: Vec<[f64; 3]> = (0..8)
                .map(|_| {
                    [
                        rng.gen_range(-3.0..3.0),
                        rng.gen_range(-3.0..3.0),
                        rng.gen_range(-3.0..3.0),
                    ]
                })
                .collect();
            let q: Vec<[f64; 3]> = (0..8)
                .map(|_| {
                    [
                        rng.gen_range(-3.0..3.0),
                        rng.gen_range(-3.0..3.0),
                        rng.gen_range(-3.0..3.0),
                    ]
                })
                .collect();
            let p = center(&p);
            let q = center(&q);
            let a = quaternion_rmsd(&p, &q).unwrap();
            let b = kabsch_rmsd(&p, &q, None, false).unwrap();
            assert!((a - b).abs() < 1e-6, "quaternion {} vs kabsch {}", a, b);
        }
    }
}
