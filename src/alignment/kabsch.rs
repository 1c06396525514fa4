// File: kabsch.rs
// Kabsch algorithm for optimal superposition of two coordinate sets,
// plain and weighted variants.

use nalgebra::{Matrix3, Vector3, SVD};

use crate::alignment::rmsd;
use crate::error::RmsdError;
use crate::geometry::{center, centroid, rotate_coords};

/// Optimal rotation matrix decomposed from a 3x3 cross-covariance matrix.
///
/// SVD may yield an improper rotation (a reflection). When
/// det(V) * det(Wt) < 0 the last singular value and the last column of V are
/// negated to force determinant +1. Returns the rotation and the corrected
/// sum of singular values.
fn svd_rotation(c: &Matrix3<f64>) -> (Matrix3<f64>, f64) {
    let svd = SVD::new(*c, true, true);
    let mut v = svd.u.expect("SVD did not produce U");
    let w_t = svd.v_t.expect("SVD did not produce V^T");
    let mut s = svd.singular_values;

    if v.determinant() * w_t.determinant() < 0.0 {
        s[2] = -s[2];
        for i in 0..3 {
            v[(i, 2)] = -v[(i, 2)];
        }
    }

    (v * w_t, s[0] + s[1] + s[2])
}

/// Optimal rotation matrix mapping `p` onto `q` for two point sets already
/// centered at the origin.
pub fn kabsch(p: &[[f64; 3]], q: &[[f64; 3]]) -> Matrix3<f64> {
    // covariance C = P^T * Q
    let mut c = Matrix3::zeros();
    for (pp, qq) in p.iter().zip(q.iter()) {
        for i in 0..3 {
            for k in 0..3 {
                c[(i, k)] += pp[i] * qq[k];
            }
        }
    }
    svd_rotation(&c).0
}

/// Rotate `p` onto `q` and return the rotated coordinates.
pub fn kabsch_rotate(p: &[[f64; 3]], q: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let u = kabsch(p, q);
    rotate_coords(p, &u)
}

/// RMSD of `p` rotated onto `q` via Kabsch.
///
/// With `translate` both sets are first centered on their own centroids.
/// With `weights` the weighted solver is used instead.
pub fn kabsch_rmsd(
    p: &[[f64; 3]],
    q: &[[f64; 3]],
    weights: Option<&[f64]>,
    translate: bool,
) -> Result<f64, RmsdError> {
    if p.len() != q.len() {
        return Err(RmsdError::SizeMismatch {
            p_size: p.len(),
            q_size: q.len(),
        });
    }

    if translate {
        let p = center(p);
        let q = center(q);
        return kabsch_rmsd(&p, &q, weights, false);
    }

    if let Some(w) = weights {
        return kabsch_weighted_rmsd(p, q, Some(w));
    }

    let rotated = kabsch_rotate(p, q);
    rmsd(&rotated, q)
}

/// Full fit: center both sets, rotate `p` onto `q`, then translate onto `q`'s
/// original centroid. Returns the fitted coordinates, the rotation and `q`'s
/// centroid.
pub fn kabsch_fit(p: &[[f64; 3]], q: &[[f64; 3]]) -> (Vec<[f64; 3]>, Matrix3<f64>, [f64; 3]) {
    let qc = centroid(q);
    let p_centered = center(p);
    let q_centered = center(q);

    let u = kabsch(&p_centered, &q_centered);
    let fitted = rotate_coords(&p_centered, &u)
        .iter()
        .map(|r| [r[0] + qc[0], r[1] + qc[1], r[2] + qc[2]])
        .collect();

    (fitted, u, qc)
}

/// Weighted Kabsch for non-uniform weights and non-centered inputs.
///
/// Computes the weighted covariance, weighted centroids and weighted sums of
/// squares in one pass; the RMSD is derived from the singular values with the
/// mean-squared deviation clamped at zero to absorb floating-point underflow.
/// Returns (U, V, rmsd) in the row-vector convention of the plain solver.
pub fn kabsch_weighted(
    p: &[[f64; 3]],
    q: &[[f64; 3]],
    weights: Option<&[f64]>,
) -> Result<(Matrix3<f64>, Vector3<f64>, f64), RmsdError> {
    let n = p.len();
    if n != q.len() {
        return Err(RmsdError::SizeMismatch {
            p_size: n,
            q_size: q.len(),
        });
    }
    let uniform;
    let w = match weights {
        Some(w) => {
            if w.len() != n {
                return Err(RmsdError::SizeMismatch {
                    p_size: n,
                    q_size: w.len(),
                });
            }
            w
        }
        None => {
            uniform = vec![1.0 / n as f64; n];
            &uniform[..]
        }
    };

    let iw = 1.0 / w.iter().sum::<f64>();

    let mut c = Matrix3::zeros();
    let mut cmp = Vector3::zeros();
    let mut cmq = Vector3::zeros();
    let mut psq = 0.0;
    let mut qsq = 0.0;

    for j in 0..n {
        let wj = w[j];
        for i in 0..3 {
            for k in 0..3 {
                c[(i, k)] += p[j][i] * q[j][k] * wj;
            }
            cmp[i] += wj * p[j][i];
            cmq[i] += wj * q[j][i];
            psq += wj * p[j][i] * p[j][i];
            qsq += wj * q[j][i] * q[j][i];
        }
    }

    psq -= cmp.dot(&cmp) * iw;
    qsq -= cmq.dot(&cmq) * iw;
    c = (c - cmp * cmq.transpose() * iw) * iw;

    let (u, s_sum) = svd_rotation(&c);

    let mut msd = (psq + qsq) * iw - 2.0 * s_sum;
    if msd < 0.0 {
        msd = 0.0;
    }
    let rmsd_val = msd.sqrt();

    let mut v = Vector3::zeros();
    for i in 0..3 {
        let t: f64 = (0..3).map(|k| u[(i, k)] * cmq[k]).sum();
        v[i] = (cmp[i] - t) * iw;
    }

    Ok((u, v, rmsd_val))
}

/// Fit `p` to `q` with optional weights; returns the fitted coordinates and
/// the RMSD of the fit.
pub fn kabsch_weighted_fit(
    p: &[[f64; 3]],
    q: &[[f64; 3]],
    weights: Option<&[f64]>,
) -> Result<(Vec<[f64; 3]>, f64), RmsdError> {
    let (r, t, w_rmsd) = kabsch_weighted(q, p, weights)?;
    let r_t = r.transpose();
    let fitted = rotate_coords(p, &r_t)
        .iter()
        .map(|x| [x[0] + t[0], x[1] + t[1], x[2] + t[2]])
        .collect();
    Ok((fitted, w_rmsd))
}

/// Scalar weighted Kabsch RMSD.
pub fn kabsch_weighted_rmsd(
    p: &[[f64; 3]],
    q: &[[f64; 3]],
    weights: Option<&[f64]>,
) -> Result<f64, RmsdError> {
    let (_, _, w_rmsd) = kabsch_weighted(p, q, weights)?;
    Ok(w_rmsd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_coords(rng: &mut StdRng, n: usize) -> Vec<[f64; 3]> {
        (0..n)
            .map(|_| {
                [
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                ]
            })
            .collect()
    }

    fn random_rotation(rng: &mut StdRng) -> Matrix3<f64> {
        let axis = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .normalize();
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        *Rotation3::from_axis_angle(&nalgebra::Unit::new_normalize(axis), angle).matrix()
    }

    #[test]
    fn test_rotation_translation_invariance() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let p = random_coords(&mut rng, 12);
            let r = random_rotation(&mut rng);
            let t = [
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            ];
            let moved: Vec<[f64; 3]> = rotate_coords(&p, &r)
                .iter()
                .map(|x| [x[0] + t[0], x[1] + t[1], x[2] + t[2]])
                .collect();
            let result = kabsch_rmsd(&moved, &p, None, true).unwrap();
            assert!(result < 1e-9, "rmsd {} not ~0", result);
        }
    }

    #[test]
    fn test_kabsch_returns_proper_rotation_for_mirrored_input() {
        // P and Q related by a reflection through the xy-plane; the raw SVD
        // would return an improper matrix without the sign correction.
        let p = vec![
            [1.0, 0.0, 0.2],
            [0.0, 1.0, 0.5],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, -0.7],
        ];
        let q: Vec<[f64; 3]> = p.iter().map(|x| [x[0], x[1], -x[2]]).collect();

        let u = kabsch(&p, &q);
        assert!((u.determinant() - 1.0).abs() < 1e-9);

        // a mirror image is not reachable by a proper rotation
        let result = kabsch_rmsd(&p, &q, None, false).unwrap();
        assert!(result > 0.1);
    }

    #[test]
    fn test_kabsch_fit_recovers_target() {
        let mut rng = StdRng::seed_from_u64(13);
        let q = random_coords(&mut rng, 8);
        let r = random_rotation(&mut rng);
        let p: Vec<[f64; 3]> = rotate_coords(&q, &r)
            .iter()
            .map(|x| [x[0] + 1.5, x[1] - 2.0, x[2] + 0.25])
            .collect();

        let (fitted, u, _qc) = kabsch_fit(&p, &q);
        assert!((u.determinant() - 1.0).abs() < 1e-9);
        assert!(rmsd(&fitted, &q).unwrap() < 1e-9);
    }

    #[test]
    fn test_weighted_uniform_matches_unweighted() {
        let mut rng = StdRng::seed_from_u64(21);
        let p = random_coords(&mut rng, 10);
        let q = random_coords(&mut rng, 10);
        let p = center(&p);
        let q = center(&q);

        let plain = kabsch_rmsd(&p, &q, None, false).unwrap();
        let w = vec![1.0 / 10.0; 10];
        let weighted = kabsch_weighted_rmsd(&p, &q, Some(&w)).unwrap();
        assert!(
            (plain - weighted).abs() < 1e-6,
            "plain {} vs weighted {}",
            plain,
            weighted
        );
    }

    #[test]
    fn test_weighted_fit_identity() {
        let p = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let (fitted, w_rmsd) = kabsch_weighted_fit(&p, &p, None).unwrap();
        assert!(w_rmsd < 1e-9);
        assert!(rmsd(&fitted, &p).unwrap() < 1e-9);
    }

    #[test]
    fn test_weighted_clamps_underflow() {
        // identical inputs can push msd slightly negative in floating point
        let p = vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [-0.5, -0.7, -0.9]];
        let (_, _, w_rmsd) = kabsch_weighted(&p, &p, None).unwrap();
        assert!(w_rmsd >= 0.0);
        assert!(w_rmsd < 1e-7);
    }
}
