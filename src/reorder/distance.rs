// File: distance.rs
// Rank-order correspondence by distance to the origin.

use crate::error::RmsdError;

/// Indices sorted by ascending value. Stable, so equal values keep their
/// original relative order.
fn argsort(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
    idx
}

/// Pair the points of `a` and `b` by their rank in distance to the origin.
///
/// Both sets must be centered on their centroids beforehand; the norms are
/// only comparable in a shared frame. Cheap, but wrong whenever two points
/// share a radius at different angular positions.
pub fn distance_view(a: &[[f64; 3]], b: &[[f64; 3]]) -> Result<Vec<usize>, RmsdError> {
    let a_norms: Vec<f64> = a
        .iter()
        .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
        .collect();
    let b_norms: Vec<f64> = b
        .iter()
        .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
        .collect();

    let order_a = argsort(&a_norms);
    let order_b = argsort(&b_norms);

    // project the rank order of A onto B: translator inverts order_a
    let mut translator = vec![0usize; order_a.len()];
    for (rank, &i) in order_a.iter().enumerate() {
        translator[i] = rank;
    }

    Ok(translator.iter().map(|&rank| order_b[rank]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::hungarian::hungarian;

    #[test]
    fn test_distance_view_distinct_radii() {
        // well separated radii: distance pairing is exact
        let a = vec![[1.0, 0.0, 0.0], [3.0, 0.0, 0.0], [6.0, 0.0, 0.0]];
        let b = vec![[0.0, 6.0, 0.0], [0.0, 1.0, 0.0], [0.0, 3.0, 0.0]];

        let view = distance_view(&a, &b).unwrap();
        assert_eq!(view, vec![1, 2, 0]);
    }

    #[test]
    fn test_distance_matches_hungarian_at_distinct_radii() {
        let a = vec![[1.0, 0.0, 0.0], [5.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
        let b = vec![[9.9, 0.1, 0.0], [1.1, 0.0, 0.0], [5.2, -0.1, 0.0]];

        let dist_view = distance_view(&a, &b).unwrap();
        let hung_view = hungarian(&a, &b);
        assert_eq!(dist_view, hung_view);
    }

    #[test]
    fn test_distance_view_tolerates_nan() {
        // NaN coordinates sort last instead of panicking the comparator
        let a = vec![[1.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [3.0, 0.0, 0.0]];
        let b = vec![[3.0, 0.0, 0.0], [1.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0]];

        let view = distance_view(&a, &b).unwrap();
        assert_eq!(view, vec![1, 2, 0]);
    }
}
