// File: hungarian.rs
// Minimum-cost bipartite assignment between two same-label point groups.

/// Pairwise Euclidean distance matrix between the rows of `a` and `b`.
fn distance_matrix(a: &[[f64; 3]], b: &[[f64; 3]]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|p| {
            b.iter()
                .map(|q| {
                    let dx = p[0] - q[0];
                    let dy = p[1] - q[1];
                    let dz = p[2] - q[2];
                    (dx * dx + dy * dy + dz * dz).sqrt()
                })
                .collect()
        })
        .collect()
}

/// Minimum-cost perfect matching on a square cost matrix via the shortest
/// augmenting path formulation of the Hungarian algorithm with row/column
/// potentials. O(n^3).
///
/// Returns, for each row, the assigned column.
fn solve_assignment(cost: &[Vec<f64>]) -> Vec<usize> {
    let n = cost.len();
    // 1-indexed internals; index 0 is the virtual root of the alternating tree
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    let mut col_match = vec![0usize; n + 1]; // row matched to each column
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        col_match[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = col_match[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[col_match[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if col_match[j0] == 0 {
                break;
            }
        }

        // augment along the alternating path back to the root
        loop {
            let j1 = way[j0];
            col_match[j0] = col_match[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut row_to_col = vec![0usize; n];
    for j in 1..=n {
        row_to_col[col_match[j] - 1] = j - 1;
    }
    row_to_col
}

/// Correspondence between two same-label point groups: minimum total
/// Euclidean distance matching. `view[k]` is the index in `b` assigned to
/// `a[k]`.
pub fn hungarian(a: &[[f64; 3]], b: &[[f64; 3]]) -> Vec<usize> {
    let distances = distance_matrix(a, b);
    solve_assignment(&distances)
}
