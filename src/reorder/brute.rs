// File: brute.rs
// Exhaustive correspondence search over all row permutations of a group.

use crate::alignment::kabsch::kabsch_rmsd;
use crate::error::RmsdError;

/// Heap's algorithm as a lazy iterator: yields every permutation of
/// `0..n` exactly once, generated by successive single swaps.
pub struct PermutationIterator {
    elements: Vec<usize>,
    c: Vec<usize>,
    i: usize,
    started: bool,
}

impl PermutationIterator {
    pub fn new(n: usize) -> Self {
        Self {
            elements: (0..n).collect(),
            c: vec![0; n],
            i: 0,
            started: false,
        }
    }
}

impl Iterator for PermutationIterator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.elements.clone());
        }
        let n = self.elements.len();
        while self.i < n {
            if self.c[self.i] < self.i {
                if self.i % 2 == 0 {
                    self.elements.swap(0, self.i);
                } else {
                    let j = self.c[self.i];
                    self.elements.swap(j, self.i);
                }
                self.c[self.i] += 1;
                self.i = 0;
                return Some(self.elements.clone());
            } else {
                self.c[self.i] = 0;
                self.i += 1;
            }
        }
        None
    }
}

/// Ground-truth correspondence between two same-label point groups:
/// evaluate the Kabsch RMSD under every row ordering of `b` and keep the
/// minimum. Factorial cost; intended for groups of up to ~8 points.
pub fn brute_permutation(a: &[[f64; 3]], b: &[[f64; 3]]) -> Result<Vec<usize>, RmsdError> {
    let mut rmsd_min = f64::INFINITY;
    let mut view_min: Vec<usize> = (0..a.len()).collect();

    for view in PermutationIterator::new(a.len()) {
        let ordered: Vec<[f64; 3]> = view.iter().map(|&i| b[i]).collect();
        let rmsd_tmp = kabsch_rmsd(a, &ordered, None, false)?;
        if rmsd_tmp < rmsd_min {
            rmsd_min = rmsd_tmp;
            view_min = view;
        }
    }

    Ok(view_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_permutation_count_and_uniqueness() {
        // 4 elements: exactly 4! = 24 permutations, each exactly once
        let perms: Vec<Vec<usize>> = PermutationIterator::new(4).collect();
        assert_eq!(perms.len(), 24);
        let unique: FxHashSet<Vec<usize>> = perms.into_iter().collect();
        assert_eq!(unique.len(), 24);
    }

    #[test]
    fn test_permutation_single_element() {
        let perms: Vec<Vec<usize>> = PermutationIterator::new(1).collect();
        assert_eq!(perms, vec![vec![0]]);
    }

    #[test]
    fn test_brute_recovers_shuffled_order() {
        let a = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        // b is a shuffle of a: 2, 0, 3, 1
        let b = vec![a[2], a[0], a[3], a[1]];
        let view = brute_permutation(&a, &b).unwrap();
        let ordered: Vec<[f64; 3]> = view.iter().map(|&i| b[i]).collect();
        let result = kabsch_rmsd(&a, &ordered, None, false).unwrap();
        assert!(result < 1e-9);
    }
}
