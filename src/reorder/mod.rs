//! Atom correspondence solvers.
//!
//! Every strategy takes two label sets and two coordinate sets of equal
//! length and returns a permutation `view` such that `q_atoms[view]` equals
//! `p_atoms` label by label. Correspondence is solved within each atom-type
//! group independently; the per-group sub-permutations are merged into the
//! full view.

pub mod brute;
pub mod distance;
pub mod hungarian;
pub mod inertia;

use rustc_hash::FxHashMap;

use crate::error::RmsdError;

/// Strategy for computing an atom correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderMethod {
    /// Sort each label group by distance to the origin and pair by rank.
    /// Requires both coordinate sets to be pre-centered on their centroids.
    Distance,
    /// Minimum-cost bipartite assignment on the pairwise distance matrix.
    Hungarian,
    /// Hungarian under the two principal-axis alignments of Q, keeping the
    /// candidate with the lower Kabsch RMSD.
    InertiaHungarian,
    /// Exhaustive permutation search per label group. Factorial cost;
    /// only sensible for small groups.
    Brute,
}

impl ReorderMethod {
    pub fn from_name(name: &str) -> Result<Self, RmsdError> {
        match name.to_ascii_lowercase().as_str() {
            "distance" => Ok(ReorderMethod::Distance),
            "hungarian" => Ok(ReorderMethod::Hungarian),
            "inertia-hungarian" => Ok(ReorderMethod::InertiaHungarian),
            "brute" => Ok(ReorderMethod::Brute),
            _ => Err(RmsdError::UnknownMethod(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReorderMethod::Distance => "distance",
            ReorderMethod::Hungarian => "hungarian",
            ReorderMethod::InertiaHungarian => "inertia-hungarian",
            ReorderMethod::Brute => "brute",
        }
    }

    /// Compute the correspondence permutation of `q` onto `p`.
    pub fn reorder(
        &self,
        p_atoms: &[String],
        q_atoms: &[String],
        p_coord: &[[f64; 3]],
        q_coord: &[[f64; 3]],
    ) -> Result<Vec<usize>, RmsdError> {
        match self {
            ReorderMethod::Distance => {
                per_label_reorder(p_atoms, q_atoms, p_coord, q_coord, distance::distance_view)
            }
            ReorderMethod::Hungarian => {
                per_label_reorder(p_atoms, q_atoms, p_coord, q_coord, |a, b| {
                    Ok(hungarian::hungarian(a, b))
                })
            }
            ReorderMethod::InertiaHungarian => {
                inertia::reorder_inertia_hungarian(p_atoms, q_atoms, p_coord, q_coord)
            }
            ReorderMethod::Brute => {
                per_label_reorder(p_atoms, q_atoms, p_coord, q_coord, brute::brute_permutation)
            }
        }
    }
}

/// Indices of each unique label, in sorted label order.
pub(crate) fn group_indices_by_label(atoms: &[String]) -> Vec<(String, Vec<usize>)> {
    let mut groups: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (i, atom) in atoms.iter().enumerate() {
        groups.entry(atom.as_str()).or_default().push(i);
    }
    let mut out: Vec<(String, Vec<usize>)> = groups
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

/// Run a per-group solver over each label group and merge the
/// sub-permutations into the full view.
///
/// The solver receives the group's P and Q coordinates and returns `view`
/// with `b[view[k]]` corresponding to `a[k]`.
pub(crate) fn per_label_reorder<F>(
    p_atoms: &[String],
    q_atoms: &[String],
    p_coord: &[[f64; 3]],
    q_coord: &[[f64; 3]],
    solver: F,
) -> Result<Vec<usize>, RmsdError>
where
    F: Fn(&[[f64; 3]], &[[f64; 3]]) -> Result<Vec<usize>, RmsdError>,
{
    if p_atoms.len() != q_atoms.len() || p_coord.len() != q_coord.len() {
        return Err(RmsdError::SizeMismatch {
            p_size: p_atoms.len(),
            q_size: q_atoms.len(),
        });
    }

    let p_groups = group_indices_by_label(p_atoms);
    let q_groups: FxHashMap<String, Vec<usize>> =
        group_indices_by_label(q_atoms).into_iter().collect();

    let mut view_reorder = vec![usize::MAX; q_atoms.len()];

    for (label, p_idx) in &p_groups {
        let q_idx = q_groups.get(label).ok_or(RmsdError::LabelMismatch)?;
        if p_idx.len() != q_idx.len() {
            return Err(RmsdError::LabelMismatch);
        }

        let a_coord: Vec<[f64; 3]> = p_idx.iter().map(|&i| p_coord[i]).collect();
        let b_coord: Vec<[f64; 3]> = q_idx.iter().map(|&i| q_coord[i]).collect();

        let view = solver(&a_coord, &b_coord)?;
        for (k, &v) in view.iter().enumerate() {
            view_reorder[p_idx[k]] = q_idx[v];
        }
    }

    // every slot must have been assigned exactly once
    if view_reorder.iter().any(|&v| v == usize::MAX) {
        return Err(RmsdError::LabelMismatch);
    }

    Ok(view_reorder)
}

/// Apply a view to a coordinate set: `out[k] = coords[view[k]]`.
pub fn apply_view(coords: &[[f64; 3]], view: &[usize]) -> Vec<[f64; 3]> {
    view.iter().map(|&i| coords[i]).collect()
}

/// Apply a view to a label set.
pub fn apply_view_labels(atoms: &[String], view: &[usize]) -> Vec<String> {
    view.iter().map(|&i| atoms[i].clone()).collect()
}
