//! Molecular structures: atom labels, coordinates and file I/O.

pub mod atom;
pub mod io;

use rustc_hash::FxHashMap;

use crate::error::RmsdError;

/// A molecular structure: parallel lists of atom labels and coordinates.
///
/// Solvers never mutate a structure in place; they return new coordinate
/// vectors or index permutations.
#[derive(Debug, Clone)]
pub struct Structure {
    pub atoms: Vec<String>,
    pub coords: Vec<[f64; 3]>,
}

impl Structure {
    pub fn new(atoms: Vec<String>, coords: Vec<[f64; 3]>) -> Self {
        assert!(
            atoms.len() == coords.len(),
            "Atom labels and coordinates differ in size"
        );
        Structure { atoms, coords }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Subset of the structure at the given indices, in index order.
    pub fn select(&self, view: &[usize]) -> Structure {
        let atoms = view.iter().map(|&i| self.atoms[i].clone()).collect();
        let coords = view.iter().map(|&i| self.coords[i]).collect();
        Structure { atoms, coords }
    }

    /// Indices of all non-hydrogen atoms.
    pub fn heavy_atom_view(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| !self.atoms[i].eq_ignore_ascii_case("H"))
            .collect()
    }

    /// Per-label atom counts.
    pub fn label_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for atom in &self.atoms {
            *counts.entry(atom.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Check that two structures have the same number of atoms.
pub fn check_sizes(p: &Structure, q: &Structure) -> Result<(), RmsdError> {
    if p.len() != q.len() {
        return Err(RmsdError::SizeMismatch {
            p_size: p.len(),
            q_size: q.len(),
        });
    }
    Ok(())
}

/// Check that two label sets contain the same multiset of labels.
/// A valid correspondence exists only under this condition.
pub fn check_label_multisets(p: &Structure, q: &Structure) -> Result<(), RmsdError> {
    if p.label_counts() != q.label_counts() {
        return Err(RmsdError::LabelMismatch);
    }
    Ok(())
}

/// Check that two label sequences are identical, element by element.
pub fn labels_in_order(p_atoms: &[String], q_atoms: &[String]) -> bool {
    p_atoms.len() == q_atoms.len() && p_atoms.iter().zip(q_atoms.iter()).all(|(a, b)| a == b)
}
