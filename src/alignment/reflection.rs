// File: reflection.rs
// Search over axis swaps and sign reflections of structure Q.

use rayon::prelude::*;

use crate::alignment::RotationMethod;
use crate::error::RmsdError;
use crate::geometry::center;
use crate::reorder::{apply_view, apply_view_labels, ReorderMethod};

/// The 6 permutations of the coordinate axes.
pub const AXIS_SWAPS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 1, 0],
    [2, 0, 1],
];

/// The 8 sign triples applied to the coordinate axes.
pub const AXIS_REFLECTIONS: [[f64; 3]; 8] = [
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
];

/// Parity of each axis swap (+1 even, -1 odd permutation).
const SWAP_MASK: [i32; 6] = [1, -1, -1, 1, -1, 1];

/// Parity of each reflection (+1 for an even number of sign flips).
const REFLECTION_MASK: [i32; 8] = [1, -1, -1, -1, 1, 1, 1, -1];

/// Winning candidate of a reflection search.
#[derive(Debug, Clone)]
pub struct ReflectionResult {
    pub rmsd: f64,
    pub swap: [usize; 3],
    pub reflection: [f64; 3],
    pub review: Vec<usize>,
}

/// Minimize the RMSD over the 48 axis-swap/sign-reflection transforms of Q.
///
/// Each candidate permutes and sign-flips Q's coordinate columns, re-centers,
/// optionally re-runs the correspondence solver, and is scored by the chosen
/// rotation method (plain RMSD for `RotationMethod::None`). With
/// `keep_stereo` only the 24 proper transforms (swap parity times reflection
/// parity even) are considered, preserving stereochemistry.
///
/// Candidates are evaluated in parallel; ties are broken by enumeration
/// order, so the result is identical to a sequential first-found scan.
pub fn check_reflections(
    p_atoms: &[String],
    q_atoms: &[String],
    p_coord: &[[f64; 3]],
    q_coord: &[[f64; 3]],
    reorder_method: Option<ReorderMethod>,
    rotation_method: RotationMethod,
    keep_stereo: bool,
) -> Result<ReflectionResult, RmsdError> {
    let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(48);
    for (si, _) in AXIS_SWAPS.iter().enumerate() {
        for (ri, _) in AXIS_REFLECTIONS.iter().enumerate() {
            if keep_stereo && SWAP_MASK[si] * REFLECTION_MASK[ri] == -1 {
                continue; // skip enantiomers
            }
            candidates.push((si, ri));
        }
    }

    let scored: Vec<Result<(f64, Vec<usize>), RmsdError>> = candidates
        .par_iter()
        .map(|&(si, ri)| {
            let swap = AXIS_SWAPS[si];
            let reflection = AXIS_REFLECTIONS[ri];

            let tmp_coord: Vec<[f64; 3]> = q_coord
                .iter()
                .map(|p| {
                    [
                        p[swap[0]] * reflection[0],
                        p[swap[1]] * reflection[1],
                        p[swap[2]] * reflection[2],
                    ]
                })
                .collect();
            let tmp_coord = center(&tmp_coord);

            let review = match reorder_method {
                Some(method) => method.reorder(p_atoms, q_atoms, p_coord, &tmp_coord)?,
                None => (0..q_coord.len()).collect(),
            };
            let tmp_coord = apply_view(&tmp_coord, &review);

            let this_rmsd = rotation_method.score(p_coord, &tmp_coord)?;
            Ok((this_rmsd, review))
        })
        .collect();

    let mut min_rmsd = f64::INFINITY;
    let mut min_idx = 0;
    let mut min_review: Vec<usize> = Vec::new();
    for (idx, result) in scored.into_iter().enumerate() {
        let (this_rmsd, review) = result?;
        if this_rmsd < min_rmsd {
            min_rmsd = this_rmsd;
            min_idx = idx;
            min_review = review;
        }
    }

    let reordered_labels = apply_view_labels(q_atoms, &min_review);
    if reordered_labels != p_atoms {
        return Err(RmsdError::AlignmentConsistency);
    }

    let (si, ri) = candidates[min_idx];
    Ok(ReflectionResult {
        rmsd: min_rmsd,
        swap: AXIS_SWAPS[si],
        reflection: AXIS_REFLECTIONS[ri],
        review: min_review,
    })
}
