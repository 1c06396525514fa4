// File: inertia.rs
// Principal-axis guided Hungarian correspondence.

use crate::alignment::kabsch::kabsch_rmsd;
use crate::error::RmsdError;
use crate::geometry::{get_principal_axis, rotate_coords, rotation_matrix_vectors};
use crate::reorder::hungarian::hungarian;
use crate::reorder::{apply_view, per_label_reorder};

/// Align the principal inertia axes of P and Q before the Hungarian
/// assignment.
///
/// An eigenvector has no canonical sign, so Q's axis is tried both parallel
/// and antiparallel to P's; the candidate with the lower Kabsch RMSD wins.
pub fn reorder_inertia_hungarian(
    p_atoms: &[String],
    q_atoms: &[String],
    p_coord: &[[f64; 3]],
    q_coord: &[[f64; 3]],
) -> Result<Vec<usize>, RmsdError> {
    let p_axis = get_principal_axis(p_atoms, p_coord)?;
    let q_axis = get_principal_axis(q_atoms, q_coord)?;

    let u1 = rotation_matrix_vectors(&p_axis, &q_axis);
    let u2 = rotation_matrix_vectors(&p_axis, &(-q_axis));

    let q_coord1 = rotate_coords(q_coord, &u1);
    let q_coord2 = rotate_coords(q_coord, &u2);

    let review1 = per_label_reorder(p_atoms, q_atoms, p_coord, &q_coord1, |a, b| {
        Ok(hungarian(a, b))
    })?;
    let review2 = per_label_reorder(p_atoms, q_atoms, p_coord, &q_coord2, |a, b| {
        Ok(hungarian(a, b))
    })?;

    let rmsd1 = kabsch_rmsd(p_coord, &apply_view(&q_coord1, &review1), None, false)?;
    let rmsd2 = kabsch_rmsd(p_coord, &apply_view(&q_coord2, &review2), None, false)?;

    if rmsd1 < rmsd2 {
        Ok(review1)
    } else {
        Ok(review2)
    }
}
