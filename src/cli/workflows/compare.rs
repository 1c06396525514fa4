// File: compare.rs
// Workflow for comparing two structure files: load, filter, center,
// dispatch on the selected rotation/reorder/reflection combination and
// print the RMSD or the fitted structure.

use crate::alignment::kabsch::kabsch;
use crate::alignment::reflection::check_reflections;
use crate::alignment::RotationMethod;
use crate::cli::AppArgs;
use crate::error::RmsdError;
use crate::geometry::{centroid, rotate_coords, translate_to};
use crate::reorder::{apply_view, apply_view_labels, ReorderMethod};
use crate::structure::io::{read_structure, StructureFileFormat};
use crate::structure::{check_sizes, labels_in_order, Structure};

pub fn compare(env: AppArgs) -> Result<(), RmsdError> {
    let AppArgs::Compare {
        structure_a,
        structure_b,
        rotation,
        reorder,
        reorder_method,
        use_reflections,
        use_reflections_keep_stereo,
        no_hydrogen,
        remove_idx,
        add_idx,
        format,
        output,
    } = env
    else {
        unreachable!("compare workflow requires compare arguments");
    };

    // methods are validated before any computation starts
    let rotation_method = RotationMethod::from_name(&rotation)?;
    let reorder_method = ReorderMethod::from_name(&reorder_method)?;
    let reorder_method = if reorder { Some(reorder_method) } else { None };

    let format = match format {
        Some(name) => StructureFileFormat::from_name(&name)?,
        None => StructureFileFormat::from_path(&structure_a)?,
    };

    let p_all = read_structure(&structure_a, format)?;
    let q_all = read_structure(&structure_b, format)?;

    check_sizes(&p_all, &q_all)?;

    if !labels_in_order(&p_all.atoms, &q_all.atoms) && reorder_method.is_none() {
        return Err(RmsdError::LabelMismatch);
    }

    // atom filter
    let views: Option<(Vec<usize>, Vec<usize>)> = if no_hydrogen {
        Some((p_all.heavy_atom_view(), q_all.heavy_atom_view()))
    } else if !remove_idx.is_empty() {
        let keep: Vec<usize> = (0..p_all.len())
            .filter(|i| !remove_idx.contains(i))
            .collect();
        Some((keep.clone(), keep))
    } else if !add_idx.is_empty() {
        Some((add_idx.clone(), add_idx.clone()))
    } else {
        None
    };

    let (p, q) = match &views {
        None => (p_all.clone(), q_all.clone()),
        Some((p_view, q_view)) => {
            if output && (reorder_method.is_some() || use_reflections || use_reflections_keep_stereo)
            {
                return Err(RmsdError::Parse(
                    "cannot reorder atoms or use reflections and print structure when excluding atoms"
                        .to_string(),
                ));
            }
            (p_all.select(p_view), q_all.select(q_view))
        }
    };
    check_sizes(&p, &q)?;

    let p_cent = centroid(&p.coords);
    let q_cent = centroid(&q.coords);
    let p_coord = translate_to(&p.coords, &p_cent);
    let mut q_coord = translate_to(&q.coords, &q_cent);
    let mut q_atoms = q.atoms.clone();

    let mut result_rmsd: Option<f64> = None;
    let mut review: Option<Vec<usize>> = None;

    if use_reflections || use_reflections_keep_stereo {
        let result = check_reflections(
            &p.atoms,
            &q_atoms,
            &p_coord,
            &q_coord,
            reorder_method,
            rotation_method,
            use_reflections_keep_stereo,
        )?;
        result_rmsd = Some(result.rmsd);
        review = Some(result.review);
    } else if let Some(method) = reorder_method {
        let view = method.reorder(&p.atoms, &q_atoms, &p_coord, &q_coord)?;
        q_coord = apply_view(&q_coord, &view);
        q_atoms = apply_view_labels(&q_atoms, &view);
        if !labels_in_order(&p.atoms, &q_atoms) {
            return Err(RmsdError::AlignmentConsistency);
        }
        review = Some(view);
    }

    if output {
        let mut out = Structure::new(q_all.atoms.clone(), q_all.coords.clone());
        if let Some(view) = &review {
            if view.len() != q_all.len() {
                return Err(RmsdError::Parse(
                    "reorder length error; full atom list needed for output".to_string(),
                ));
            }
            out = out.select(view);
        }

        let u = kabsch(&q_coord, &p_coord);
        let centered = translate_to(&out.coords, &q_cent);
        let rotated = rotate_coords(&centered, &u);
        let fitted: Vec<[f64; 3]> = rotated
            .iter()
            .map(|x| [x[0] + p_cent[0], x[1] + p_cent[1], x[2] + p_cent[2]])
            .collect();

        let title = format!("{} - modified", structure_b);
        println!(
            "{}",
            crate::structure::io::xyz::set_coordinates(&out.atoms, &fitted, &title)
        );
        return Ok(());
    }

    let result_rmsd = match result_rmsd {
        Some(value) => value,
        None => rotation_method.score(&p_coord, &q_coord)?,
    };
    println!("{}", result_rmsd);

    Ok(())
}
