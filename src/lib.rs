//! # About project
//!
//! molrmsd computes the minimal root-mean-square deviation (RMSD) between two
//! molecular structures in XYZ or PDB format, using rotation (Kabsch or
//! quaternion), atom reordering (distance, Hungarian, inertia-guided
//! Hungarian, brute-force) and reflection search.

pub mod alignment;
pub mod cli;
pub mod error;
pub mod geometry;
pub mod reorder;
pub mod structure;
pub mod utils;

pub mod prelude {
    pub use crate::alignment::kabsch::{
        kabsch, kabsch_fit, kabsch_rmsd, kabsch_rotate, kabsch_weighted, kabsch_weighted_fit,
        kabsch_weighted_rmsd,
    };
    pub use crate::alignment::quaternion::{quaternion_rmsd, quaternion_rotate};
    pub use crate::alignment::reflection::{check_reflections, ReflectionResult};
    pub use crate::alignment::{rmsd, RotationMethod};
    pub use crate::error::RmsdError;
    pub use crate::geometry::{centroid, get_principal_axis};
    pub use crate::reorder::ReorderMethod;
    pub use crate::structure::Structure;
}
