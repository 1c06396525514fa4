//! Structure file readers and writers.

pub mod pdb;
pub mod xyz;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::RmsdError;
use crate::structure::Structure;

/// Supported structure file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFileFormat {
    Xyz,
    Pdb,
}

impl StructureFileFormat {
    /// Parse a format name like `xyz`, `pdb`, `xyz.gz` or `pdbgz`.
    pub fn from_name(name: &str) -> Result<Self, RmsdError> {
        match name.to_ascii_lowercase().as_str() {
            "xyz" | "xyzgz" | "xyz.gz" => Ok(StructureFileFormat::Xyz),
            "pdb" | "pdbgz" | "pdb.gz" => Ok(StructureFileFormat::Pdb),
            _ => Err(RmsdError::Parse(format!(
                "could not recognize file format: {}",
                name
            ))),
        }
    }

    /// Detect the format from a file name, treating `.gz` as a wrapper
    /// around the preceding extension.
    pub fn from_path(path: &str) -> Result<Self, RmsdError> {
        let parts: Vec<&str> = path.split('.').collect();
        let suffix = parts.last().copied().unwrap_or("");
        if suffix != "gz" {
            return Self::from_name(suffix);
        }
        if parts.len() >= 3 {
            return Self::from_name(&format!("{}.gz", parts[parts.len() - 2]));
        }
        Self::from_name(suffix)
    }
}

/// Open a structure file as a buffered reader, transparently decompressing
/// gzip input.
pub fn open_reader(path: &str) -> Result<Box<dyn BufRead>, RmsdError> {
    let file = File::open(Path::new(path))
        .map_err(|e| RmsdError::Parse(format!("{}: {}", path, e)))?;
    let reader: Box<dyn Read> = if path.ends_with(".gz") {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

/// Read a structure from `path` in the given format.
pub fn read_structure(path: &str, format: StructureFileFormat) -> Result<Structure, RmsdError> {
    let reader = open_reader(path)?;
    match format {
        StructureFileFormat::Xyz => xyz::read_xyz(reader),
        StructureFileFormat::Pdb => pdb::read_pdb(reader),
    }
}
