// File: xyz.rs
// XYZ format reader and writer.

use std::io::BufRead;

use regex::Regex;

use crate::error::RmsdError;
use crate::structure::Structure;

/// Read an XYZ structure: atom count line, title line, then one
/// `element x y z` row per atom. Extra columns are ignored.
pub fn read_xyz<R: BufRead>(reader: R) -> Result<Structure, RmsdError> {
    let element_re = Regex::new(r"[a-zA-Z]+").unwrap();
    let number_re = Regex::new(r"[-]?\d+\.\d*(?:[Ee][-\+]\d+)?").unwrap();

    let mut lines = reader.lines();

    let n_atoms: usize = lines
        .next()
        .ok_or_else(|| RmsdError::Parse("empty .xyz file".to_string()))??
        .trim()
        .parse()
        .map_err(|_| {
            RmsdError::Parse("could not obtain the number of atoms in the .xyz file".to_string())
        })?;

    // title line
    lines.next();

    let mut atoms = Vec::with_capacity(n_atoms);
    let mut coords = Vec::with_capacity(n_atoms);

    for (lines_read, line) in lines.enumerate() {
        if lines_read == n_atoms {
            break;
        }
        let line = line?;

        let atom = element_re
            .find(&line)
            .ok_or_else(|| {
                RmsdError::Parse(format!(
                    "reading the .xyz file failed in line {}",
                    lines_read + 3
                ))
            })?
            .as_str()
            .to_ascii_uppercase();

        let numbers: Vec<f64> = number_re
            .find_iter(&line)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        if numbers.len() < 3 {
            return Err(RmsdError::Parse(format!(
                "reading the .xyz file failed in line {}",
                lines_read + 3
            )));
        }

        atoms.push(atom);
        coords.push([numbers[0], numbers[1], numbers[2]]);
    }

    if atoms.len() != n_atoms {
        return Err(RmsdError::Parse(format!(
            ".xyz file declares {} atoms but contains {}",
            n_atoms,
            atoms.len()
        )));
    }

    Ok(Structure::new(atoms, coords))
}

/// Format a structure as XYZ text with the given title, first letter of each
/// element upper-cased.
pub fn set_coordinates(atoms: &[String], coords: &[[f64; 3]], title: &str) -> String {
    let mut out = Vec::with_capacity(coords.len() + 2);
    out.push(format!("{}", coords.len()));
    out.push(title.to_string());

    for (atom, p) in atoms.iter().zip(coords.iter()) {
        let mut chars = atom.chars();
        let atom = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
        out.push(format!(
            "{:2} {:15.8} {:15.8} {:15.8}",
            atom, p[0], p[1], p[2]
        ));
    }

    out.join("\n")
}
