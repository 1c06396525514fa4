// File: pdb.rs
// PDB format reader, first chain only.

use std::io::BufRead;

use crate::error::RmsdError;
use crate::structure::Structure;

/// Atom element from the atom-name token of an ATOM record.
///
/// The first character is used when it is a recognized element; names like
/// `1HD1` carry the element in the second character.
fn parse_atom_type(token: &str) -> Option<String> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if matches!(first, 'H' | 'C' | 'N' | 'O' | 'S' | 'P') {
        return Some(first.to_string());
    }
    let second = chars.next()?;
    if second == 'H' {
        return Some(second.to_string());
    }
    None
}

/// Read ATOM records up to the first TER/END.
///
/// The x, y and z coordinates are supposed to be in columns 31-38, 39-46 and
/// 47-54, but this is not always the case, so the first three consecutive
/// tokens containing a decimal point are used, with the fixed columns as a
/// fallback.
pub fn read_pdb<R: BufRead>(reader: R) -> Result<Structure, RmsdError> {
    let mut atoms = Vec::new();
    let mut coords = Vec::new();
    let mut x_column: Option<usize> = None;

    for line in reader.lines() {
        let line = line?;
        if line.starts_with("TER") || line.starts_with("END") {
            break;
        }
        if !line.starts_with("ATOM") {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();

        let atom = tokens
            .get(2)
            .and_then(|t| parse_atom_type(t))
            .ok_or_else(|| {
                RmsdError::Parse(format!("parsing atomtype for the following line: {}", line))
            })?;

        if x_column.is_none() {
            for i in 0..tokens.len().saturating_sub(2) {
                if tokens[i].contains('.') && tokens[i + 1].contains('.') && tokens[i + 2].contains('.')
                {
                    x_column = Some(i);
                    break;
                }
            }
            if x_column.is_none() {
                return Err(RmsdError::Parse(format!(
                    "parsing coordinates for the following line: {}",
                    line
                )));
            }
        }

        let col = x_column.unwrap();
        let parsed: Option<[f64; 3]> = (|| {
            let x = tokens.get(col)?.parse().ok()?;
            let y = tokens.get(col + 1)?.parse().ok()?;
            let z = tokens.get(col + 2)?.parse().ok()?;
            Some([x, y, z])
        })();

        let xyz = match parsed {
            Some(v) => v,
            None => {
                // fixed-column fallback
                let get = |a: usize, b: usize| -> Option<f64> {
                    line.get(a..b)?.trim().parse().ok()
                };
                match (get(30, 38), get(38, 46), get(46, 54)) {
                    (Some(x), Some(y), Some(z)) => [x, y, z],
                    _ => {
                        return Err(RmsdError::Parse(format!(
                            "parsing input for the following line: {}",
                            line
                        )))
                    }
                }
            }
        };

        atoms.push(atom);
        coords.push(xyz);
    }

    Ok(Structure::new(atoms, coords))
}
