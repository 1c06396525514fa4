//! Command line interface for molrmsd.

// Arguments of the CLI app are defined here

pub mod workflows;

use crate::error::RmsdError;
use crate::utils::cli::parse_index_list;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP: &str = "\
usage: molrmsd [OPTIONS] FILE_A FILE_B

Calculate the root-mean-square deviation (RMSD) between structure A and B,
in XYZ or PDB format, using transformation and rotation.

rotation:
 -r, --rotation <METHOD>       Rotation method: kabsch (default), quaternion or none

reorder:
 -e, --reorder                 Align the atoms of the molecules (default method: hungarian)
 --reorder-method <METHOD>     Reorder method: hungarian (default), inertia-hungarian, brute, distance
 --use-reflections             Scan axis swaps and reflections of structure B.
                               This will affect stereo-chemistry.
 --use-reflections-keep-stereo Scan axis swaps and reflections of structure B,
                               restricted to stereo-chemistry preserving transforms.

filter (mutually exclusive):
 -nh, --no-hydrogen            Ignore hydrogens when calculating RMSD
 --remove-idx <IDX,IDX,...>    Index list of atoms NOT to consider
 --add-idx <IDX,IDX,...>       Index list of atoms to consider

input/output:
 --format <FMT>                Format of input files: xyz or pdb [detected from extension]
 -p, --output                  Print structure B, centered and rotated unto
                               structure A's coordinates, in XYZ format

general options:
 -v, --version                 Print version
 -h, --help                    Print this help menu
";

pub enum AppArgs {
    Global {
        help: bool,
        version: bool,
    },
    Compare {
        structure_a: String,
        structure_b: String,
        rotation: String,
        reorder: bool,
        reorder_method: String,
        use_reflections: bool,
        use_reflections_keep_stereo: bool,
        no_hydrogen: bool,
        remove_idx: Vec<usize>,
        add_idx: Vec<usize>,
        format: Option<String>,
        output: bool,
    },
}

pub fn parse_args() -> Result<AppArgs, RmsdError> {
    parse_args_from(std::env::args_os().skip(1).collect())
}

pub fn parse_args_from(raw: Vec<std::ffi::OsString>) -> Result<AppArgs, RmsdError> {
    // pico-args only supports single-character short keys; fold the
    // historical "-nh" spelling into the long flag before parsing
    let mut nh_alias = false;
    let raw: Vec<std::ffi::OsString> = raw
        .into_iter()
        .filter(|a| {
            if a == "-nh" {
                nh_alias = true;
                false
            } else {
                true
            }
        })
        .collect();
    let mut args = pico_args::Arguments::from_vec(raw);

    if args.contains(["-h", "--help"]) {
        return Ok(AppArgs::Global {
            help: true,
            version: false,
        });
    }
    if args.contains(["-v", "--version"]) {
        return Ok(AppArgs::Global {
            help: false,
            version: true,
        });
    }

    let rotation: String = args
        .opt_value_from_str(["-r", "--rotation"])
        .map_err(|e| RmsdError::Parse(e.to_string()))?
        .unwrap_or_else(|| "kabsch".to_string());
    let reorder = args.contains(["-e", "--reorder"]);
    let reorder_method: String = args
        .opt_value_from_str("--reorder-method")
        .map_err(|e| RmsdError::Parse(e.to_string()))?
        .unwrap_or_else(|| "hungarian".to_string());
    let use_reflections = args.contains("--use-reflections");
    let use_reflections_keep_stereo = args.contains("--use-reflections-keep-stereo");
    let no_hydrogen = nh_alias || args.contains("--no-hydrogen");
    let remove_idx: Vec<usize> = args
        .opt_value_from_str::<_, String>("--remove-idx")
        .map_err(|e| RmsdError::Parse(e.to_string()))?
        .map(|s| parse_index_list(&s))
        .transpose()?
        .unwrap_or_default();
    let add_idx: Vec<usize> = args
        .opt_value_from_str::<_, String>("--add-idx")
        .map_err(|e| RmsdError::Parse(e.to_string()))?
        .map(|s| parse_index_list(&s))
        .transpose()?
        .unwrap_or_default();
    let format: Option<String> = args
        .opt_value_from_str("--format")
        .map_err(|e| RmsdError::Parse(e.to_string()))?;
    let output = args.contains(["-p", "--output"]);

    let free = args.finish();
    if free.len() != 2 {
        return Ok(AppArgs::Global {
            help: true,
            version: false,
        });
    }

    let filters_in_use =
        [no_hydrogen, !remove_idx.is_empty(), !add_idx.is_empty()];
    if filters_in_use.iter().filter(|&&f| f).count() > 1 {
        return Err(RmsdError::Parse(
            "--no-hydrogen, --remove-idx and --add-idx are mutually exclusive".to_string(),
        ));
    }

    Ok(AppArgs::Compare {
        structure_a: free[0].to_string_lossy().into_owned(),
        structure_b: free[1].to_string_lossy().into_owned(),
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
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn raw(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_no_hydrogen_spellings() {
        for flag in ["-nh", "--no-hydrogen"] {
            let parsed = parse_args_from(raw(&[flag, "a.xyz", "b.xyz"])).unwrap();
            match parsed {
                AppArgs::Compare { no_hydrogen, .. } => assert!(no_hydrogen, "{}", flag),
                AppArgs::Global { .. } => panic!("{}: expected compare args", flag),
            }
        }
    }

    #[test]
    fn test_plain_compare_args() {
        let parsed = parse_args_from(raw(&["a.xyz", "b.xyz"])).unwrap();
        match parsed {
            AppArgs::Compare {
                structure_a,
                structure_b,
                rotation,
                no_hydrogen,
                ..
            } => {
                assert_eq!(structure_a, "a.xyz");
                assert_eq!(structure_b, "b.xyz");
                assert_eq!(rotation, "kabsch");
                assert!(!no_hydrogen);
            }
            AppArgs::Global { .. } => panic!("expected compare args"),
        }
    }

    #[test]
    fn test_malformed_index_list_is_an_error() {
        let result = parse_args_from(raw(&["--remove-idx", "1,x,3", "a.xyz", "b.xyz"]));
        assert!(matches!(result, Err(RmsdError::Parse(_))));
    }

    #[test]
    fn test_exclusive_filters_rejected() {
        let result = parse_args_from(raw(&[
            "-nh",
            "--remove-idx",
            "0,1",
            "a.xyz",
            "b.xyz",
        ]));
        assert!(matches!(result, Err(RmsdError::Parse(_))));
    }
}
