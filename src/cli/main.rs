// File: main.rs
// Binary entry point.

use molrmsd::cli::workflows::compare::compare;
use molrmsd::cli::{parse_args, AppArgs, HELP, VERSION};
use molrmsd::utils::log::{print_log_msg, FAIL};

fn main() {
    let parsed_args = parse_args().unwrap_or_else(|e| {
        print_log_msg(FAIL, &e.to_string());
        std::process::exit(1);
    });

    match parsed_args {
        AppArgs::Global { help, version } => {
            if version {
                println!("molrmsd {}", VERSION);
            } else if help {
                println!("{}", HELP);
            }
        }
        env @ AppArgs::Compare { .. } => {
            if let Err(e) = compare(env) {
                print_log_msg(FAIL, &e.to_string());
                std::process::exit(1);
            }
        }
    }
}
