//! `json-diff`: structural diff of two JSON files.
//!
//! Usage:
//!   json-diff <left.json> <right.json> [--key FIELD]
//!
//! `--key` names the field used to match array elements. Set `RUST_LOG=debug`
//! to see which matching strategy each array used.

use json_lens::json_cli::{diff_documents, init_logging, parse_diff_args, CliError};
use std::io::{self, Write};

fn run() -> Result<String, CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_diff_args(&args)?;
    let left = std::fs::read_to_string(&args.left)?;
    let right = std::fs::read_to_string(&args.right)?;
    diff_documents(&left, &right, args.key.as_deref())
}

fn main() {
    init_logging();
    match run() {
        Ok(out) => {
            let mut stdout = io::stdout();
            if writeln!(stdout, "{out}").is_err() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
