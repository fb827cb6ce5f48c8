//! `json-search`: find values and keys containing a query.
//!
//! Usage:
//!   json-search '<query>'
//!
//! The document is read from stdin.

use json_lens::json_cli::{init_logging, search_document};
use std::io::{self, Read, Write};

fn main() {
    init_logging();
    let query = match std::env::args().nth(1) {
        Some(q) => q,
        None => {
            eprintln!("First argument must be a search query.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match search_document(buf.trim(), &query) {
        Ok(result) => {
            if writeln!(io::stdout(), "{result}").is_err() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
