//! `json-tree`: print a document as an indented tree.
//!
//! Usage:
//!   json-tree ['<pointer>' ...]
//!
//! The document is read from stdin. Each argument is a JSON Pointer to a
//! container to show expanded; the root is always expanded.

use json_lens::json_cli::{init_logging, tree_document};
use std::io::{self, Read, Write};

fn main() {
    init_logging();
    let pointers: Vec<String> = std::env::args().skip(1).collect();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match tree_document(buf.trim(), &pointers) {
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
