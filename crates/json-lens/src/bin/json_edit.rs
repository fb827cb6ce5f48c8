//! `json-edit`: apply edit operations to a document.
//!
//! Usage:
//!   json-edit '<ops>'
//!
//! The document is read from stdin. `<ops>` is one operation or an array of
//! them, e.g. `{"op":"set","path":["a",0],"value":true}`. Operations that do
//! not fit the document are reported instead of skipped.

use json_lens::json_cli::{edit_document, init_logging};
use std::io::{self, Read, Write};

fn main() {
    init_logging();
    let ops = match std::env::args().nth(1) {
        Some(o) => o,
        None => {
            eprintln!("First argument must be a JSON edit operation or array of operations.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match edit_document(buf.trim(), &ops) {
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
