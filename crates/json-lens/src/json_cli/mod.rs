//! Logic behind the command-line tools.
//!
//! - `json-diff`: structural diff of two documents
//! - `json-search`: search a document, listing matches and the paths to expand
//! - `json-tree`: print the visible rows of a document
//! - `json-edit`: apply edit operations to a document
//!
//! Each entry point takes JSON text and returns the text to print, so the
//! binaries only do I/O.

use std::collections::HashSet;

use json_lens_path::{resolve_pointer, to_display, Path, PathError};
use json_lens_util::JsonValue;
use serde_json::json;
use thiserror::Error;

use crate::diff::{diff_with_options, DiffOptions, DiffSummary};
use crate::edit::{apply_edit_checked, EditError, EditOp};
use crate::search::search;
use crate::tree::{flatten, FlatRow, FlattenOptions};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Edit(#[from] EditError),
    #[error("{0}")]
    Path(#[from] PathError),
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ── json-diff ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffArgs {
    pub left: String,
    pub right: String,
    pub key: Option<String>,
}

/// Parse `<left> <right> [--key FIELD]`.
pub fn parse_diff_args(args: &[String]) -> Result<DiffArgs, CliError> {
    let mut files = Vec::new();
    let mut key = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--key" {
            let field = iter
                .next()
                .ok_or_else(|| CliError::Usage("--key needs a field name.".to_string()))?;
            key = Some(field.clone());
        } else {
            files.push(arg.clone());
        }
    }
    match <[String; 2]>::try_from(files) {
        Ok([left, right]) => Ok(DiffArgs { left, right, key }),
        Err(_) => Err(CliError::Usage(
            "Usage: json-diff <left.json> <right.json> [--key FIELD]".to_string(),
        )),
    }
}

/// Diff two JSON documents and print `{summary, entries}`.
pub fn diff_documents(left: &str, right: &str, key: Option<&str>) -> Result<String, CliError> {
    let left = JsonValue::parse(left)?;
    let right = JsonValue::parse(right)?;
    let options = DiffOptions {
        array_match_key: key.map(str::to_string),
        ..DiffOptions::default()
    };
    let entries = diff_with_options(&left, &right, &options);
    let summary = DiffSummary::from_entries(&entries);
    let out = json!({
        "summary": serde_json::to_value(summary)?,
        "entries": serde_json::to_value(&entries)?,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

// ── json-search ───────────────────────────────────────────────────────────

/// Search `json` for `query`; paths are printed in display form.
pub fn search_document(json: &str, query: &str) -> Result<String, CliError> {
    let doc = JsonValue::parse(json)?;
    let result = search(&doc, query);
    let matches: Vec<String> = result.ordered_matches.iter().map(|p| to_display(p)).collect();
    let mut expand: Vec<&Path> = result.expand_ancestors.iter().collect();
    expand.sort();
    let expand: Vec<String> = expand.into_iter().map(|p| to_display(p)).collect();
    let out = json!({
        "orderedMatches": matches,
        "expandAncestors": expand,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

// ── json-tree ─────────────────────────────────────────────────────────────

/// Render the visible rows of `json` with the containers at `pointers` open.
///
/// Pointers that do not resolve are skipped with a warning.
pub fn tree_document(json: &str, pointers: &[String]) -> Result<String, CliError> {
    let doc = JsonValue::parse(json)?;
    let mut expanded: HashSet<Path> = HashSet::new();
    for pointer in pointers {
        match resolve_pointer(&doc, pointer)? {
            Some(path) => {
                expanded.insert(path);
            }
            None => tracing::warn!(pointer = %pointer, "pointer does not resolve, ignoring"),
        }
    }
    let rows = flatten(&doc, &expanded, &FlattenOptions::default());
    Ok(rows.iter().map(render_row).collect::<Vec<_>>().join("\n"))
}

fn render_row(row: &FlatRow) -> String {
    let indent = "  ".repeat(row.depth);
    let marker = match (row.is_expandable, row.is_expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    };
    match &row.key_name {
        Some(key) => format!("{indent}{marker}{key}: {}", row.preview),
        None => format!("{indent}{marker}{}", row.preview),
    }
}

// ── json-edit ─────────────────────────────────────────────────────────────

/// Apply one edit operation or an array of them, in order.
pub fn edit_document(json: &str, ops: &str) -> Result<String, CliError> {
    let mut doc = JsonValue::parse(json)?;
    let ops: Vec<EditOp> = match serde_json::from_str::<serde_json::Value>(ops)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };
    for op in &ops {
        doc = apply_edit_checked(&doc, op)?;
    }
    tracing::debug!(ops = ops.len(), "edits applied");
    Ok(serde_json::to_string_pretty(&doc)?)
}
