use std::collections::HashMap;

use json_lens_path::{Path, PathSegment};

use super::FlatRow;

/// Path to row position over one flatten pass, for scrolling a windowed list
/// to a node.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    rows: HashMap<Path, usize>,
}

impl PathIndex {
    pub fn build(rows: &[FlatRow]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.path.clone(), i))
            .collect();
        Self { rows }
    }

    pub fn row_of(&self, path: &[PathSegment]) -> Option<usize> {
        self.rows.get(path).copied()
    }

    /// Pixel offset of the row at `path` in a list of fixed-height rows.
    pub fn offset_of(&self, path: &[PathSegment], row_height: usize) -> Option<usize> {
        self.row_of(path).map(|row| row * row_height)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn build_path_index(rows: &[FlatRow]) -> PathIndex {
    PathIndex::build(rows)
}
