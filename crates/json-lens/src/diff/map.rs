use std::collections::{HashMap, HashSet};

use json_lens_path::{ancestors, Path, PathSegment};

use super::{DiffEntry, DiffKind, Side};

/// Path-indexed view over a diff result.
///
/// When several entries land on the same path the last one wins. Every
/// strict ancestor of an entry is recorded so nested-change lookups are a
/// single hash probe.
#[derive(Debug, Clone, Default)]
pub struct DiffMap {
    entries: HashMap<Path, DiffEntry>,
    nested: HashSet<Path>,
}

impl DiffMap {
    pub fn build(entries: &[DiffEntry]) -> Self {
        Self::build_filtered(entries, |_| true)
    }

    /// Like [`DiffMap::build`] but drops move markers belonging to the other
    /// pane, so a swap shows the correct arrow on each side.
    pub fn build_for_side(entries: &[DiffEntry], side: Side) -> Self {
        Self::build_filtered(entries, |entry| entry.side().map_or(true, |s| s == side))
    }

    fn build_filtered(entries: &[DiffEntry], keep: impl Fn(&DiffEntry) -> bool) -> Self {
        let mut map = Self::default();
        for entry in entries {
            if !keep(entry) {
                continue;
            }
            for ancestor in ancestors(entry.path()) {
                map.nested.insert(ancestor);
            }
            map.entries.insert(entry.path().clone(), entry.clone());
        }
        map
    }

    pub fn get(&self, path: &[PathSegment]) -> Option<&DiffEntry> {
        self.entries.get(path)
    }

    /// True if `path` carries an entry or is an ancestor of one.
    pub fn path_has_diff(&self, path: &[PathSegment]) -> bool {
        self.entries.contains_key(path) || self.nested.contains(path)
    }

    /// True if some strict descendant of `path` carries an entry.
    pub fn has_nested_diff(&self, path: &[PathSegment]) -> bool {
        self.nested.contains(path)
    }

    pub fn diff_type_at(&self, path: &[PathSegment]) -> Option<DiffKind> {
        self.get(path).map(DiffEntry::kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &DiffEntry)> {
        self.entries.iter()
    }
}

pub fn build_diff_map(entries: &[DiffEntry]) -> DiffMap {
    DiffMap::build(entries)
}
