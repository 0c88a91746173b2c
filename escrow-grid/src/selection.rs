//! Row selection keyed by stable row ids.
//!
//! Selection and expansion are tracked by [`RowId`] rather than by position,
//! so re-sorting, re-filtering or paging never moves a selection onto a
//! different row. Positions are only used at the render boundary.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use escrow_lib::model::Record;

/// Stable identity of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id from its text.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Names the field that holds a row's stable id.
///
/// Rows where the field is missing or null fall back to
/// `#<generation>:<position>`, their place in one particular source
/// collection. Replacing the source bumps the generation, so a fallback id
/// never matches a row of a later source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowKey {
    field: String,
}

impl RowKey {
    /// Uses `field` as the row id.
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Returns the id field name.
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Computes the id of `record`, found at `position` in source
    /// `generation`.
    pub fn id_for(&self, record: &Record, generation: u64, position: usize) -> RowId {
        match record.get(&self.field) {
            Some(value) if !value.is_null() => RowId(value.search_text().into_owned()),
            _ => RowId(format!("#{}:{}", generation, position)),
        }
    }
}

impl Default for RowKey {
    fn default() -> Self {
        Self::field("id")
    }
}

/// A set of selected row keys.
///
/// The engine replaces it wholesale from page positions and prunes it when
/// the source rows change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Clone + Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection wholesale.
    pub fn replace(&mut self, keys: impl IntoIterator<Item = K>) {
        self.selected.clear();
        self.selected.extend(keys);
    }

    /// Keep only keys accepted by `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&K) -> bool) {
        self.selected.retain(keep);
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Toggles `index` in a list of visible indices.
///
/// The engine only accepts wholesale replacement; this builds a toggle on top
/// of it. The result is sorted.
pub fn xor_index(current: &[usize], index: usize) -> Vec<usize> {
    let mut next: Vec<usize> = current.iter().copied().filter(|&i| i != index).collect();
    if next.len() == current.len() {
        next.push(index);
    }
    next.sort_unstable();
    next.dedup();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_index_adds_and_removes() {
        assert_eq!(xor_index(&[0, 2], 1), vec![0, 1, 2]);
        assert_eq!(xor_index(&[0, 1, 2], 1), vec![0, 2]);
        assert_eq!(xor_index(&[], 3), vec![3]);
    }

    #[test]
    fn test_replace_drops_previous_keys() {
        let mut selection = Selection::new();
        selection.replace(["a", "b"]);
        selection.replace(["c"]);
        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected(&"c"));
        assert!(!selection.is_selected(&"a"));
    }

    #[test]
    fn test_row_key_falls_back_to_position() {
        let key = RowKey::field("id");
        let with_id = Record::new().set("id", 42i64);
        let without_id = Record::new().set("name", "Acme");

        assert_eq!(key.id_for(&with_id, 1, 7), RowId::new("42"));
        assert_eq!(key.id_for(&with_id, 2, 7), RowId::new("42"));
        assert_eq!(key.id_for(&without_id, 1, 7), RowId::new("#1:7"));
        assert_ne!(key.id_for(&without_id, 2, 7), key.id_for(&without_id, 1, 7));
    }
}
