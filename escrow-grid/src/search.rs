//! Per-field search state and row matching.

use escrow_lib::model::Record;

/// Current query text for each declared search field.
///
/// Every declared field has an entry, empty when unused, in declaration
/// order. Fields that were not declared are never added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    entries: Vec<(String, String)>,
}

impl SearchState {
    /// Creates an empty query for each field. Duplicate names are ignored.
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for field in fields {
            let field = field.into();
            if !entries.iter().any(|(name, _)| *name == field) {
                entries.push((field, String::new()));
            }
        }
        Self { entries }
    }

    /// Returns the query for a field, if the field is declared.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, query)| query.as_str())
    }

    /// Sets the query for a declared field. Returns `false` for unknown fields.
    pub fn set(&mut self, field: &str, query: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, current)) => {
                *current = query.into();
                true
            }
            None => false,
        }
    }

    /// Empties every query.
    pub fn clear(&mut self) {
        for (_, query) in &mut self.entries {
            query.clear();
        }
    }

    /// Iterates `(field, query)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, query)| (field.as_str(), query.as_str()))
    }

    /// Declared field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    /// Returns `true` if every query is the empty string.
    ///
    /// This is the filter's fast-path test; whitespace-only queries still
    /// filter.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, query)| query.is_empty())
    }

    /// Returns `true` if any query has non-whitespace content.
    pub fn has_active_search(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, query)| !query.trim().is_empty())
    }

    /// Compiles the non-empty queries for matching.
    pub fn matcher(&self) -> SearchMatcher {
        SearchMatcher {
            terms: self
                .entries
                .iter()
                .filter(|(_, query)| !query.is_empty())
                .map(|(field, query)| (field.clone(), query.to_lowercase()))
                .collect(),
        }
    }
}

/// Lower-cased queries ready to test rows against.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    terms: Vec<(String, String)>,
}

impl SearchMatcher {
    /// Returns `true` if every query is a case-insensitive substring of its
    /// field. Missing and null fields compare as the empty string.
    pub fn matches(&self, record: &Record) -> bool {
        self.terms.iter().all(|(field, query)| {
            record
                .value(field)
                .search_text()
                .to_lowercase()
                .contains(query.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_an_entry() {
        let search = SearchState::new(["name", "status", "name"]);
        let pairs: Vec<_> = search.iter().collect();
        assert_eq!(pairs, vec![("name", ""), ("status", "")]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut search = SearchState::new(["name"]);
        assert!(!search.set("iban", "DE"));
        assert_eq!(search.get("iban"), None);
        assert_eq!(search.fields().count(), 1);
    }

    #[test]
    fn test_whitespace_query_is_not_active() {
        let mut search = SearchState::new(["name"]);
        search.set("name", "   ");
        assert!(!search.is_empty());
        assert!(!search.has_active_search());
    }
}
