//! Label lookup
//!
//! Column headers are resolved through a [`LabelProvider`] keyed by a
//! configuration id and a language, falling back to the text the page
//! declared when no translation is known.

use dashmap::DashMap;

/// Resolves display labels.
pub trait LabelProvider: Send + Sync {
    /// Returns the label for `config_id` in `language`, or `fallback`.
    fn label(&self, config_id: &str, language: &str, fallback: &str) -> String;
}

/// A provider that always returns the fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackLabels;

impl LabelProvider for FallbackLabels {
    fn label(&self, _config_id: &str, _language: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

/// A label table keyed by `(config_id, language)`.
///
/// Backed by a concurrent map so one table can be shared between pages and
/// refreshed while they hold it.
///
/// # Example
///
/// ```
/// use escrow_lib::labels::{LabelProvider, StaticLabels};
///
/// let labels = StaticLabels::new().with("tx.amount", "en", "Amount");
/// assert_eq!(labels.label("tx.amount", "en", "amount"), "Amount");
/// assert_eq!(labels.label("tx.amount", "fr", "amount"), "amount");
/// ```
#[derive(Debug, Default)]
pub struct StaticLabels {
    entries: DashMap<(String, String), String>,
}

impl StaticLabels {
    /// Creates an empty label table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label (builder pattern).
    pub fn with(
        self,
        config_id: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(config_id, language, text);
        self
    }

    /// Adds or replaces a label.
    pub fn insert(
        &self,
        config_id: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .insert((config_id.into(), language.into()), text.into());
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no labels are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LabelProvider for StaticLabels {
    fn label(&self, config_id: &str, language: &str, fallback: &str) -> String {
        self.entries
            .get(&(config_id.to_string(), language.to_string()))
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}
