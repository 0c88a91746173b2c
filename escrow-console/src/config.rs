//! Console configuration
//!
//! Read from `console.json` in the config directory, or from the path given
//! with `--config`. Every field is optional.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use escrow_grid::column::{ColumnDescriptor, ColumnKind};
use escrow_grid::engine::DEFAULT_ROWS_PER_PAGE;
use escrow_lib::labels::StaticLabels;
use escrow_lib::permissions::{AllowAll, PermissionCheck, PermissionSet};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Console settings.
///
/// # Example
///
/// ```ignore
/// let config = ConsoleConfig::default()
///     .with_rows_per_page(50)
///     .with_id_field("reference");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Rows per server page.
    ///
    /// Default: 20
    pub rows_per_page: usize,

    /// Language passed to the label provider.
    ///
    /// Default: "en"
    pub language: String,

    /// Log level name (`error` to `trace`).
    ///
    /// Default: "info"
    pub log_level: String,

    /// Permissions held by the console user. Empty grants everything.
    pub permissions: Vec<String>,

    /// Header translations for the configured language, by label id.
    pub labels: HashMap<String, String>,

    /// Row fields searched by `search`. Empty searches every column.
    pub search_fields: Vec<String>,

    /// Field holding the row id.
    ///
    /// Default: "id"
    pub id_field: String,

    /// Columns to show. Empty derives them from the first row.
    pub columns: Vec<ColumnConfig>,
}

/// One configured column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub label_id: Option<String>,
    /// `text`, `status`, `date`, `actions`, `select`, `checkbox`, `expand`,
    /// `custom`, `comment` or `user`.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_kind() -> String {
    "text".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            language: "en".to_string(),
            log_level: "info".to_string(),
            permissions: Vec::new(),
            labels: HashMap::new(),
            search_fields: Vec::new(),
            id_field: "id".to_string(),
            columns: Vec::new(),
        }
    }
}

impl ConsoleConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, ConsoleError> {
        serde_json::from_str(json).map_err(|source| ConsoleError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, or the default config file if it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConsoleError> {
        if let Some(path) = path {
            let json = std::fs::read_to_string(path)?;
            return Self::from_json(&json, path);
        }

        match crate::paths::config_file() {
            Some(path) if path.exists() => {
                debug!("Reading config from {}", path.display());
                let json = std::fs::read_to_string(&path)?;
                Self::from_json(&json, &path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    pub fn with_search_fields(mut self, fields: Vec<String>) -> Self {
        self.search_fields = fields;
        self
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Parsed log level, `Info` if the name is not recognised.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Permission check for the configured permissions.
    pub fn permission_check(&self) -> Arc<dyn PermissionCheck> {
        if self.permissions.is_empty() {
            Arc::new(AllowAll)
        } else {
            Arc::new(self.permissions.iter().cloned().collect::<PermissionSet>())
        }
    }

    /// Label provider holding the configured translations.
    pub fn label_provider(&self) -> StaticLabels {
        let labels = StaticLabels::new();
        for (id, text) in &self.labels {
            labels.insert(id.as_str(), self.language.as_str(), text.as_str());
        }
        labels
    }

    /// Column descriptors for the configured columns.
    pub fn column_descriptors(&self) -> Result<Vec<ColumnDescriptor>, ConsoleError> {
        self.columns.iter().map(ColumnConfig::descriptor).collect()
    }
}

impl ColumnConfig {
    /// Builds the descriptor for this column.
    pub fn descriptor(&self) -> Result<ColumnDescriptor, ConsoleError> {
        let kind = column_kind(&self.kind)?;
        let label = self.label.clone().unwrap_or_else(|| self.key.clone());

        let mut column =
            ColumnDescriptor::new(&self.key, label, kind).options(self.options.iter().cloned());
        if self.sortable {
            column = column.sortable();
        }
        if let Some(width) = self.width {
            column = column.width(width);
        }
        if let Some(id) = &self.label_id {
            column = column.label_id(id);
        }
        Ok(column)
    }
}

/// Maps a column kind name to its [`ColumnKind`].
pub fn column_kind(name: &str) -> Result<ColumnKind, ConsoleError> {
    let kind = match name.to_ascii_lowercase().as_str() {
        "text" => ColumnKind::Text,
        "status" => ColumnKind::Status,
        "date" => ColumnKind::Date,
        "actions" => ColumnKind::Actions,
        "select" => ColumnKind::Select,
        "checkbox" => ColumnKind::Checkbox,
        "expand" => ColumnKind::Expand,
        "custom" => ColumnKind::Custom,
        "comment" => ColumnKind::Comment,
        "user" => ColumnKind::User,
        _ => return Err(ConsoleError::UnknownColumnKind(name.to_string())),
    };
    Ok(kind)
}
