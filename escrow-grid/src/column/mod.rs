//! Column descriptors and cell resolution.

mod actions;
mod cell;
mod header;
mod status;

pub use actions::*;
pub use cell::*;
pub use header::*;
pub use status::*;

use std::fmt;
use std::sync::Arc;

use escrow_lib::model::{Record, Value};

/// How a column's cells behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    Status,
    Date,
    Actions,
    Select,
    Checkbox,
    Expand,
    Custom,
    Comment,
    User,
}

/// Renders a cell from its value and row.
pub type CellRenderer = Arc<dyn Fn(&Value, &Record) -> CellContent + Send + Sync>;

/// Typed metadata describing one column.
///
/// # Example
///
/// ```
/// use escrow_grid::column::{CellContent, ColumnDescriptor, ColumnKind};
///
/// let columns = vec![
///     ColumnDescriptor::new("select", "", ColumnKind::Checkbox).width(4),
///     ColumnDescriptor::new("name", "Name", ColumnKind::Text).sortable(),
///     ColumnDescriptor::new("amount", "Amount", ColumnKind::Text)
///         .sortable()
///         .render(|value, _row| CellContent::Text(format!("{} EUR", value.search_text()))),
///     ColumnDescriptor::new("status", "Status", ColumnKind::Status).label_id("tx.status"),
/// ];
/// assert!(columns[1].sortable);
/// ```
#[derive(Clone)]
pub struct ColumnDescriptor {
    /// Row field this column reads.
    pub key: String,
    /// Header text used when no translation is found.
    pub label: String,
    /// Label configuration id for the label provider.
    pub label_id: Option<String>,
    /// Cell behavior.
    pub kind: ColumnKind,
    /// Width in characters.
    pub width: Option<u16>,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Choices offered by `Select` columns.
    pub options: Vec<String>,
    /// Custom cell renderer.
    pub render: Option<CellRenderer>,
}

impl ColumnDescriptor {
    /// Create a new column.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            label_id: None,
            kind,
            width: None,
            sortable: false,
            options: Vec::new(),
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Resolve the header through the label provider with this id.
    pub fn label_id(mut self, id: impl Into<String>) -> Self {
        self.label_id = Some(id.into());
        self
    }

    /// Set the choices of a `Select` column.
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Render cells with `render`.
    pub fn render(
        mut self,
        render: impl Fn(&Value, &Record) -> CellContent + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("label_id", &self.label_id)
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("options", &self.options)
            .field("render", &self.render.is_some())
            .finish()
    }
}
