//! Cell resolution.
//!
//! Each column picks exactly one cell strategy per row. The first matching
//! rule wins:
//!
//! 1. `Checkbox` - selection toggle, ignores any renderer
//! 2. `Expand` - expansion toggle
//! 3. `Actions` - the row's permitted actions
//! 4. a column renderer
//! 5. `Date` - date line and time line
//! 6. `Status` - status badge
//! 7. `Select` - multi-select editor
//! 8. `Custom` - the injected custom renderer
//! 9. `Comment` - comment trigger, only for object values
//! 10. anything else - the value as text

use std::fmt;
use std::sync::Arc;

use escrow_lib::labels::{FallbackLabels, LabelProvider};
use escrow_lib::model::{Record, Value};
use escrow_lib::permissions::{AllowAll, PermissionCheck};

use super::{
    ActionSpec, ColumnDescriptor, ColumnKind, RowAction, RowHandlers, StatusBadge, StatusStyles,
    Tone,
};

// =============================================================================
// Content
// =============================================================================

/// A framework-agnostic presentational tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Styled { text: String, tone: Tone },
    /// Children laid out horizontally.
    Row(Vec<Node>),
    /// Children stacked vertically.
    Column(Vec<Node>),
}

impl Node {
    /// Flattens the tree to text: rows joined by spaces, columns by newlines.
    pub fn to_text(&self) -> String {
        match self {
            Node::Text(text) | Node::Styled { text, .. } => text.clone(),
            Node::Row(children) => join(children, " "),
            Node::Column(children) => join(children, "\n"),
        }
    }
}

fn join(children: &[Node], separator: &str) -> String {
    children
        .iter()
        .map(Node::to_text)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Output of a cell renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Node(Node),
}

impl CellContent {
    /// The text, if this is plain text.
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            CellContent::Text(text) => Some(text),
            CellContent::Node(_) => None,
        }
    }

    /// Flattens to text.
    pub fn to_text(&self) -> String {
        match self {
            CellContent::Text(text) => text.clone(),
            CellContent::Node(node) => node.to_text(),
        }
    }
}

/// A resolved cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Selection { checked: bool },
    Expansion { expanded: bool },
    Actions(Vec<RowAction>),
    /// Renderer output in a single-line truncating container. `title` is
    /// set only for plain text.
    Rendered {
        content: CellContent,
        title: Option<String>,
    },
    Date { date: String, time: Option<String> },
    Status(StatusBadge),
    MultiSelect {
        selected: Vec<String>,
        options: Vec<String>,
    },
    Custom(CellContent),
    CommentTrigger,
    Text { text: String, title: String },
}

impl Cell {
    /// Single-line text for plain-text grids.
    pub fn to_plain_text(&self) -> String {
        match self {
            Cell::Selection { checked } => (if *checked { "[x]" } else { "[ ]" }).to_string(),
            Cell::Expansion { expanded } => (if *expanded { "▾" } else { "▸" }).to_string(),
            Cell::Actions(actions) => actions
                .iter()
                .map(|action| action.name())
                .collect::<Vec<_>>()
                .join("|"),
            Cell::Rendered { content, .. } | Cell::Custom(content) => {
                content.to_text().replace('\n', " ")
            }
            Cell::Date { date, time } => match time {
                Some(time) => format!("{} {}", date, time),
                None => date.clone(),
            },
            Cell::Status(badge) => badge.label.clone(),
            Cell::MultiSelect { selected, .. } => selected.join(", "),
            Cell::CommentTrigger => "[comment]".to_string(),
            Cell::Text { text, .. } => text.clone(),
        }
    }
}

// =============================================================================
// Context
// =============================================================================

/// Renders `Custom` column cells.
pub trait CustomCellRenderer: Send + Sync {
    fn render(&self, column_key: &str, value: &Value, row: &Record, index: usize) -> CellContent;
}

impl<F> CustomCellRenderer for F
where
    F: Fn(&str, &Value, &Record, usize) -> CellContent + Send + Sync,
{
    fn render(&self, column_key: &str, value: &Value, row: &Record, index: usize) -> CellContent {
        self(column_key, value, row, index)
    }
}

/// Collaborators injected into cell and header resolution.
#[derive(Clone)]
pub struct GridContext {
    pub labels: Arc<dyn LabelProvider>,
    pub permissions: Arc<dyn PermissionCheck>,
    pub language: String,
    pub handlers: RowHandlers,
    pub actions: Vec<ActionSpec>,
    pub statuses: StatusStyles,
    pub custom: Option<Arc<dyn CustomCellRenderer>>,
}

impl Default for GridContext {
    fn default() -> Self {
        Self {
            labels: Arc::new(FallbackLabels),
            permissions: Arc::new(AllowAll),
            language: "en".to_string(),
            handlers: RowHandlers::default(),
            actions: RowAction::ALL.into_iter().map(ActionSpec::new).collect(),
            statuses: StatusStyles::default(),
            custom: None,
        }
    }
}

impl GridContext {
    /// Creates a context with fallback labels, every permission granted and
    /// no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(mut self, labels: Arc<dyn LabelProvider>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionCheck>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_handlers(mut self, handlers: RowHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Replaces the action gating rules.
    pub fn with_actions(mut self, actions: Vec<ActionSpec>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_statuses(mut self, statuses: StatusStyles) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_custom(mut self, custom: impl CustomCellRenderer + 'static) -> Self {
        self.custom = Some(Arc::new(custom));
        self
    }

    /// Actions offered on `row`: handled by the host and allowed by its gating rules.
    pub fn row_actions(&self, row: &Record) -> Vec<RowAction> {
        self.actions
            .iter()
            .filter(|spec| self.handlers.handles(spec.action))
            .filter(|spec| spec.allows(row, self.permissions.as_ref()))
            .map(|spec| spec.action)
            .collect()
    }
}

impl fmt::Debug for GridContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridContext")
            .field("language", &self.language)
            .field("handlers", &self.handlers)
            .field("actions", &self.actions)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Per-row state a cell may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowState {
    /// Position on the current page.
    pub index: usize,
    pub selected: bool,
    pub expanded: bool,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the cell of `column` for `row`.
pub fn resolve_cell(
    column: &ColumnDescriptor,
    row: &Record,
    state: RowState,
    cx: &GridContext,
) -> Cell {
    let value = row.value(&column.key);

    match column.kind {
        ColumnKind::Checkbox => {
            return Cell::Selection {
                checked: state.selected,
            };
        }
        ColumnKind::Expand => {
            return Cell::Expansion {
                expanded: state.expanded,
            };
        }
        ColumnKind::Actions => return Cell::Actions(cx.row_actions(row)),
        _ => {}
    }

    if let Some(render) = &column.render {
        let content = render(value, row);
        let title = content.plain_text().map(str::to_string);
        return Cell::Rendered { content, title };
    }

    match column.kind {
        ColumnKind::Date => split_date(&value.search_text()),
        ColumnKind::Status => Cell::Status(cx.statuses.badge(&value.search_text())),
        ColumnKind::Select => Cell::MultiSelect {
            selected: selected_options(value),
            options: column.options.clone(),
        },
        ColumnKind::Custom => match &cx.custom {
            Some(custom) => Cell::Custom(custom.render(&column.key, value, row, state.index)),
            None => text_cell(value),
        },
        ColumnKind::Comment if value.is_object() => Cell::CommentTrigger,
        _ => text_cell(value),
    }
}

fn text_cell(value: &Value) -> Cell {
    let text = value.search_text().into_owned();
    Cell::Text {
        title: text.clone(),
        text,
    }
}

/// Splits a pre-formatted date-time at the first space or `T`.
///
/// No timezone conversion happens here.
pub fn split_date(text: &str) -> Cell {
    match text.trim().split_once([' ', 'T']) {
        Some((date, time)) if !time.trim().is_empty() => Cell::Date {
            date: date.to_string(),
            time: Some(time.trim().to_string()),
        },
        Some((date, _)) => Cell::Date {
            date: date.to_string(),
            time: None,
        },
        None => Cell::Date {
            date: text.trim().to_string(),
            time: None,
        },
    }
}

fn selected_options(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::List(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| item.search_text().into_owned())
            .collect(),
        other => other
            .search_text()
            .split(',')
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
