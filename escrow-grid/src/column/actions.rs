//! Row actions and grid interaction events.

use std::fmt;
use std::sync::Arc;

use escrow_lib::model::{Record, Value};
use escrow_lib::permissions::PermissionCheck;

/// An action offered in a row's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Gallery,
    Transact,
}

impl RowAction {
    /// Every action, in menu order.
    pub const ALL: [RowAction; 5] = [
        RowAction::View,
        RowAction::Edit,
        RowAction::Delete,
        RowAction::Gallery,
        RowAction::Transact,
    ];

    /// Short name for text rendering and logs.
    pub fn name(self) -> &'static str {
        match self {
            RowAction::View => "view",
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
            RowAction::Gallery => "gallery",
            RowAction::Transact => "transact",
        }
    }
}

/// Decides whether a row may show an action.
pub type RowPredicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Gating rules for one action.
#[derive(Clone)]
pub struct ActionSpec {
    pub action: RowAction,
    /// Permission the user must hold.
    pub permission: Option<String>,
    /// Row-level availability check.
    pub available: Option<RowPredicate>,
}

impl ActionSpec {
    /// An action with no extra gating.
    pub fn new(action: RowAction) -> Self {
        Self {
            action,
            permission: None,
            available: None,
        }
    }

    /// Require a permission.
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Only offer the action on rows accepted by `available`.
    pub fn when(mut self, available: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        self.available = Some(Arc::new(available));
        self
    }

    /// Returns `true` if the permission and the row check both pass.
    pub fn allows(&self, row: &Record, permissions: &dyn PermissionCheck) -> bool {
        let permitted = self
            .permission
            .as_deref()
            .is_none_or(|permission| permissions.has_permission(permission));
        let available = self.available.as_ref().is_none_or(|check| check(row));
        permitted && available
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("action", &self.action)
            .field("permission", &self.permission)
            .field("available", &self.available.is_some())
            .finish()
    }
}

/// Callback for a row action: `(row, page index)`.
pub type RowCallback = Arc<dyn Fn(&Record, usize) + Send + Sync>;

/// Callback for an edited cell: `(page index, column key, new value)`.
pub type DataChangeCallback = Arc<dyn Fn(usize, &str, &Value) + Send + Sync>;

/// Host callbacks for row interactions.
///
/// An action with no callback is never offered.
#[derive(Clone, Default)]
pub struct RowHandlers {
    pub on_row_view: Option<RowCallback>,
    pub on_row_edit: Option<RowCallback>,
    pub on_row_delete: Option<RowCallback>,
    pub on_row_gallery: Option<RowCallback>,
    pub on_row_transact: Option<RowCallback>,
    pub on_data_change: Option<DataChangeCallback>,
}

impl RowHandlers {
    /// Creates handlers with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the callback for `action`.
    pub fn on(
        mut self,
        action: RowAction,
        callback: impl Fn(&Record, usize) + Send + Sync + 'static,
    ) -> Self {
        let callback: RowCallback = Arc::new(callback);
        *self.slot_mut(action) = Some(callback);
        self
    }

    /// Registers the cell edit callback.
    pub fn on_data_change(
        mut self,
        callback: impl Fn(usize, &str, &Value) + Send + Sync + 'static,
    ) -> Self {
        self.on_data_change = Some(Arc::new(callback));
        self
    }

    fn slot(&self, action: RowAction) -> &Option<RowCallback> {
        match action {
            RowAction::View => &self.on_row_view,
            RowAction::Edit => &self.on_row_edit,
            RowAction::Delete => &self.on_row_delete,
            RowAction::Gallery => &self.on_row_gallery,
            RowAction::Transact => &self.on_row_transact,
        }
    }

    fn slot_mut(&mut self, action: RowAction) -> &mut Option<RowCallback> {
        match action {
            RowAction::View => &mut self.on_row_view,
            RowAction::Edit => &mut self.on_row_edit,
            RowAction::Delete => &mut self.on_row_delete,
            RowAction::Gallery => &mut self.on_row_gallery,
            RowAction::Transact => &mut self.on_row_transact,
        }
    }

    /// Returns `true` if `action` has a callback.
    pub fn handles(&self, action: RowAction) -> bool {
        self.slot(action).is_some()
    }

    /// Calls the callback for `action`. Returns `false` if there is none.
    pub fn invoke(&self, action: RowAction, row: &Record, index: usize) -> bool {
        match self.slot(action) {
            Some(callback) => {
                callback(row, index);
                true
            }
            None => false,
        }
    }

    /// Calls the cell edit callback. Returns `false` if there is none.
    pub fn data_changed(&self, index: usize, column_key: &str, value: &Value) -> bool {
        match &self.on_data_change {
            Some(callback) => {
                callback(index, column_key, value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for RowHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handled: Vec<_> = RowAction::ALL
            .into_iter()
            .filter(|action| self.handles(*action))
            .collect();
        f.debug_struct("RowHandlers")
            .field("actions", &handled)
            .field("on_data_change", &self.on_data_change.is_some())
            .finish()
    }
}

/// An interaction with a rendered grid. Indices are page positions.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Header click on a column.
    Sort(String),
    ToggleSelection(usize),
    ToggleExpansion(usize),
    Action(RowAction, usize),
    /// A `Select` cell changed.
    DataChange {
        index: usize,
        column_key: String,
        value: Value,
    },
}
