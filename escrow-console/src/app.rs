//! The interactive listing behind the console prompt.

use std::sync::{Arc, Mutex};

use escrow_grid::column::{
    ColumnDescriptor, ColumnKind, GridContext, GridEvent, RowAction, RowHandlers,
};
use escrow_grid::listing::ListingController;
use escrow_grid::PagerEvent;
use escrow_lib::error::FetchError;
use escrow_lib::model::{Record, Value};
use log::info;

use crate::command::{Command, HELP};
use crate::render::render_grid;

/// Messages produced by row callbacks, printed after the command.
type Outbox = Arc<Mutex<Vec<String>>>;

/// A listing driven by console commands.
pub struct Console {
    listing: ListingController,
    cx: GridContext,
    outbox: Outbox,
}

impl Console {
    /// Wraps `listing`, registering the console's row callbacks on `cx`.
    pub fn new(listing: ListingController, cx: GridContext) -> Self {
        let outbox = Outbox::default();

        let views = Arc::clone(&outbox);
        let edits = Arc::clone(&outbox);
        let handlers = RowHandlers::new()
            .on(RowAction::View, move |row, _index| {
                post(&views, row_json(row, true));
            })
            .on_data_change(move |index, key, value| {
                info!("Row {} field '{}' changed to {}", index + 1, key, value.search_text());
                post(&edits, format!("row {}: {} = {}", index + 1, key, value.search_text()));
            });

        Self {
            listing,
            cx: cx.with_handlers(handlers),
            outbox,
        }
    }

    pub fn listing(&self) -> &ListingController {
        &self.listing
    }

    /// Fetches the first page.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        self.listing.load().await
    }

    /// Runs a command and returns the text to print.
    pub async fn execute(&mut self, command: Command) -> Result<String, FetchError> {
        match command {
            Command::Show => Ok(self.show()),
            Command::Search { field, value } => {
                if self.listing.engine().search().get(&field).is_none() {
                    let fields: Vec<&str> = self.listing.engine().search().fields().collect();
                    return Ok(format!(
                        "'{}' is not searchable, try one of: {}",
                        field,
                        fields.join(", ")
                    ));
                }
                self.listing.handle(PagerEvent::Search { field, value }).await?;
                Ok(self.show())
            }
            Command::Clear => {
                let fields: Vec<String> = self
                    .listing
                    .engine()
                    .search()
                    .fields()
                    .map(str::to_string)
                    .collect();
                for field in fields {
                    self.listing.handle(PagerEvent::search(field, "")).await?;
                }
                Ok(self.show())
            }
            Command::Sort(key) => {
                if !self.listing.interact(GridEvent::Sort(key.clone()), &self.cx) {
                    return Ok(format!("'{}' is not a sortable column", key));
                }
                Ok(self.show())
            }
            Command::Page(target) => {
                self.listing.handle(PagerEvent::PageChange(target)).await?;
                Ok(self.show())
            }
            Command::Rows(rows_per_page) => {
                self.listing.handle(PagerEvent::RowsPerPage(rows_per_page)).await?;
                Ok(self.show())
            }
            Command::Select(index) => Ok(self.toggle(GridEvent::ToggleSelection(index), index)),
            Command::Expand(index) => Ok(self.toggle(GridEvent::ToggleExpansion(index), index)),
            Command::View(index) => {
                if !self.listing.interact(GridEvent::Action(RowAction::View, index), &self.cx) {
                    return Ok(no_row(index));
                }
                Ok(self.drain())
            }
            Command::Set { row, field, value } => {
                let event = GridEvent::DataChange {
                    index: row,
                    column_key: field,
                    value: parse_value(&value),
                };
                if !self.listing.interact(event, &self.cx) {
                    return Ok(no_row(row));
                }
                Ok(format!("{}\n{}", self.drain(), self.show()))
            }
            Command::Selected => Ok(self.selected()),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    /// Renders the current page.
    pub fn show(&self) -> String {
        let grid = self.listing.render(&self.cx);
        let view = self.listing.engine().view();
        render_grid(&grid, |index| {
            view.rows.get(index).map(|row| row_json(row.record, true))
        })
    }

    fn toggle(&mut self, event: GridEvent, index: usize) -> String {
        if index >= self.listing.engine().view().rows.len() {
            return no_row(index);
        }
        self.listing.interact(event, &self.cx);
        self.show()
    }

    fn selected(&self) -> String {
        let rows = self.listing.engine().selected_records();
        let mut out = format!("{} selected", rows.len());
        for row in rows {
            out.push('\n');
            out.push_str(&row_json(row, false));
        }
        out
    }

    fn drain(&self) -> String {
        match self.outbox.lock() {
            Ok(mut messages) => messages.drain(..).collect::<Vec<_>>().join("\n"),
            Err(_) => String::new(),
        }
    }
}

/// Default columns for a dataset with no configured columns.
///
/// One column per field of `sample`, in name order, between a selection
/// column and an action column.
pub fn infer_columns(sample: Option<&Record>) -> Vec<ColumnDescriptor> {
    let mut columns = vec![
        ColumnDescriptor::new("select", "", ColumnKind::Checkbox),
        ColumnDescriptor::new("expand", "", ColumnKind::Expand),
    ];

    if let Some(sample) = sample {
        let mut keys: Vec<&String> = sample.fields().keys().collect();
        keys.sort();
        for key in keys {
            let column = match sample.value(key) {
                Value::Record(_) => ColumnDescriptor::new(key, key, ColumnKind::Comment),
                Value::List(_) => ColumnDescriptor::new(key, key, ColumnKind::Select),
                _ if key.eq_ignore_ascii_case("status") => {
                    ColumnDescriptor::new(key, key, ColumnKind::Status).sortable()
                }
                _ => ColumnDescriptor::new(key, key, ColumnKind::Text).sortable(),
            };
            columns.push(column);
        }
    }

    columns.push(ColumnDescriptor::new("actions", "", ColumnKind::Actions));
    columns
}

/// Keys of the columns whose cells show searchable text.
pub fn default_search_fields(columns: &[ColumnDescriptor]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| {
            matches!(
                column.kind,
                ColumnKind::Text | ColumnKind::Status | ColumnKind::Date | ColumnKind::User
            )
        })
        .map(|column| column.key.clone())
        .collect()
}

/// Reads an edited value as JSON, falling back to plain text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

fn row_json(row: &Record, pretty: bool) -> String {
    let json = if pretty {
        serde_json::to_string_pretty(row)
    } else {
        serde_json::to_string(row)
    };
    json.unwrap_or_default()
}

fn post(outbox: &Outbox, message: String) {
    if let Ok(mut messages) = outbox.lock() {
        messages.push(message);
    }
}

fn no_row(index: usize) -> String {
    format!("no row {} on this page", index + 1)
}
