//! Plain-text grid rendering.

use escrow_grid::listing::RenderedGrid;
use escrow_grid::{EffectivePagination, PaginationSource};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column grows when it has no configured width.
const MAX_COLUMN_WIDTH: usize = 32;

const SEPARATOR: &str = "  ";

/// Lays out `grid` as aligned text.
///
/// `detail` is asked for the extra lines of each expanded row, by page
/// position.
pub fn render_grid(grid: &RenderedGrid, detail: impl Fn(usize) -> Option<String>) -> String {
    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(grid.headers.iter().map(|h| match h.indicator {
        Some(indicator) => format!("{} {}", h.label, indicator.glyph()),
        None => h.label.clone(),
    }));

    let body: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![(row.state.index + 1).to_string()];
            cells.extend(row.cells.iter().map(|cell| cell.to_plain_text()));
            cells
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(col, title)| {
            let configured = col
                .checked_sub(1)
                .and_then(|i| grid.headers.get(i))
                .and_then(|h| h.width);
            match configured {
                Some(width) => usize::from(width),
                None => body
                    .iter()
                    .map(|cells| cells[col].width())
                    .chain([title.width()])
                    .max()
                    .unwrap_or(0)
                    .min(MAX_COLUMN_WIDTH),
            }
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);

    for (row, cells) in grid.rows.iter().zip(&body) {
        push_line(&mut out, cells, &widths);
        if !row.state.expanded {
            continue;
        }
        if let Some(text) = detail(row.state.index) {
            for line in text.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    if grid.rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out.push_str(&pagination_line(&grid.pagination));
    out
}

/// One-line pager summary.
pub fn pagination_line(pagination: &EffectivePagination) -> String {
    let state = &pagination.state;
    let source = match pagination.source {
        PaginationSource::Server => "server",
        PaginationSource::Local => "filtered",
    };
    let rows = if state.start_item == 0 {
        format!("0 of {}", state.total_rows)
    } else {
        format!("{}-{} of {}", state.start_item, state.end_item, state.total_rows)
    };
    format!(
        "Rows {} | page {}/{} | {}",
        rows,
        state.page,
        state.total_pages.max(1),
        source
    )
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| fit(cell, *width))
        .collect();
    out.push_str(line.join(SEPARATOR).trim_end());
    out.push('\n');
}

/// Pads or truncates `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    let text = text.replace('\n', " ");
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{}{}", text, " ".repeat(padding));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}
