//! Synchronous, per-keystroke row filtering.

use crate::view::{Row, ViewState};

/// Case-insensitive substring match against the row's full visible text.
pub fn row_matches(row: &Row, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    row.text().to_lowercase().contains(&term.to_lowercase())
}

pub fn filter_rows(rows: &mut [Row], term: &str) {
    for row in rows {
        row.visible = row_matches(row, term);
    }
}

/// Record `term` and show or hide every row of every table.
pub fn apply(view: &mut ViewState, term: &str) {
    view.search_term = term.to_string();
    for table in view.tables_mut() {
        filter_rows(table, term);
    }
}
