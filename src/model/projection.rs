//! Derived row projection: filter, sort, then page
//!
//! Recomputed on every render and never stored.

use super::column::Column;
use super::row::{CellValue, Row};
use super::table::{SortDirection, SortState, TableState};
use std::cmp::Ordering;

/// One page of the filtered, sorted row set
#[derive(Debug)]
pub struct Projection<'a> {
    /// Rows on the current page
    pub rows: Vec<&'a Row>,
    /// Row count after filtering
    pub total: usize,
    /// Effective page index (clamped into range)
    pub page: usize,
    /// Number of pages, at least 1
    pub page_count: usize,
    /// Index of the first row of the page within the filtered set
    pub start: usize,
}

impl Projection<'_> {
    /// "a–b of total" label for the pagination footer
    pub fn range_label(&self) -> String {
        if self.rows.is_empty() {
            format!("0 of {}", self.total)
        } else {
            format!(
                "{}–{} of {}",
                self.start + 1,
                self.start + self.rows.len(),
                self.total
            )
        }
    }
}

/// Keep rows where any cell contains the query, ignoring case
pub fn filter_rows<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.values
                .values()
                .any(|v| v.to_string().to_lowercase().contains(&needle))
        })
        .collect()
}

/// Order two cell values; missing values sort first
pub fn compare_values(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Some(x), Some(y)) => compare_text(&x.to_string(), &y.to_string()),
    }
}

/// Case-folded comparison; on a tie lowercase sorts before uppercase
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Sort rows in place by the active sort column, if it exists
pub fn sort_rows(rows: &mut [&Row], columns: &[Column], sort: &SortState) {
    let Some(key) = sort.order_by.as_deref() else {
        return;
    };
    if !columns.iter().any(|c| c.key == key) {
        return;
    }

    rows.sort_by(|a, b| compare_values(a.get(key), b.get(key)));
    if sort.direction == SortDirection::Desc {
        rows.reverse();
    }
}

/// Compute the visible page for a table and search query
pub fn project<'a>(table: &'a TableState, query: &str) -> Projection<'a> {
    let mut rows = filter_rows(table.rows(), query);
    sort_rows(&mut rows, table.columns(), table.sort());

    let total = rows.len();
    let per_page = table.rows_per_page().max(1);
    let page_count = total.div_ceil(per_page).max(1);
    let page = table.page().min(page_count - 1);
    let start = page * per_page;
    let end = (start + per_page).min(total);

    let rows = if start < total {
        rows[start..end].to_vec()
    } else {
        Vec::new()
    };

    Projection {
        rows,
        total,
        page,
        page_count,
        start,
    }
}
