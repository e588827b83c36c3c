use std::collections::BTreeSet;

use crate::dte::{DocumentType, Receipt, YearMonth};

/// User-selected filters. Empty months or search text means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selected_type: Option<DocumentType>,
    pub selected_months: BTreeSet<YearMonth>,
    pub search_text: String,
}

impl FilterState {
    /// Months joined with '-' in calendar order, as used in export names
    pub fn months_label(&self) -> String {
        self.selected_months
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Receipts of the selected type. Nothing passes while no type is selected.
pub fn by_type(receipts: &[Receipt], selected: Option<DocumentType>) -> Vec<&Receipt> {
    match selected {
        Some(t) => receipts.iter().filter(|r| r.document_type == t).collect(),
        None => Vec::new(),
    }
}

pub fn by_month<'a>(receipts: &[&'a Receipt], months: &BTreeSet<YearMonth>) -> Vec<&'a Receipt> {
    if months.is_empty() {
        return receipts.to_vec();
    }
    receipts
        .iter()
        .copied()
        .filter(|r| months.contains(&r.month()))
        .collect()
}

/// Case-insensitive substring search; the text is used as given, spaces included
pub fn by_search<'a>(receipts: &[&'a Receipt], text: &str) -> Vec<&'a Receipt> {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return receipts.to_vec();
    }
    receipts
        .iter()
        .copied()
        .filter(|r| r.matches_lowercase(&needle))
        .collect()
}

/// Snapshot of the derived views for one filter state.
///
/// `by_month` feeds the chart and the export; `filtered` additionally
/// applies the search text and feeds the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Views<'a> {
    pub by_month: Vec<&'a Receipt>,
    pub filtered: Vec<&'a Receipt>,
}

impl<'a> Views<'a> {
    pub fn derive(receipts: &'a [Receipt], filter: &FilterState) -> Self {
        let typed = by_type(receipts, filter.selected_type);
        let by_month = by_month(&typed, &filter.selected_months);
        let filtered = by_search(&by_month, &filter.search_text);
        Self { by_month, filtered }
    }
}
