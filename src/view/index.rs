use std::collections::BTreeSet;

use crate::dte::{DocumentType, Receipt, YearMonth};

/// Distinct document types present in the store
pub fn available_types(receipts: &[Receipt]) -> BTreeSet<DocumentType> {
    receipts.iter().map(|r| r.document_type).collect()
}

/// Distinct emission months among receipts of `selected`, ascending.
/// Empty when no type is selected.
pub fn available_months(receipts: &[Receipt], selected: Option<DocumentType>) -> Vec<YearMonth> {
    let Some(selected) = selected else {
        return Vec::new();
    };
    receipts
        .iter()
        .filter(|r| r.document_type == selected)
        .map(Receipt::month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
