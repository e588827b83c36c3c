//! Stateful controller for one working session.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::Config;
use crate::dte::{DocumentStore, DocumentType, Receipt, RecordAdded, SourceFile, YearMonth};
use crate::error::{DteError, Result};
use crate::export::{build_archive, Archive};
use crate::input::ReadBatch;
use crate::view::{
    available_months, available_types, chart_series, ChartData, FilterState, Paginator, Views,
};

/// A raw input document handed to the session
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub content: Vec<u8>,
}

/// Result of ingesting a batch of documents
#[derive(Debug, Default)]
pub struct BatchReport {
    pub added: Vec<RecordAdded>,
    pub rejected: Vec<(String, DteError)>,
}

/// Which paginated listing a navigation request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Files,
    Data,
}

/// Page navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Prev,
    Next,
    Last,
    Jump(usize),
}

/// Owns the store, the filters, the derived indexes and both pagers.
///
/// Every mutating method finishes with [`Session::refresh`], which
/// recomputes the indexes and pulls the pagers back into range.
#[derive(Debug)]
pub struct Session {
    config: Config,
    store: DocumentStore,
    filter: FilterState,
    types: BTreeSet<DocumentType>,
    months: Vec<YearMonth>,
    files_pager: Paginator,
    data_pager: Paginator,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let page_size = config.view.page_size;
        Self {
            config,
            store: DocumentStore::new(),
            filter: FilterState::default(),
            types: BTreeSet::new(),
            months: Vec::new(),
            files_pager: Paginator::new(page_size),
            data_pager: Paginator::new(page_size),
        }
    }

    pub fn ingest(&mut self, doc: &RawDocument) -> Result<RecordAdded> {
        let added = self.store.append(&doc.name, &doc.content);
        if let Ok(added) = &added {
            debug!(file = %doc.name, index = added.index, "document admitted");
            self.refresh();
        }
        added
    }

    /// Ingest every document; rejected ones are logged and skipped
    pub fn ingest_batch<I>(&mut self, docs: I) -> BatchReport
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let mut report = BatchReport::default();
        for doc in docs {
            match self.ingest(&doc) {
                Ok(added) => report.added.push(added),
                Err(e) => {
                    warn!(file = %doc.name, error = %e, "document rejected");
                    report.rejected.push((doc.name, e));
                }
            }
        }
        report
    }

    /// Ingest what was read from disk; unreadable inputs count as rejected
    pub fn ingest_read(&mut self, batch: ReadBatch) -> BatchReport {
        let mut report = self.ingest_batch(batch.documents);
        report.rejected.extend(batch.unreadable);
        report
    }

    /// Select a document type. Month selection is always cleared.
    pub fn select_type(&mut self, doc_type: Option<DocumentType>) {
        self.filter.selected_months.clear();
        self.filter.selected_type = doc_type;
        self.filter_changed();
    }

    /// Replace the month selection; an empty set lifts the restriction
    pub fn select_months<I>(&mut self, months: I)
    where
        I: IntoIterator<Item = YearMonth>,
    {
        self.filter.selected_months = months.into_iter().collect();
        self.filter_changed();
    }

    /// Add or remove one month from the selection
    pub fn toggle_month(&mut self, month: YearMonth) {
        if !self.filter.selected_months.remove(&month) {
            self.filter.selected_months.insert(month);
        }
        self.filter_changed();
    }

    pub fn set_search(&mut self, text: &str) {
        self.filter.search_text = text.to_string();
        self.filter_changed();
    }

    /// Drop every document and filter, starting over
    pub fn reset(&mut self) {
        self.store.clear();
        self.filter = FilterState::default();
        self.files_pager.first();
        self.data_pager.first();
        self.refresh();
    }

    pub fn navigate(&mut self, listing: Listing, page: PageMove) -> Result<()> {
        let total = match listing {
            Listing::Files => self.store.files().len(),
            Listing::Data => self.views().filtered.len(),
        };
        let pager = match listing {
            Listing::Files => &mut self.files_pager,
            Listing::Data => &mut self.data_pager,
        };
        match page {
            PageMove::First => pager.first(),
            PageMove::Prev => pager.prev(),
            PageMove::Next => pager.next(total),
            PageMove::Last => pager.last(total),
            PageMove::Jump(n) => pager.jump(n, total)?,
        }
        Ok(())
    }

    /// Recompute the derived indexes and keep both pagers in range
    pub fn refresh(&mut self) {
        self.types = available_types(self.store.receipts());
        self.months = available_months(self.store.receipts(), self.filter.selected_type);
        let files = self.store.files().len();
        let rows = self.views().filtered.len();
        self.files_pager.clamp(files);
        self.data_pager.clamp(rows);
        debug!(
            documents = self.store.len(),
            types = self.types.len(),
            months = self.months.len(),
            rows,
            "views recomputed"
        );
    }

    fn filter_changed(&mut self) {
        if self.config.view.reset_page_on_filter {
            self.data_pager.first();
        }
        self.refresh();
    }

    pub fn views(&self) -> Views<'_> {
        Views::derive(self.store.receipts(), &self.filter)
    }

    pub fn chart(&self) -> ChartData {
        chart_series(&self.views().by_month, &self.config.chart)
    }

    pub fn export(&self) -> Result<Archive> {
        build_archive(&self.views().by_month, &self.filter)
    }

    /// Rows of the current data page
    pub fn data_page(&self) -> Vec<&Receipt> {
        self.data_pager.slice(&self.views().filtered).to_vec()
    }

    /// Files of the current file-list page
    pub fn files_page(&self) -> &[SourceFile] {
        self.files_pager.slice(self.store.files())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn available_types(&self) -> &BTreeSet<DocumentType> {
        &self.types
    }

    pub fn available_months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn files_pager(&self) -> &Paginator {
        &self.files_pager
    }

    pub fn data_pager(&self) -> &Paginator {
        &self.data_pager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dte::receipt::tests::sample_json;
    use rust_decimal::Decimal;

    fn doc(name: &str, tipo: &str, fecha: &str, total: &str) -> RawDocument {
        RawDocument {
            name: name.to_string(),
            content: sample_json(tipo, fecha, total).into_bytes(),
        }
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn scenario_a() -> Session {
        let mut session = Session::new(Config::default());
        session.ingest_batch(vec![
            doc("a.json", "01", "2024-01-05", "10.00"),
            doc("b.json", "01", "2024-01-20", "20.00"),
            doc("c.json", "01", "2024-02-10", "30.00"),
        ]);
        session
    }

    #[test]
    fn scenario_a_months_and_chart() {
        let mut session = scenario_a();
        session.select_type(Some(DocumentType::Factura));
        assert_eq!(session.available_months(), &[month("2024-01"), month("2024-02")]);

        session.select_months([month("2024-01")]);
        let totals: Vec<Decimal> = session
            .views()
            .filtered
            .iter()
            .map(|r| r.total_payable)
            .collect();
        assert_eq!(totals, vec![Decimal::new(1000, 2), Decimal::new(2000, 2)]);
        assert_eq!(session.chart().labels.len(), 2);
    }

    #[test]
    fn scenario_b_unmatched_search_is_empty() {
        let mut session = scenario_a();
        session.select_type(Some(DocumentType::Factura));
        session.set_search("zzz-no-match");
        assert!(session.views().filtered.is_empty());
        assert_eq!(session.data_pager().page_count(session.views().filtered.len()), 0);
        assert_eq!(session.data_pager().current(), 1);
        assert!(session.data_page().is_empty());
    }

    #[test]
    fn scenario_c_export_ignores_search() {
        let mut session = scenario_a();
        session.select_type(Some(DocumentType::Factura));
        session.select_months([month("2024-01")]);
        session.set_search("zzz-no-match");
        let archive = session.export().unwrap();
        assert_eq!(archive.entries, 2);
        assert_eq!(archive.file_name, "01_2024-01.zip");
    }

    #[test]
    fn scenario_d_file_list_pages() {
        let mut session = Session::new(Config::default());
        let docs = (0..11).map(|i| doc(&format!("{i:02}.json"), "01", "2024-01-05", "1"));
        session.ingest_batch(docs);
        assert_eq!(session.files_page().len(), 10);
        assert!(!session.files_pager().has_prev());

        session.navigate(Listing::Files, PageMove::Next).unwrap();
        assert_eq!(session.files_page().len(), 1);
        assert_eq!(session.files_page()[0].name, "10.json");
        assert!(!session.files_pager().has_next(11));

        session.navigate(Listing::Files, PageMove::Next).unwrap();
        assert_eq!(session.files_pager().current(), 2);
    }

    #[test]
    fn type_change_clears_months() {
        let mut session = scenario_a();
        session.ingest(&doc("d.json", "03", "2024-05-01", "5")).unwrap();
        session.select_type(Some(DocumentType::Factura));
        session.toggle_month(month("2024-02"));
        assert_eq!(session.filter().selected_months.len(), 1);

        session.select_type(Some(DocumentType::CreditoFiscal));
        assert!(session.filter().selected_months.is_empty());
        assert_eq!(session.available_months(), &[month("2024-05")]);
    }

    #[test]
    fn toggle_month_adds_and_removes() {
        let mut session = scenario_a();
        session.select_type(Some(DocumentType::Factura));
        session.toggle_month(month("2024-01"));
        assert_eq!(session.views().by_month.len(), 2);
        session.toggle_month(month("2024-01"));
        assert_eq!(session.views().by_month.len(), 3);
    }

    #[test]
    fn batch_skips_bad_documents() {
        let mut session = Session::new(Config::default());
        let report = session.ingest_batch(vec![
            doc("a.json", "01", "2024-01-05", "1"),
            RawDocument {
                name: "broken.json".to_string(),
                content: b"{".to_vec(),
            },
            doc("b.json", "05", "2024-01-05", "1"),
        ]);
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, "broken.json");
        assert_eq!(session.store().files().len(), 2);
        assert_eq!(
            session.available_types().iter().copied().collect::<Vec<_>>(),
            vec![DocumentType::Factura, DocumentType::NotaCredito]
        );
    }

    #[test]
    fn unreadable_inputs_are_reported_with_rejections() {
        let mut session = Session::new(Config::default());
        let batch = ReadBatch {
            documents: vec![doc("a.json", "01", "2024-01-05", "1")],
            unreadable: vec![(
                "gone.json".to_string(),
                DteError::InputNotFound("gone.json".into()),
            )],
        };
        let report = session.ingest_read(batch);
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, "gone.json");
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn filter_change_resets_data_page() {
        let mut session = Session::new(Config::default());
        session.ingest_batch((0..15).map(|i| doc(&format!("{i}.json"), "01", "2024-01-05", "1")));
        session.select_type(Some(DocumentType::Factura));
        session.navigate(Listing::Data, PageMove::Last).unwrap();
        assert_eq!(session.data_pager().current(), 2);

        session.set_search("amanda");
        assert_eq!(session.data_pager().current(), 1);
    }

    #[test]
    fn data_page_is_kept_when_reset_is_disabled() {
        let mut config = Config::default();
        config.view.reset_page_on_filter = false;
        let mut session = Session::new(config);
        session.ingest_batch((0..15).map(|i| doc(&format!("{i}.json"), "01", "2024-01-05", "1")));
        session.select_type(Some(DocumentType::Factura));
        session.navigate(Listing::Data, PageMove::Jump(2)).unwrap();

        session.set_search("amanda");
        assert_eq!(session.data_pager().current(), 2);

        session.set_search("no-such-receiver");
        assert_eq!(session.data_pager().current(), 1);
    }

    #[test]
    fn jump_past_last_page_is_an_error() {
        let mut session = scenario_a();
        assert!(matches!(
            session.navigate(Listing::Files, PageMove::Jump(2)),
            Err(DteError::InvalidPage { page: 2, count: 1 })
        ));
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = scenario_a();
        session.select_type(Some(DocumentType::Factura));
        session.reset();
        assert!(session.store().is_empty());
        assert!(session.store().files().is_empty());
        assert!(session.available_types().is_empty());
        assert!(session.available_months().is_empty());
        assert_eq!(session.filter(), &FilterState::default());
        assert!(session.chart().is_empty());
    }

    #[test]
    fn export_without_type_fails() {
        let session = scenario_a();
        assert!(matches!(session.export(), Err(DteError::NoTypeSelected)));
    }
}
