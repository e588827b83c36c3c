mod document_type;
mod month;
pub(crate) mod receipt;
mod store;

pub use document_type::DocumentType;
pub use month::YearMonth;
pub use receipt::Receipt;
pub use store::{DocumentStore, RecordAdded, SourceFile};
