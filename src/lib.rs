pub mod config;
pub mod dte;
pub mod error;
pub mod export;
pub mod input;
pub mod render;
pub mod session;
pub mod shell;
pub mod view;

pub use config::Config;
pub use dte::{DocumentStore, DocumentType, Receipt, YearMonth};
pub use error::{DteError, Result};
pub use export::{build_archive, Archive};
pub use session::{RawDocument, Session};
pub use view::{ChartData, FilterState, Paginator, Views};
