mod chart;
mod index;
mod pagination;
mod pipeline;

pub use chart::{chart_series, tooltip_label, ChartData, Dataset};
pub use index::{available_months, available_types};
pub use pagination::{page_count, paginate, Paginator, DEFAULT_PAGE_SIZE};
pub use pipeline::{by_month, by_search, by_type, FilterState, Views};
