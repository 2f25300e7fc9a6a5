//! Ledger domain - the transaction record set and its tabular views

pub mod record_store;
pub mod query_engine;
pub mod paginator;
pub mod exporter;

pub use record_store::RecordStore;
pub use query_engine::{evaluate, Filter, QueryParams, QuerySpec, SortDirection, SortField, DEFAULT_PAGE_SIZE};
pub use paginator::{paginate, total_pages, Page, PageInfo, ShownRange};
pub use exporter::{export_filename, to_csv, CSV_HEADERS};
