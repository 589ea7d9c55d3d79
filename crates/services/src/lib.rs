pub mod audit;
pub mod client;
pub mod export;
pub mod pagination;
pub mod view;

pub use audit::{clean_label, filter_records, flatten, parse_description};
pub use client::{ApiClient, ClientError};
pub use pagination::{PageRequest, PaginationController, PaginationError, page_count};
pub use view::{AuditListView, FetchTicket, PageSource};
