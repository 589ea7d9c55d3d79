pub mod compose;
pub mod filter;
pub mod flatten;
pub mod label;

pub use compose::{AuditDescription, NewAuditRecord};
pub use filter::{filter_records, matches};
pub use flatten::{flatten, parse_description, render_lines};
pub use label::clean_label;
