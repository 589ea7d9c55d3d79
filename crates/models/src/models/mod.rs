pub mod audit_record;
pub mod description;
pub mod filter;
pub mod page;
pub mod timestamp;

pub use audit_record::{AuditAction, AuditRecord};
pub use description::DescriptionEntry;
pub use filter::FilterCriteria;
pub use page::{AuditPage, ContentRange, DecodeError};
