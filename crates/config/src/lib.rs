pub mod settings;

pub use settings::{ApiSettings, ExportSettings, PaginationSettings, Settings};
