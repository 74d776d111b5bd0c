//! Transaction export.
//!
//! Rows are selected by the store with an [`ExportFilter`] and rendered here.

pub mod csv;
pub mod error;
pub mod types;

pub use self::csv::write_csv;
pub use error::ExportError;
pub use types::{ExportFilter, ExportRow};
