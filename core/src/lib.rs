//! Pulse reporting core: a fixed catalog of aggregation reports over the
//! payments warehouse (transactions, user registrations, insurance).

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod report;
pub mod schema;
pub mod store;
pub mod types;

pub use catalog::{ReportCatalog, ReportId, Section};
pub use error::{PulseError, PulseResult};
pub use format::indian_number_format;
pub use report::{ReportResult, Row, Value};
pub use store::PulseStore;
