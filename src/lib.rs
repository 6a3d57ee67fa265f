//! aleph-marc
//!
//! Retrieves MARC21 records from the Aleph catalog of the University Library
//! of Basel over Z39.50, keeps the raw records in an on-disk cache and
//! extracts the fields of a bibliographic summary from them.

pub mod config;
pub mod error;
pub mod marc;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{BibliographicSummary, Person, RecordId};
pub use services::Services;
