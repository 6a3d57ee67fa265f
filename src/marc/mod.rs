//! MARC record decoding and field extraction
//!
//! This module decodes ISO 2709 MARC21 records and extracts the semantic
//! fields of a bibliographic summary from them.

pub mod extract;
pub mod parser;

pub use extract::summarize;
pub use parser::{decode, DataField, MarcRecord, Subfield};
