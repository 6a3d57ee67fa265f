//! Data models for aleph-marc

pub mod person;
pub mod record_id;
pub mod summary;

// Re-export commonly used types
pub use person::{Person, Relator, NO_GND};
pub use record_id::RecordId;
pub use summary::{
    BibliographicSummary, BibliographicalInfo, CreationPlace, Description, PhysicalDescription,
    ReproductionInfo, SubfieldMapping,
};
