//! Person model and MARC relator codes

use serde::{Deserialize, Serialize};

/// Identifier used when a personal-name field carries no GND authority link.
///
/// Reserved for this meaning only; no other missing value uses it.
pub const NO_GND: &str = "no_GND";

/// MARC relator codes (subfield `4`) the extractors filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relator {
    Author,
    Recipient,
}

impl Relator {
    pub fn code(self) -> &'static str {
        match self {
            Relator::Author => "aut",
            Relator::Recipient => "rcp",
        }
    }
}

/// A person taken from a personal-name field (100, 600, 700)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// GND authority identifier with commas removed, or [`NO_GND`]
    #[serde(rename = "GND")]
    pub gnd: String,
    pub name: Option<String>,
    pub date: String,
    pub role: String,
}

impl Person {
    pub fn has_gnd(&self) -> bool {
        self.gnd != NO_GND
    }

    pub fn has_role(&self, relator: Relator) -> bool {
        self.role == relator.code()
    }
}
