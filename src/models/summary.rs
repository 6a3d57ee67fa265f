//! Bibliographic summary and composite attribute models

use serde::{Deserialize, Serialize};

use super::person::Person;

/// A composite attribute built by merging subfields of one repeated tag.
///
/// `CODES` lists the subfield codes read from each occurrence, in the order
/// they are applied. The first code is the leading one: an occurrence that
/// carries it starts a new value. `assign` stores one subfield value under
/// its key.
pub trait SubfieldMapping: Default {
    const CODES: &'static [char];

    fn assign(&mut self, code: char, value: &str);
}

/// Title statement (245)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl SubfieldMapping for Description {
    const CODES: &'static [char] = &['a', 'c'];

    fn assign(&mut self, code: char, value: &str) {
        match code {
            'a' => self.title = Some(value.to_string()),
            'c' => self.author = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Place of creation (751)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationPlace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gnd: Option<String>,
}

impl SubfieldMapping for CreationPlace {
    const CODES: &'static [char] = &['a', '0'];

    fn assign(&mut self, code: char, value: &str) {
        match code {
            'a' => self.place = Some(value.to_string()),
            '0' => self.gnd = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Physical description (300)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SubfieldMapping for PhysicalDescription {
    const CODES: &'static [char] = &['a', 'c'];

    fn assign(&mut self, code: char, value: &str) {
        match code {
            'a' => self.amount = Some(value.to_string()),
            'c' => self.format = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Citation / references note (510)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SubfieldMapping for BibliographicalInfo {
    const CODES: &'static [char] = &['a', 'i'];

    fn assign(&mut self, code: char, value: &str) {
        match code {
            'a' => self.reference = Some(value.to_string()),
            'i' => self.kind = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Reproduction note (533)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproductionInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
}

impl SubfieldMapping for ReproductionInfo {
    const CODES: &'static [char] = &['a', 'b', 'c', 'd', 'n'];

    fn assign(&mut self, code: char, value: &str) {
        let slot = match code {
            'a' => &mut self.kind,
            'b' => &mut self.place,
            'c' => &mut self.institution,
            'd' => &mut self.year,
            'n' => &mut self.additional,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

/// Everything extracted from one catalog record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicSummary {
    pub author: Vec<Person>,
    pub recipient: Vec<Person>,
    pub mentioned_persons: Vec<Person>,
    pub date: Option<String>,
    pub description: Option<Description>,
    pub creation_form: Option<String>,
    pub creation_place: Option<CreationPlace>,
    pub physical_description: Option<PhysicalDescription>,
    pub footnote: Option<String>,
    pub bibliographical_info: Option<BibliographicalInfo>,
    pub content_info: Option<String>,
    pub accompanying_material: Option<String>,
    pub reproduction_info: Option<ReproductionInfo>,
    pub language: Option<String>,
    pub work_reference: Option<String>,
    pub emanuscript_link: Option<String>,
}
