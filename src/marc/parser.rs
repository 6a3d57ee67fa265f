//! MARC record parser
//!
//! Decodes raw ISO 2709 data into a structured, tag-addressable representation.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::{AppError, AppResult};

const LEADER_LEN: usize = 24;
const DIRECTORY_ENTRY_LEN: usize = 12;
const SUBFIELD_DELIMITER: u8 = 0x1F;
const FIELD_TERMINATOR: u8 = 0x1E;
const RECORD_TERMINATOR: u8 = 0x1D;
const DEFAULT_LEADER: &str = "00000nam a2200000   4500";

/// A MARC record containing leader and fields
#[derive(Debug, Clone)]
pub struct MarcRecord {
    /// The 24-character record leader
    pub leader: String,
    /// Control fields (00X)
    pub control_fields: HashMap<String, String>,
    /// Data fields with indicators and subfields, in record order
    pub data_fields: Vec<DataField>,
}

/// A MARC data field (010-999)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    /// Field tag (3 characters)
    pub tag: String,
    /// First indicator
    pub ind1: char,
    /// Second indicator
    pub ind2: char,
    /// Subfields
    pub subfields: Vec<Subfield>,
}

/// A MARC subfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield data
    pub data: String,
}

/// Decode the first record found in `data`.
pub fn decode(data: &[u8]) -> AppResult<MarcRecord> {
    MarcRecord::from_bytes(data)
}

impl MarcRecord {
    /// Parse the first MARC record from raw bytes (ISO 2709).
    ///
    /// Bytes following the first record are ignored. Text is read as UTF-8
    /// regardless of the leader's coding scheme and normalized to NFC.
    pub fn from_bytes(data: &[u8]) -> AppResult<Self> {
        if data.is_empty() {
            return Err(AppError::Decode("no record in MARC21 data".to_string()));
        }
        if data.len() < LEADER_LEN {
            return Err(AppError::Decode(format!(
                "record too short for leader ({} bytes)",
                data.len()
            )));
        }

        let record_length = parse_number(&data[0..5], "record length")?;
        if record_length < LEADER_LEN || record_length > data.len() {
            return Err(AppError::Decode(format!(
                "record length {} does not fit {} available bytes",
                record_length,
                data.len()
            )));
        }
        let data = &data[..record_length];

        let leader = String::from_utf8_lossy(&data[0..LEADER_LEN]).to_string();

        let base_address = parse_number(&data[12..17], "base address")?;
        if base_address <= LEADER_LEN || base_address > data.len() {
            return Err(AppError::Decode(format!(
                "base address {} out of range",
                base_address
            )));
        }

        // Directory sits between the leader and its field terminator
        let directory_data = &data[LEADER_LEN..base_address - 1];
        if directory_data.len() % DIRECTORY_ENTRY_LEN != 0 {
            return Err(AppError::Decode(format!(
                "directory length {} is not a multiple of {}",
                directory_data.len(),
                DIRECTORY_ENTRY_LEN
            )));
        }

        let mut control_fields = HashMap::new();
        let mut data_fields = Vec::new();

        for entry in directory_data.chunks(DIRECTORY_ENTRY_LEN) {
            let tag = String::from_utf8_lossy(&entry[0..3]).to_string();
            let length = parse_number(&entry[3..7], "field length")?;
            let start = parse_number(&entry[7..12], "field start")?;

            let field_start = base_address + start;
            let field_end = field_start + length;
            if length == 0 || field_end > data.len() {
                return Err(AppError::Decode(format!(
                    "field {} overruns record ({}..{} of {})",
                    tag,
                    field_start,
                    field_end,
                    data.len()
                )));
            }

            let mut field_data = &data[field_start..field_end];
            if let Some((&last, rest)) = field_data.split_last() {
                if last == FIELD_TERMINATOR || last == RECORD_TERMINATOR {
                    field_data = rest;
                }
            }

            if tag.starts_with("00") {
                control_fields.insert(tag, normalize(field_data));
            } else if let Some(data_field) = Self::parse_data_field(&tag, field_data) {
                data_fields.push(data_field);
            }
        }

        Ok(MarcRecord {
            leader,
            control_fields,
            data_fields,
        })
    }

    /// Parse a data field from raw bytes
    fn parse_data_field(tag: &str, data: &[u8]) -> Option<DataField> {
        if data.len() < 2 {
            return None;
        }

        let ind1 = data[0] as char;
        let ind2 = data[1] as char;

        let subfields = data[2..]
            .split(|&b| b == SUBFIELD_DELIMITER)
            .filter(|part| !part.is_empty())
            .map(|part| Subfield {
                code: part[0] as char,
                data: normalize(&part[1..]),
            })
            .collect();

        Some(DataField {
            tag: tag.to_string(),
            ind1,
            ind2,
            subfields,
        })
    }

    /// Get all data fields with a specific tag, in record order
    pub fn get_fields<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a DataField> + 'a {
        self.data_fields.iter().filter(move |f| f.tag == tag)
    }
}

impl DataField {
    /// Get the first subfield value for a code
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.data.as_str())
    }

    pub fn has_subfield(&self, code: char) -> bool {
        self.subfields.iter().any(|sf| sf.code == code)
    }
}

impl MarcRecord {
    /// Empty record with a default MARC21 leader
    pub fn new(data_fields: Vec<DataField>) -> Self {
        MarcRecord {
            leader: DEFAULT_LEADER.to_string(),
            control_fields: HashMap::new(),
            data_fields,
        }
    }

    /// Encode this record as ISO 2709, recomputing length and base address.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut control: Vec<_> = self.control_fields.iter().collect();
        control.sort();

        let mut directory = Vec::new();
        let mut body = Vec::new();
        let mut push_field = |tag: &str, field: Vec<u8>| {
            directory.extend_from_slice(
                format!("{:<3.3}{:04}{:05}", tag, field.len(), body.len()).as_bytes(),
            );
            body.extend_from_slice(&field);
        };

        for (tag, value) in control {
            let mut field = value.as_bytes().to_vec();
            field.push(FIELD_TERMINATOR);
            push_field(tag, field);
        }
        for data_field in &self.data_fields {
            let mut field = vec![data_field.ind1 as u8, data_field.ind2 as u8];
            for subfield in &data_field.subfields {
                field.push(SUBFIELD_DELIMITER);
                field.push(subfield.code as u8);
                field.extend_from_slice(subfield.data.as_bytes());
            }
            field.push(FIELD_TERMINATOR);
            push_field(&data_field.tag, field);
        }
        directory.push(FIELD_TERMINATOR);
        body.push(RECORD_TERMINATOR);

        let base_address = LEADER_LEN + directory.len();
        let total = base_address + body.len();

        let mut leader: Vec<u8> = self
            .leader
            .bytes()
            .chain(std::iter::repeat(b' '))
            .take(LEADER_LEN)
            .collect();
        leader[0..5].copy_from_slice(format!("{:05}", total).as_bytes());
        leader[12..17].copy_from_slice(format!("{:05}", base_address).as_bytes());

        let mut record = leader;
        record.extend_from_slice(&directory);
        record.extend_from_slice(&body);
        record
    }
}

impl DataField {
    /// Data field with blank indicators
    pub fn new(tag: &str, subfields: &[(char, &str)]) -> Self {
        DataField {
            tag: tag.to_string(),
            ind1: ' ',
            ind2: ' ',
            subfields: subfields
                .iter()
                .map(|&(code, data)| Subfield {
                    code,
                    data: data.to_string(),
                })
                .collect(),
        }
    }
}

fn parse_number(bytes: &[u8], what: &str) -> AppResult<usize> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| {
            AppError::Decode(format!(
                "invalid {}: {:?}",
                what,
                String::from_utf8_lossy(bytes)
            ))
        })
}

fn normalize(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).nfc().collect()
}
