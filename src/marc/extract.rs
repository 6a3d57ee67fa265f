//! Field extractors
//!
//! Each extractor reads one or more tags from a decoded record and produces
//! one attribute of the bibliographic summary. Extractors never fail: a
//! missing tag or subfield yields an absent value.

use crate::models::{
    BibliographicSummary, BibliographicalInfo, CreationPlace, Description, Person,
    PhysicalDescription, Relator, ReproductionInfo, SubfieldMapping, NO_GND,
};

use super::parser::{DataField, MarcRecord};

/// Subfield holding the GND authority link in personal-name fields
const AUTHORITY_CODE: char = '0';

/// Reduce a personal-name field to a [`Person`].
///
/// `authority_code` selects the subfield carrying the authority identifier.
pub fn person(field: &DataField, authority_code: char) -> Person {
    let gnd = match field.get_subfield(authority_code) {
        Some(id) => id.replace(',', ""),
        None => NO_GND.to_string(),
    };

    Person {
        gnd,
        name: field.get_subfield('a').map(str::to_string),
        date: field.get_subfield('d').unwrap_or_default().to_string(),
        role: field.get_subfield('4').unwrap_or_default().to_string(),
    }
}

fn persons<'a>(record: &'a MarcRecord, tag: &'a str) -> impl Iterator<Item = Person> + 'a {
    record
        .get_fields(tag)
        .map(|field| person(field, AUTHORITY_CODE))
}

/// Authors: every 100, then every 700 with relator `aut`
pub fn authors(record: &MarcRecord) -> Vec<Person> {
    persons(record, "100")
        .chain(persons(record, "700").filter(|p| p.has_role(Relator::Author)))
        .collect()
}

/// Recipients: every 700 with relator `rcp`
pub fn recipients(record: &MarcRecord) -> Vec<Person> {
    persons(record, "700")
        .filter(|p| p.has_role(Relator::Recipient))
        .collect()
}

/// Persons named as subjects (600)
pub fn mentioned_persons(record: &MarcRecord) -> Vec<Person> {
    persons(record, "600").collect()
}

/// Last occurrence of `tag` carrying `code` wins.
fn last_subfield(record: &MarcRecord, tag: &str, code: char) -> Option<String> {
    record
        .get_fields(tag)
        .fold(None, |current, field| match field.get_subfield(code) {
            Some(value) => Some(value.to_string()),
            None => current,
        })
}

/// Merge the mapped subfields of every occurrence of `tag` into one value.
///
/// An occurrence carrying the leading code (`T::CODES[0]`) starts a fresh
/// value, discarding keys gathered from earlier occurrences. The remaining
/// codes create the value on first contribution or overwrite their key.
fn merged<T: SubfieldMapping>(record: &MarcRecord, tag: &str) -> Option<T> {
    record.get_fields(tag).fold(None, |acc, field| {
        let acc = match T::CODES.first() {
            Some(&lead) if field.has_subfield(lead) => None,
            _ => acc,
        };
        T::CODES.iter().fold(acc, |acc, &code| match field.get_subfield(code) {
            Some(value) => {
                let mut merged = acc.unwrap_or_default();
                merged.assign(code, value);
                Some(merged)
            }
            None => acc,
        })
    })
}

/// Date of creation (046 $c).
///
/// Unlike the other scalar attributes the last 046 wins even when it has no
/// `$c`, which leaves the date absent.
pub fn date(record: &MarcRecord) -> Option<String> {
    record
        .get_fields("046")
        .last()
        .and_then(|field| field.get_subfield('c'))
        .map(str::to_string)
}

pub fn description(record: &MarcRecord) -> Option<Description> {
    merged(record, "245")
}

pub fn creation_form(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "250", 'a')
}

pub fn creation_place(record: &MarcRecord) -> Option<CreationPlace> {
    merged(record, "751")
}

pub fn physical_description(record: &MarcRecord) -> Option<PhysicalDescription> {
    merged(record, "300")
}

pub fn footnote(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "500", 'a')
}

pub fn bibliographical_info(record: &MarcRecord) -> Option<BibliographicalInfo> {
    merged(record, "510")
}

pub fn content_info(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "520", 'a')
}

pub fn accompanying_material(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "525", 'a')
}

pub fn reproduction_info(record: &MarcRecord) -> Option<ReproductionInfo> {
    merged(record, "533")
}

pub fn language(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "546", 'a')
}

/// Reference into the Bernoulli works catalogue (596)
pub fn work_reference(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "596", 'a')
}

/// Link to the digitized manuscript (856 $u)
pub fn emanuscript_link(record: &MarcRecord) -> Option<String> {
    last_subfield(record, "856", 'u')
}

/// Run every extractor against `record`.
pub fn summarize(record: &MarcRecord) -> BibliographicSummary {
    BibliographicSummary {
        author: authors(record),
        recipient: recipients(record),
        mentioned_persons: mentioned_persons(record),
        date: date(record),
        description: description(record),
        creation_form: creation_form(record),
        creation_place: creation_place(record),
        physical_description: physical_description(record),
        footnote: footnote(record),
        bibliographical_info: bibliographical_info(record),
        content_info: content_info(record),
        accompanying_material: accompanying_material(record),
        reproduction_info: reproduction_info(record),
        language: language(record),
        work_reference: work_reference(record),
        emanuscript_link: emanuscript_link(record),
    }
}
