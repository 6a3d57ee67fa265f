use std::sync::Arc;

use aleph_marc::{AppError, Person};
use serde_json::json;

use crate::common::{record_bytes, services, FixedCatalog, UnreachableCatalog};

#[tokio::test]
async fn test_bernoulli_letter_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let cache_dir = tmp.path().join("marc_cache");
    let catalog = FixedCatalog::new(record_bytes(&[(
        "100",
        &[
            ('a', "Bernoulli, Jacob"),
            ('d', "1654-1705"),
            ('0', "(DE-588)118509864,"),
        ],
    )]));

    let services = services(&cache_dir, catalog.clone());
    let summary = services.catalog.summary("000123456").await.unwrap();

    assert!(cache_dir.join("000123456.marc").is_file());
    assert_eq!(
        summary.author,
        vec![Person {
            gnd: "(DE-588)118509864".to_string(),
            name: Some("Bernoulli, Jacob".to_string()),
            date: "1654-1705".to_string(),
            role: String::new(),
        }]
    );
    assert!(summary.recipient.is_empty());
    assert_eq!(catalog.calls(), 1);
}

#[tokio::test]
async fn test_full_summary_json_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = FixedCatalog::new(record_bytes(&[
        ("046", &[('c', "1696")]),
        ("100", &[('a', "Bernoulli, Johann"), ('0', "(DE-588)118656174")]),
        ("245", &[('a', "Brief an Pierre Varignon")]),
        ("250", &[('a', "Entwurf")]),
        ("300", &[('a', "1 Bl.")]),
        ("300", &[('c', "4o")]),
        ("500", &[('a', "Erste Notiz")]),
        ("500", &[('a', "Zweite Notiz")]),
        ("510", &[('a', "BWK 40"), ('i', "Druck")]),
        ("533", &[('a', "Digitalisat"), ('c', "UB Basel")]),
        ("546", &[('a', "Franzoesisch")]),
        ("600", &[('a', "Leibniz, Gottfried Wilhelm")]),
        ("700", &[('a', "Varignon, Pierre"), ('4', "rcp")]),
        ("700", &[('a', "Fleckenstein, J. O."), ('4', "edt")]),
        ("751", &[('a', "Basel")]),
        ("856", &[('u', "https://doi.org/10.7891/e-manuscripta-1")]),
    ]));

    let services = services(tmp.path(), catalog);
    let summary = services.catalog.summary("000321000").await.unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["date"], "1696");
    assert_eq!(value["author"][0]["GND"], "(DE-588)118656174");
    assert_eq!(value["recipient"][0]["GND"], "no_GND");
    assert_eq!(value["recipient"][0]["role"], "rcp");
    assert_eq!(value["mentioned_persons"].as_array().unwrap().len(), 1);
    assert_eq!(value["description"], json!({ "title": "Brief an Pierre Varignon" }));
    assert_eq!(value["creation_form"], "Entwurf");
    assert_eq!(value["creation_place"], json!({ "place": "Basel" }));
    assert_eq!(value["physical_description"], json!({ "amount": "1 Bl.", "format": "4o" }));
    assert_eq!(value["footnote"], "Zweite Notiz");
    assert_eq!(value["bibliographical_info"], json!({ "reference": "BWK 40", "type": "Druck" }));
    assert!(value["content_info"].is_null());
    assert!(value["accompanying_material"].is_null());
    assert_eq!(
        value["reproduction_info"],
        json!({ "type": "Digitalisat", "institution": "UB Basel" })
    );
    assert_eq!(value["language"], "Franzoesisch");
    assert!(value["work_reference"].is_null());
    assert_eq!(value["emanuscript_link"], "https://doi.org/10.7891/e-manuscripta-1");
}

#[tokio::test]
async fn test_undecodable_cache_entry_yields_no_summary() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("000000666.marc"), b"garbage").unwrap();

    let services = services(tmp.path(), Arc::new(UnreachableCatalog));
    let err = services.catalog.summary("000000666").await.unwrap_err();

    assert!(matches!(err, AppError::Decode(_)));
    assert_eq!(err.code().exit_code(), 2);
}

#[tokio::test]
async fn test_remote_failure_yields_no_summary() {
    let tmp = tempfile::tempdir().unwrap();
    let services = services(tmp.path(), Arc::new(UnreachableCatalog));

    let err = services.catalog.summary("000000777").await.unwrap_err();
    assert_eq!(err.code().exit_code(), 1);
}
