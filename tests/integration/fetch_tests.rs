use std::sync::Arc;

use aleph_marc::{services::cache::RecordCache, AppError, RecordId};

use crate::common::{record_bytes, FixedCatalog, UnreachableCatalog};

#[tokio::test]
async fn test_second_fetch_survives_unreachable_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let id = RecordId::parse("000077777").unwrap();
    let bytes = record_bytes(&[("500", &[('a', "Kopie")])]);

    let online = RecordCache::new(tmp.path(), FixedCatalog::new(bytes.clone()));
    let first = online.fetch(&id).await.unwrap();

    let offline = RecordCache::new(tmp.path(), Arc::new(UnreachableCatalog));
    let second = offline.fetch(&id).await.unwrap();

    assert_eq!(first, bytes);
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_fetched_bytes_land_in_named_file() {
    let tmp = tempfile::tempdir().unwrap();
    let id = RecordId::parse("000088888").unwrap();
    let catalog = FixedCatalog::new(vec![0x30, 0x31, 0x1d, 0xff]);

    let cache = RecordCache::new(tmp.path().join("marc_cache"), catalog.clone());
    cache.fetch(&id).await.unwrap();
    cache.fetch(&id).await.unwrap();

    let on_disk = std::fs::read(tmp.path().join("marc_cache").join("000088888.marc")).unwrap();
    assert_eq!(on_disk, vec![0x30, 0x31, 0x1d, 0xff]);
    assert_eq!(catalog.calls(), 1);
}

#[tokio::test]
async fn test_unreachable_catalog_on_miss_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let id = RecordId::parse("000099999").unwrap();
    let cache = RecordCache::new(tmp.path(), Arc::new(UnreachableCatalog));

    let err = cache.fetch(&id).await.unwrap_err();
    assert!(matches!(err, AppError::Z3950(_)));
    assert!(!tmp.path().join("000099999.marc").exists());
}
