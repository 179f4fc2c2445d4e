//! Round-trip tests: a loaded snapshot answers like the index it came from.

use docsift::{export_snapshot, DocumentConfig, QueryEngine, Snapshot};

use super::common::{sample_index, search_in_memory};

const QUERIES: &[&str] = &["toit", "Introduction", "cloud", "clo", "toit cloud", "xyz123", "a"];

#[test]
fn test_engine_matches_in_memory_index() {
    let index = sample_index();
    let snapshot = export_snapshot(&index).unwrap();
    let engine = QueryEngine::from_snapshot(snapshot, DocumentConfig::site_default())
        .and_then(|mut engine| engine.import_all().map(|()| engine))
        .unwrap();

    for query in QUERIES {
        assert_eq!(
            engine.search(query),
            search_in_memory(&index, query),
            "query {:?}",
            query
        );
    }
}

#[test]
fn test_json_round_trip_preserves_snapshot() {
    let snapshot = export_snapshot(&sample_index()).unwrap();
    let json = snapshot.to_json().unwrap();
    assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
}

#[test]
fn test_reimported_index_exports_identically() {
    let snapshot = export_snapshot(&sample_index()).unwrap();
    let config = serde_json::to_string(&DocumentConfig::site_default()).unwrap();
    let engine = QueryEngine::load(&snapshot.to_json().unwrap(), &config).unwrap();
    assert_eq!(export_snapshot(engine.index()).unwrap(), snapshot);
}
