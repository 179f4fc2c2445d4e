//! Search correctness tests: which documents match, and in what order.

use docsift::{EngineCell, EngineState};

use super::common::{engine_for, ids, make_source, sample_corpus, valid_fixture_engine};

#[test]
fn test_two_document_scenario() {
    let (docs, menu) = sample_corpus();
    let engine = engine_for(&docs, &menu);

    assert_eq!(ids(&engine.search("toit")), vec!["a", "b"]);
    assert_eq!(ids(&engine.search("Introduction")), vec!["a"]);
    assert!(engine.search("xyz123").is_empty());
}

#[test]
fn test_results_carry_stored_fields() {
    let (docs, menu) = sample_corpus();
    let engine = engine_for(&docs, &menu);
    let results = engine.search("cloud");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "b");
    assert_eq!(results[0].title, "Cloud API");
    assert_eq!(results[0].path, "/api/cloud");
    assert_eq!(results[0].excerpt, "Excerpt for Cloud API");
}

#[test]
fn test_title_prefix_matches() {
    let (docs, menu) = sample_corpus();
    let engine = engine_for(&docs, &menu);
    assert_eq!(ids(&engine.search("intro")), vec!["a"]);
    assert_eq!(ids(&engine.search("clo")), vec!["b"]);
}

#[test]
fn test_body_requires_whole_words() {
    let docs = vec![make_source("a", "a", "Alpha", "microcontrollers everywhere")];
    let engine = engine_for(&docs, &Default::default());
    assert_eq!(ids(&engine.search("microcontrollers")), vec!["a"]);
    assert!(engine.search("microcontroller").is_empty());
}

#[test]
fn test_short_terms_skip_body() {
    let docs = vec![make_source("a", "a", "Alpha", "go to it")];
    let engine = engine_for(&docs, &Default::default());
    // "go" is below the body's minimum length and not in any heading
    assert!(engine.search("go").is_empty());
}

#[test]
fn test_case_and_diacritics_are_ignored() {
    let docs = vec![make_source("a", "a", "Café setup", "Résumé of the naïve approach")];
    let engine = engine_for(&docs, &Default::default());
    assert_eq!(ids(&engine.search("CAFE")), vec!["a"]);
    assert_eq!(ids(&engine.search("resume")), vec!["a"]);
}

#[test]
fn test_all_terms_must_match_in_one_field() {
    let (docs, menu) = sample_corpus();
    let engine = engine_for(&docs, &menu);
    assert_eq!(ids(&engine.search("toit cloud")), vec!["b"]);
    assert!(engine.search("toit xyz123").is_empty());
}

#[test]
fn test_menu_title_beats_front_matter() {
    let engine = valid_fixture_engine();
    assert_eq!(ids(&engine.search("guides")), vec!["setup"]);
    assert!(engine.search("setting").is_empty());
}

#[test]
fn test_heading_levels_are_searchable() {
    let engine = valid_fixture_engine();
    assert_eq!(ids(&engine.search("linux")), vec!["setup"]);
    assert_eq!(ids(&engine.search("authentication")), vec!["cloud-api"]);
    assert_eq!(ids(&engine.search("tokens")), vec!["cloud-api"]);
}

#[test]
fn test_limit_applies_after_merge() {
    let engine = valid_fixture_engine();
    assert_eq!(ids(&engine.search_limited("toit", 1)), vec!["intro"]);
    assert!(engine.search_limited("toit", 0).is_empty());
}

#[test]
fn test_engine_cell_reports_failure() {
    let cell = EngineCell::new();
    let err = cell
        .get_or_load(|| docsift::QueryEngine::prepare("{}", "not json"))
        .unwrap_err();
    assert!(matches!(cell.state(), EngineState::Failed(ref e) if *e == err));
    assert!(cell.search("toit").is_empty());
}
