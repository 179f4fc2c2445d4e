//! Determinism tests: same input, same output.

use super::common::{engine_for, sample_corpus, valid_fixture_engine};

#[test]
fn test_same_query_twice() {
    let engine = valid_fixture_engine();
    for query in ["toit", "cloud", "to", "sdk", "guides", "xyz123"] {
        assert_eq!(engine.search(query), engine.search(query), "query {:?}", query);
    }
}

#[test]
fn test_separate_loads_agree() {
    let (docs, menu) = sample_corpus();
    let first = engine_for(&docs, &menu);
    let second = engine_for(&docs, &menu);
    assert_eq!(first.search("toit"), second.search("toit"));
}

#[test]
fn test_ties_follow_corpus_order() {
    use super::common::make_source;
    let docs = vec![
        make_source("first", "one", "Alpha", "toit"),
        make_source("second", "two", "Beta", "toit"),
        make_source("third", "three", "Gamma", "toit"),
    ];
    let engine = engine_for(&docs, &Default::default());
    let ids: Vec<String> = engine.search("toit").into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_blank_queries_are_empty() {
    let engine = valid_fixture_engine();
    for query in ["", " ", "\t\n", "   "] {
        assert!(engine.search(query).is_empty());
    }
}
