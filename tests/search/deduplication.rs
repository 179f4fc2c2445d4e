//! Deduplication tests: each document appears once, at its first group.

use std::collections::HashSet;

use super::common::{engine_for, ids, make_source, sample_corpus};

#[test]
fn test_title_and_body_match_appears_once() {
    let (docs, menu) = sample_corpus();
    let engine = engine_for(&docs, &menu);
    // "b" matches "cloud" in its title, its h1 and its body
    let results = engine.search("cloud");
    assert_eq!(ids(&results), vec!["b"]);
}

#[test]
fn test_title_group_position_wins() {
    let docs = vec![
        make_source("body-only", "x", "Other", "cloud cloud cloud"),
        make_source("titled", "y", "Cloud", "nothing relevant"),
        make_source("both", "z", "Cloud setup", "the cloud again"),
    ];
    let engine = engine_for(&docs, &Default::default());
    // Title group: titled, both. Body group: body-only, both (dropped)
    assert_eq!(
        ids(&engine.search("cloud")),
        vec!["titled", "both", "body-only"]
    );
}

#[test]
fn test_no_duplicates_across_many_fields() {
    let mut doc = make_source("a", "a", "Toit", "toit toit toit");
    doc.headings.push(docsift::build::Heading {
        text: "Toit again".into(),
        depth: 2,
    });
    doc.headings.push(docsift::build::Heading {
        text: "More toit".into(),
        depth: 3,
    });
    let engine = engine_for(&[doc], &Default::default());
    let results = engine.search("toit");
    let unique: HashSet<&str> = ids(&results).into_iter().collect();
    assert_eq!(results.len(), 1);
    assert_eq!(unique.len(), 1);
}
