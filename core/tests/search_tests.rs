use serde_json::Value;
use sift_core::{Searcher, Segmenter};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

fn searcher(lines: &[&str]) -> Searcher {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    Searcher::init(file.path(), Arc::new(WhitespaceSegmenter)).unwrap()
}

fn results(searcher: &Searcher, query: &str) -> Vec<Value> {
    let raw = searcher.search(query).unwrap();
    match serde_json::from_str(&raw).unwrap() {
        Value::Array(items) => items,
        other => panic!("expected JSON array, got {other}"),
    }
}

#[test]
fn unindexed_query_returns_empty_array() {
    let s = searcher(&["Doc\u{3}http://a\u{3}alpha beta"]);
    assert_eq!(s.search("nothing here").unwrap(), "[]");
    assert_eq!(s.search("").unwrap(), "[]");
}

#[test]
fn results_carry_the_fixed_field_names() {
    let s = searcher(&["Boost Asio\u{3}http://asio\u{3}asynchronous io with asio"]);
    let hits = results(&s, "asio");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Boost Asio");
    assert_eq!(hits[0]["url"], "http://asio");
    assert_eq!(hits[0]["desc"], "asynchronous io with asio");
}

#[test]
fn results_are_sorted_by_weight_descending() {
    // doc 0: body-only hit (weight 1); doc 1: title hit (weight 11);
    // doc 2: title-only hit (weight 10)
    let s = searcher(&[
        "Other\u{3}http://a\u{3}filesystem notes",
        "Filesystem\u{3}http://b\u{3}the filesystem library",
        "Filesystem Intro\u{3}http://c\u{3}overview",
    ]);
    let hits = results(&s, "filesystem");
    let urls: Vec<&str> = hits.iter().map(|h| h["url"].as_str().unwrap()).collect();
    assert_eq!(urls, vec!["http://b", "http://c", "http://a"]);
}

#[test]
fn equal_weights_break_ties_by_doc_id() {
    let s = searcher(&[
        "z\u{3}http://first\u{3}needle",
        "a\u{3}http://second\u{3}needle",
    ]);
    let hits = results(&s, "needle");
    let urls: Vec<&str> = hits.iter().map(|h| h["url"].as_str().unwrap()).collect();
    assert_eq!(urls, vec!["http://first", "http://second"]);
}

#[test]
fn multi_token_matches_are_not_deduplicated() {
    // One document matching both query tokens appears once per token.
    let s = searcher(&["Doc\u{3}http://a\u{3}alpha alpha beta"]);
    let hits = results(&s, "alpha beta");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["url"], "http://a");
    assert_eq!(hits[1]["url"], "http://a");
}

#[test]
fn query_tokens_are_lowercased() {
    let s = searcher(&["Doc\u{3}http://a\u{3}alpha"]);
    let hits = results(&s, "ALPHA");
    assert_eq!(hits.len(), 1);
}

#[test]
fn title_only_match_still_yields_a_snippet() {
    // The matched word appears only in the title; short content comes back
    // unchanged as the description.
    let s = searcher(&["needle\u{3}http://a\u{3}hello world"]);
    let hits = results(&s, "needle");
    assert_eq!(hits[0]["desc"], "hello world");
}

#[test]
fn long_content_is_truncated_with_ellipsis() {
    let body = "needle ".to_string() + &"filler ".repeat(60);
    let line = format!("Doc\u{3}http://a\u{3}{body}");
    let s = searcher(&[line.as_str()]);
    let hits = results(&s, "needle");
    let desc = hits[0]["desc"].as_str().unwrap();
    assert_eq!(desc.len(), 160);
    assert!(desc.ends_with("..."));
}
