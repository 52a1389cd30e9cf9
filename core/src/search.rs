use crate::index::Index;
use crate::segment::Segmenter;
use crate::snippet;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// One ranked result. Field names are a fixed contract with any consumer of
/// the JSON output.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub desc: String,
}

/// Composition root for the query path: owns a built [`Index`] and answers
/// free-text queries with a ranked, snippet-annotated JSON array.
///
/// Construction implies a completed build, so a `Searcher` in hand is always
/// safe to query, from any number of threads at once.
pub struct Searcher {
    index: Index,
}

impl Searcher {
    /// Build the index from the corpus file and return a ready searcher.
    pub fn init<P: AsRef<Path>>(corpus_path: P, segmenter: Arc<dyn Segmenter>) -> Result<Self> {
        let index = Index::build(corpus_path, segmenter)?;
        Ok(Self { index })
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Answer a query: segment, gather postings per token, rank by weight,
    /// and serialize `{title, url, desc}` objects in final order.
    pub fn search(&self, query: &str) -> Result<String> {
        let results = self.search_results(query)?;
        serde_json::to_string(&results).context("serializing search results")
    }

    fn search_results(&self, query: &str) -> Result<Vec<SearchResult>> {
        // Postings are concatenated, not merged: a document matching two
        // query tokens appears once per token, each with that token's weight.
        let mut postings = Vec::new();
        for token in self.index.segment(query) {
            let word = token.to_lowercase();
            if let Some(list) = self.index.inverted_list(&word) {
                postings.extend(list.iter());
            }
        }

        // Weight descending; ties break by doc_id then word so rebuilds and
        // repeated queries always produce the same order.
        postings.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
                .then_with(|| a.word.cmp(&b.word))
        });

        let mut results = Vec::with_capacity(postings.len());
        for posting in postings {
            let doc = self
                .index
                .doc_info(posting.doc_id)
                .with_context(|| format!("posting references unknown doc {}", posting.doc_id))?;
            results.push(SearchResult {
                title: doc.title.clone(),
                url: doc.url.clone(),
                desc: snippet::generate_desc(&doc.content, &posting.word),
            });
        }
        Ok(results)
    }
}
