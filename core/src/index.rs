use crate::corpus;
use crate::segment::Segmenter;
use crate::DocId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// Forward-index entry. `doc_id` always equals the record's position in the
/// forward store; records are never mutated or removed after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocInfo {
    pub doc_id: DocId,
    pub title: String,
    pub url: String,
    pub content: String,
}

/// One (document, weight, word) contribution to an inverted-index entry.
/// Produced exactly once per (document, distinct token) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: u32,
    /// Normalized (lowercase) token this posting was filed under.
    pub word: String,
}

/// Per-document transient term-frequency counters, one per distinct token.
#[derive(Default)]
struct WordCount {
    title_count: u32,
    content_count: u32,
}

/// Title hits dominate body hits in the ranking.
const TITLE_WEIGHT: u32 = 10;

/// The whole index structure: an append-only forward store (position is
/// identity) and a token → posting-list map, built in one sequential pass and
/// immutable afterwards.
pub struct Index {
    forward: Vec<DocInfo>,
    inverted: HashMap<String, Vec<Posting>>,
    segmenter: Arc<dyn Segmenter>,
}

impl Index {
    /// Build the index from a delimited corpus file, one document per line.
    ///
    /// Opening the corpus is all-or-nothing: on failure no index is
    /// constructed. A line that does not parse into exactly three fields is
    /// logged and skipped without consuming a `doc_id`.
    pub fn build<P: AsRef<Path>>(corpus_path: P, segmenter: Arc<dyn Segmenter>) -> Result<Self> {
        let path = corpus_path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening corpus file {}", path.display()))?;

        let mut index = Self {
            forward: Vec::new(),
            inverted: HashMap::new(),
            segmenter,
        };
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("reading corpus line {}", line_no + 1))?;
            let record = match corpus::parse_record(&line) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(line = line_no + 1, %err, "skipping malformed corpus line");
                    continue;
                }
            };
            let doc_id = index.build_forward(record);
            index.build_inverted(doc_id);
            if doc_id % 100 == 0 {
                tracing::debug!(doc_id, "indexing progress");
            }
        }
        tracing::info!(
            num_docs = index.forward.len(),
            num_terms = index.inverted.len(),
            "index build complete"
        );
        Ok(index)
    }

    /// Forward lookup. Any id outside `[0, len)` is a miss, never a panic.
    pub fn doc_info(&self, doc_id: DocId) -> Option<&DocInfo> {
        self.forward.get(doc_id as usize)
    }

    /// Inverted lookup by normalized token. Absent tokens are a normal miss.
    pub fn inverted_list(&self, word: &str) -> Option<&[Posting]> {
        self.inverted.get(word).map(Vec::as_slice)
    }

    pub fn doc_count(&self) -> usize {
        self.forward.len()
    }

    /// Segment text with the capability the index was built with. Queries
    /// must tokenize identically to build, so this is the only entry point.
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    /// Append a record to the forward store, assigning the next dense id.
    fn build_forward(&mut self, record: corpus::CorpusRecord) -> DocId {
        let doc_id = self.forward.len() as DocId;
        self.forward.push(DocInfo {
            doc_id,
            title: record.title,
            url: record.url,
            content: record.content,
        });
        doc_id
    }

    /// Tokenize one document's title and content, aggregate per-token
    /// frequencies, and append one weighted posting per distinct token.
    fn build_inverted(&mut self, doc_id: DocId) {
        let doc = &self.forward[doc_id as usize];
        let mut counts: HashMap<String, WordCount> = HashMap::new();
        for token in self.segmenter.segment(&doc.title) {
            counts.entry(token.to_lowercase()).or_default().title_count += 1;
        }
        for token in self.segmenter.segment(&doc.content) {
            counts.entry(token.to_lowercase()).or_default().content_count += 1;
        }
        for (word, count) in counts {
            let weight = TITLE_WEIGHT * count.title_count + count.content_count;
            let posting = Posting {
                doc_id,
                weight,
                word: word.clone(),
            };
            self.inverted.entry(word).or_default().push(posting);
        }
    }
}
