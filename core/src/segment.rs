use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex =
        Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
}

/// Text segmentation capability injected into the index and query path.
///
/// Implementations run in a recall-oriented mode: a single surface word may
/// yield overlapping sub-tokens in addition to the word itself. Callers are
/// responsible for case normalization.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Configuration for [`SearchSegmenter`]. Dictionary resources live at paths
/// supplied by the caller, never at baked-in constants.
#[derive(Debug, Clone, Default)]
pub struct SegmenterConfig {
    /// Optional stop-word list, one word per line, matched after lowercasing.
    pub stop_words: Option<PathBuf>,
}

/// Default segmenter: NFKC normalization, Unicode word extraction, and
/// recall-oriented sub-token emission. A compound word such as
/// `boost_filesystem` or `FileSystem` produces the whole token followed by
/// its parts, so queries on either form hit.
pub struct SearchSegmenter {
    stop_words: HashSet<String>,
}

impl SearchSegmenter {
    pub fn new(config: &SegmenterConfig) -> Result<Self> {
        let mut stop_words = HashSet::new();
        if let Some(path) = &config.stop_words {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading stop-word list {}", path.display()))?;
            for line in raw.lines() {
                let word = line.trim();
                if !word.is_empty() {
                    stop_words.insert(word.to_lowercase());
                }
            }
        }
        Ok(Self { stop_words })
    }

    fn is_stop_word(&self, token: &str) -> bool {
        !self.stop_words.is_empty() && self.stop_words.contains(&token.to_lowercase())
    }
}

impl Segmenter for SearchSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfkc().collect();
        let mut tokens = Vec::new();
        for mat in WORD_RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.is_stop_word(token) {
                continue;
            }
            tokens.push(token.to_string());
            for part in sub_tokens(token) {
                tokens.push(part.to_string());
            }
        }
        tokens
    }
}

/// Split a compound token at `_`, `'`, letter/digit transitions, and
/// lower-to-upper case boundaries. Returns nothing when the token has a
/// single part, so sub-tokens are only ever emitted alongside a longer whole.
fn sub_tokens(token: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    for (idx, ch) in token.char_indices() {
        let boundary = match (prev, ch) {
            (None, _) => false,
            (Some('_' | '\''), _) | (_, '_' | '\'') => true,
            (Some(p), c) => {
                (p.is_alphabetic() && c.is_numeric())
                    || (p.is_numeric() && c.is_alphabetic())
                    || (p.is_lowercase() && c.is_uppercase())
            }
        };
        if boundary {
            if idx > start {
                parts.push(&token[start..idx]);
            }
            start = idx;
        }
        prev = Some(ch);
    }
    if start < token.len() {
        parts.push(&token[start..]);
    }
    parts.retain(|p| !matches!(*p, "_" | "'"));
    if parts.len() < 2 {
        return Vec::new();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> SearchSegmenter {
        SearchSegmenter::new(&SegmenterConfig::default()).unwrap()
    }

    #[test]
    fn extracts_plain_words() {
        let toks = segmenter().segment("the quick brown fox");
        assert_eq!(toks, vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn compound_tokens_overlap_with_parts() {
        let toks = segmenter().segment("boost_filesystem");
        assert_eq!(toks, vec!["boost_filesystem", "boost", "filesystem"]);

        let toks = segmenter().segment("FileSystem");
        assert_eq!(toks, vec!["FileSystem", "File", "System"]);
    }

    #[test]
    fn digits_split_from_letters() {
        let toks = segmenter().segment("sha1");
        assert_eq!(toks, vec!["sha1", "sha", "1"]);
    }

    #[test]
    fn punctuation_is_not_a_token() {
        let toks = segmenter().segment("hello, world!");
        assert_eq!(toks, vec!["hello", "world"]);
    }

    #[test]
    fn nfkc_folds_compatibility_forms() {
        // fullwidth "ｆｏｏ" normalizes to ascii
        let toks = segmenter().segment("\u{ff46}\u{ff4f}\u{ff4f}");
        assert_eq!(toks, vec!["foo"]);
    }

    #[test]
    fn stop_words_come_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stop_words.txt");
        std::fs::write(&path, "the\nand\n").unwrap();
        let seg = SearchSegmenter::new(&SegmenterConfig { stop_words: Some(path) }).unwrap();
        let toks = seg.segment("The cat and dog");
        assert_eq!(toks, vec!["cat", "dog"]);
    }
}
