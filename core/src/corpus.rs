use anyhow::{bail, Result};

/// Field separator in the corpus file. Chosen because it cannot appear in
/// well-formed field content; the preprocessor strips it from every field.
pub const FIELD_DELIMITER: char = '\u{3}';

/// One parsed line of the corpus file: `title \x03 url \x03 content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRecord {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Split a corpus line into its three fields.
///
/// Consecutive delimiters are not compressed, so empty fields survive as
/// empty strings. Any field count other than exactly three is a malformed
/// record; the error covers that line only.
pub fn parse_record(line: &str) -> Result<CorpusRecord> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != 3 {
        bail!("expected 3 fields, got {}", fields.len());
    }
    Ok(CorpusRecord {
        title: fields[0].to_string(),
        url: fields[1].to_string(),
        content: fields[2].to_string(),
    })
}
