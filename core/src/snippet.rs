/// Maximum snippet length in bytes. Truncated snippets are exactly this long.
const DESC_LEN: usize = 160;
/// Bytes of leading context kept before the first match.
const LEAD_LEN: usize = 60;
const ELLIPSIS: &str = "...";

/// Extract the result description for one document: a bounded excerpt of
/// `content` around the first case-sensitive occurrence of `word`.
///
/// When the word is absent (the hit matched only in the title), short content
/// is returned whole and long content becomes its first 160 bytes with the
/// final three overwritten by an ellipsis. When the word is found, the window
/// starts 60 bytes before the match; a window reaching the end of the
/// document is returned unmodified, otherwise it is truncated to 160 bytes
/// with the ellipsis again replacing the tail rather than extending it.
pub fn generate_desc(content: &str, word: &str) -> String {
    let Some(pos) = content.find(word) else {
        if content.len() < DESC_LEN {
            return content.to_string();
        }
        return truncate_window(content, 0);
    };
    let begin = floor_boundary(content, pos.saturating_sub(LEAD_LEN));
    if begin + DESC_LEN >= content.len() {
        return content[begin..].to_string();
    }
    truncate_window(content, begin)
}

/// Take the 160-byte window at `begin` and overwrite its last three bytes
/// with the ellipsis. All cut points are clamped to character boundaries, so
/// multi-byte text never panics and short windows never underflow.
fn truncate_window(content: &str, begin: usize) -> String {
    let end = floor_boundary(content, begin + DESC_LEN);
    let keep = floor_boundary(content, end.saturating_sub(ELLIPSIS.len()).max(begin));
    let mut desc = String::with_capacity(DESC_LEN);
    desc.push_str(&content[begin..keep]);
    desc.push_str(ELLIPSIS);
    desc
}

/// Largest char boundary at or below `pos`.
fn floor_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut pos = pos;
    while !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
