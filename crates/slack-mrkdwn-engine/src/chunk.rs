/// Maximum number of characters Slack accepts in a single text field.
pub const MAX_MESSAGE_CHARS: usize = 3000;

/// Splits `text` into consecutive slices of at most `max_chars` characters.
///
/// Counts Unicode scalar values, not bytes, so a split never lands inside a
/// multi-byte character. Empty text yields no chunks and a limit of zero is
/// treated as one.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}
