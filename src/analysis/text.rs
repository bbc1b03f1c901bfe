//! Small text utilities shared by the analyzers

use unicode_segmentation::UnicodeSegmentation;

/// Length in characters (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to at most `max_chars` characters, appending "..." when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if char_len(text) <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Split into trimmed, non-empty sentences using Unicode sentence boundaries.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Unicode words in order of appearance.
pub fn words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// True when `text[start..end]` is not glued to surrounding word characters.
///
/// A trailing `+` or `#` also counts as glued so that "c" never matches
/// inside "c++" or "c#".
pub fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric() && c != '_');
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric() && c != '_' && c != '+' && c != '#');
    before_ok && after_ok
}

/// The sentence containing byte offset `pos`, trimmed and capped at `max_chars`.
///
/// Sentences end at a newline or at `.`, `!`, `?` followed by whitespace, so
/// dotted names like "Node.js" stay intact.
pub fn sentence_around(text: &str, pos: usize, max_chars: usize) -> String {
    let bytes = text.as_bytes();
    let is_terminator = |i: usize| -> bool {
        match bytes[i] {
            b'\n' => true,
            b'.' | b'!' | b'?' => bytes.get(i + 1).map_or(true, |b| b.is_ascii_whitespace()),
            _ => false,
        }
    };

    let pos = pos.min(text.len());
    let mut start = 0;
    for i in (0..pos).rev() {
        if is_terminator(i) {
            start = i + 1;
            break;
        }
    }

    let mut end = text.len();
    for i in pos..text.len() {
        if is_terminator(i) {
            end = if bytes[i] == b'\n' { i } else { i + 1 };
            break;
        }
    }

    truncate_chars(text[start..end].trim(), max_chars)
}

/// Count phrases from `phrases` that occur in the lowercased text; each phrase counts once.
pub fn matched_phrases<'a>(lowered: &str, phrases: &[&'a str]) -> Vec<&'a str> {
    phrases
        .iter()
        .filter(|p| lowered.contains(**p))
        .copied()
        .collect()
}
