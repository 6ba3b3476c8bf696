//! Literal text search over a newline-joined document.
//!
//! All offsets are counted in chars so they line up with the buffer's
//! linear offset. Searching always wraps around the document boundary:
//! a term that occurs anywhere is always found.

/// Char offsets of every match start, overlapping matches included.
pub fn match_offsets(text: &str, term: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    if term.is_empty() {
        return offsets;
    }

    let mut byte_pos = 0;
    let mut char_pos = 0;
    while let Some(rel) = text[byte_pos..].find(term) {
        let start = byte_pos + rel;
        char_pos += text[byte_pos..start].chars().count();
        offsets.push(char_pos);

        // Step one char past the match start so overlapping matches are seen.
        let step = text[start..].chars().next().map_or(1, char::len_utf8);
        byte_pos = start + step;
        char_pos += 1;
        if byte_pos >= text.len() {
            break;
        }
    }
    offsets
}

/// First match starting at or after `from`, wrapping to the first match.
pub fn find_forward(text: &str, term: &str, from: usize) -> Option<usize> {
    let offsets = match_offsets(text, term);
    offsets
        .iter()
        .copied()
        .find(|&offset| offset >= from)
        .or_else(|| offsets.first().copied())
}

/// Last match starting strictly before `before`, wrapping to the last match.
pub fn find_backward(text: &str, term: &str, before: usize) -> Option<usize> {
    let offsets = match_offsets(text, term);
    offsets
        .iter()
        .rev()
        .copied()
        .find(|&offset| offset < before)
        .or_else(|| offsets.last().copied())
}

/// Byte index of the char at `offset`, or the text length past the end.
pub(crate) fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices().nth(offset).map_or(text.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_offsets_finds_all_occurrences() {
        assert_eq!(match_offsets("foo bar foo", "foo"), vec![0, 8]);
    }

    #[test]
    fn test_match_offsets_includes_overlaps() {
        assert_eq!(match_offsets("aaaa", "aa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_match_offsets_counts_chars_not_bytes() {
        assert_eq!(match_offsets("héllo\nhé", "hé"), vec![0, 6]);
    }

    #[test]
    fn test_empty_term_never_matches() {
        assert!(match_offsets("abc", "").is_empty());
        assert_eq!(find_forward("abc", "", 0), None);
        assert_eq!(find_backward("abc", "", 3), None);
    }

    #[test]
    fn test_find_forward_from_offset() {
        assert_eq!(find_forward("ab ab ab", "ab", 1), Some(3));
        assert_eq!(find_forward("ab ab ab", "ab", 3), Some(3));
    }

    #[test]
    fn test_find_forward_wraps_to_start() {
        assert_eq!(find_forward("ab ab", "ab", 4), Some(0));
        assert_eq!(find_forward("ab ab", "ab", 100), Some(0));
    }

    #[test]
    fn test_find_backward_before_offset() {
        assert_eq!(find_backward("ab ab ab", "ab", 6), Some(3));
        assert_eq!(find_backward("ab ab ab", "ab", 7), Some(6));
    }

    #[test]
    fn test_find_backward_wraps_to_end() {
        assert_eq!(find_backward("ab ab", "ab", 0), Some(3));
    }

    #[test]
    fn test_missing_term_is_not_found() {
        assert_eq!(find_forward("hello", "xyz", 0), None);
        assert_eq!(find_backward("hello", "xyz", 5), None);
    }

    #[test]
    fn test_byte_index_handles_multibyte_and_end() {
        assert_eq!(byte_index("héllo", 2), 3);
        assert_eq!(byte_index("héllo", 5), 6);
        assert_eq!(byte_index("héllo", 99), 6);
    }
}
