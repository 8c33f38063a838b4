//! Line counting for report bookkeeping.
//!
//! Every line figure in the report comes from one rule: the number of
//! pieces a text splits into on `\n`. A trailing newline therefore counts as
//! one more (empty) line, and the empty string counts as one line. Keeping a
//! single rule is what keeps the `starts at line` annotations consistent.

/// Number of segments produced by splitting `text` on `\n`.
///
/// Equivalent to `text.split('\n').count()`, computed with a SIMD byte count.
///
/// # Examples
///
/// ```
/// use codebase_review::lines::split_line_count;
///
/// assert_eq!(split_line_count(""), 1);
/// assert_eq!(split_line_count("a\nb"), 2);
/// assert_eq!(split_line_count("a\nb\n"), 3);
/// ```
pub fn split_line_count(text: &str) -> usize {
    bytecount::count(text.as_bytes(), b'\n') + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_split() {
        for text in ["", "\n", "one", "one\n", "a\n\nb", "\n\n=====\n\n", "x\r\ny\r\n"] {
            assert_eq!(split_line_count(text), text.split('\n').count(), "{text:?}");
        }
    }

    #[test]
    fn test_trailing_newline_counts() {
        assert_eq!(split_line_count("line 1\nline 2\nline 3"), 3);
        assert_eq!(split_line_count("line 1\nline 2\nline 3\n"), 4);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(split_line_count("héllo\nwörld\n├──"), 3);
    }
}
