//! Segment diff between two strings, for highlighting a changed value inline.
//!
//! Alignment is a longest-common-subsequence table. Short strings are aligned
//! character by character, longer ones by whitespace/non-whitespace tokens,
//! and anything past [`MAX_DIFF_CHARS`] is not diffed at all.
//!
//! All lengths are in Unicode scalar values.

use serde::{Deserialize, Serialize};

/// Either input longer than this gives no segments.
pub const MAX_DIFF_CHARS: usize = 5_000;
/// Either input longer than this is aligned by word tokens.
pub const WORD_DIFF_CHARS: usize = 200;

// ── Types ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Equal,
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub value: String,
}

impl Segment {
    fn new(kind: SegmentKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into() }
    }
}

// ── Tokenizing ────────────────────────────────────────────────────────────

fn token_regex() -> &'static regex::Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"\S+|\s+").unwrap())
}

/// Split into alternating runs of whitespace and non-whitespace.
pub fn tokenize(text: &str) -> Vec<&str> {
    token_regex().find_iter(text).map(|m| m.as_str()).collect()
}

fn chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, c)| &text[i..i + c.len_utf8()])
        .collect()
}

// ── Public API ────────────────────────────────────────────────────────────

/// Diff `a` against `b`.
///
/// Returns `None` when either side exceeds [`MAX_DIFF_CHARS`]; callers show the
/// two values whole instead.
///
/// ```
/// use json_lens::text_diff::{char_diff, segments_dst, SegmentKind};
///
/// let segs = char_diff("cat", "cut").unwrap();
/// assert_eq!(segs[0].kind, SegmentKind::Equal);
/// assert_eq!(segments_dst(&segs), "cut");
/// ```
pub fn char_diff(a: &str, b: &str) -> Option<Vec<Segment>> {
    if a == b {
        return Some(vec![Segment::new(SegmentKind::Equal, a)]);
    }
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len > MAX_DIFF_CHARS || b_len > MAX_DIFF_CHARS {
        tracing::debug!(a_len, b_len, limit = MAX_DIFF_CHARS, "strings too long for segment diff");
        return None;
    }
    if a_len > WORD_DIFF_CHARS || b_len > WORD_DIFF_CHARS {
        Some(diff_tokens(&tokenize(a), &tokenize(b)))
    } else {
        Some(diff_tokens(&chars(a), &chars(b)))
    }
}

/// Align two token sequences and return merged segments.
///
/// When both sides could be consumed at a mismatch, the backtrack consumes
/// the right side first, so a replacement comes out as remove then add.
pub fn diff_tokens(a: &[&str], b: &[&str]) -> Vec<Segment> {
    let (m, n) = (a.len(), b.len());
    let width = n + 1;
    let mut table = vec![0u16; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            table[i * width + j] = if a[i - 1] == b[j - 1] {
                table[(i - 1) * width + j - 1] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + j - 1])
            };
        }
    }

    let mut reversed: Vec<(SegmentKind, &str)> = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            reversed.push((SegmentKind::Equal, a[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i * width + j - 1] >= table[(i - 1) * width + j]) {
            reversed.push((SegmentKind::Add, b[j - 1]));
            j -= 1;
        } else {
            reversed.push((SegmentKind::Remove, a[i - 1]));
            i -= 1;
        }
    }

    let mut out: Vec<Segment> = Vec::new();
    for (kind, text) in reversed.into_iter().rev() {
        match out.last_mut() {
            Some(last) if last.kind == kind => last.value.push_str(text),
            _ => out.push(Segment::new(kind, text)),
        }
    }
    out
}

/// Rebuild the left input from `equal` and `remove` segments.
pub fn segments_src(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Add)
        .map(|s| s.value.as_str())
        .collect()
}

/// Rebuild the right input from `equal` and `add` segments.
pub fn segments_dst(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Remove)
        .map(|s| s.value.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(kind: SegmentKind, value: &str) -> Segment {
        Segment::new(kind, value)
    }

    #[test]
    fn identical_is_one_equal_segment() {
        assert_eq!(char_diff("same", "same"), Some(vec![seg(SegmentKind::Equal, "same")]));
    }

    #[test]
    fn word_tokens_replace_one_word() {
        let segs = diff_tokens(&tokenize("hello world"), &tokenize("hello there"));
        assert_eq!(
            segs,
            vec![
                seg(SegmentKind::Equal, "hello "),
                seg(SegmentKind::Remove, "world"),
                seg(SegmentKind::Add, "there"),
            ]
        );
    }

    #[test]
    fn char_level_for_short_strings() {
        let segs = char_diff("cat", "cut").unwrap();
        assert_eq!(
            segs,
            vec![
                seg(SegmentKind::Equal, "c"),
                seg(SegmentKind::Remove, "a"),
                seg(SegmentKind::Add, "u"),
                seg(SegmentKind::Equal, "t"),
            ]
        );
    }

    #[test]
    fn pure_insertion() {
        let segs = char_diff("ac", "abc").unwrap();
        assert_eq!(
            segs,
            vec![
                seg(SegmentKind::Equal, "a"),
                seg(SegmentKind::Add, "b"),
                seg(SegmentKind::Equal, "c"),
            ]
        );
    }

    #[test]
    fn empty_side() {
        assert_eq!(char_diff("", "ab"), Some(vec![seg(SegmentKind::Add, "ab")]));
        assert_eq!(char_diff("ab", ""), Some(vec![seg(SegmentKind::Remove, "ab")]));
    }

    #[test]
    fn long_strings_are_word_aligned() {
        let base = "word ".repeat(50);
        let a = format!("{base}alpha");
        let b = format!("{base}beta");
        let segs = char_diff(&a, &b).unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1], seg(SegmentKind::Remove, "alpha"));
        assert_eq!(segs[2], seg(SegmentKind::Add, "beta"));
    }

    #[test]
    fn oversized_input_is_skipped() {
        let big = "x".repeat(MAX_DIFF_CHARS + 1);
        assert_eq!(char_diff(&big, "x"), None);
        assert_eq!(char_diff("x", &big), None);
    }

    #[test]
    fn multibyte_chars_stay_whole() {
        let segs = char_diff("héllo", "hallo").unwrap();
        assert_eq!(segments_src(&segs), "héllo");
        assert_eq!(segments_dst(&segs), "hallo");
        assert!(segs.iter().any(|s| s.value == "é"));
    }

    #[test]
    fn tokenize_alternates_runs() {
        assert_eq!(tokenize("a  bc\td"), vec!["a", "  ", "bc", "\t", "d"]);
    }

    #[test]
    fn segment_serializes_with_type_key() {
        let out = serde_json::to_string(&seg(SegmentKind::Add, "x")).unwrap();
        assert_eq!(out, r#"{"type":"add","value":"x"}"#);
    }
}
