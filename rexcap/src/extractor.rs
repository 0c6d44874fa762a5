//! Extraction of structured match data from a compiled pattern.

use log::{debug, error};
use regex_automata::util::captures::Captures;
use regex_automata::PatternID;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::pattern::Pattern;

/// Half-open byte-offset interval `[start, end)` into the searched text.
///
/// Serializes as the two-element array `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte of the interval.
    pub start: usize,
    /// Offset one past the last byte of the interval.
    pub end: usize,
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.start)?;
        seq.serialize_element(&self.end)?;
        seq.end()
    }
}

/// One capturing group's outcome within a single match.
///
/// A group can fail to participate even when the overall pattern matches,
/// for example inside a non-taken alternative or an optional subgroup. Such
/// a group reports every field empty: `name` and `value` are empty strings
/// and `index` serializes as `[]`. A participating group with a zero-width
/// capture instead keeps its name and an empty `[n, n]` span.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Declared name of the group, empty if unnamed or non-participating.
    pub name: String,
    /// The captured substring, empty if non-participating.
    pub value: String,
    /// Byte span of the capture, `None` if non-participating.
    #[serde(serialize_with = "serialize_span_opt")]
    pub index: Option<Span>,
}

/// One match of the whole pattern against the text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Match {
    /// The full matched text.
    #[serde(rename = "match")]
    pub text: String,
    /// Byte span of the whole match.
    pub index: Span,
    /// One entry per capturing group, in ascending index order, the whole
    /// match excluded.
    pub groups: Vec<Group>,
}

/// All non-overlapping matches found in a text, in left-to-right scan
/// order.
///
/// Serializes as the object `{"matches": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MatchList {
    /// The matches; empty when the pattern matched nowhere.
    pub matches: Vec<Match>,
}

fn serialize_span_opt<S: Serializer>(
    span: &Option<Span>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match span {
        Some(span) => span.serialize(serializer),
        None => serializer.serialize_seq(Some(0))?.end(),
    }
}

impl Pattern {
    /// Scan `text` left to right and collect every non-overlapping match.
    ///
    /// Zero-length matches are valid and the engine advances past them, so
    /// the scan always terminates.
    #[must_use]
    pub fn find_matches(&self, text: &str) -> MatchList {
        let group_len = self.regex.group_info().group_len(PatternID::ZERO);
        let mut matches = Vec::new();

        for caps in self.regex.captures_iter(text) {
            let Some(overall) = caps.get_group(0) else {
                continue;
            };
            let Some(matched) = text.get(overall.start..overall.end) else {
                debug!("cannot slice match at {}..{}", overall.start, overall.end);
                continue;
            };

            matches.push(Match {
                text: matched.to_owned(),
                index: Span {
                    start: overall.start,
                    end: overall.end,
                },
                groups: (1..group_len)
                    .map(|index| self.extract_group(&caps, index, text))
                    .collect(),
            });
        }

        MatchList { matches }
    }

    /// Build the record for one capturing group of one match.
    ///
    /// A group that did not participate, or whose reported span cannot be
    /// sliced out of the text, degrades to the empty defaults without
    /// aborting the scan.
    fn extract_group(&self, caps: &Captures, index: usize, text: &str) -> Group {
        let Some(span) = caps.get_group(index) else {
            return Group::default();
        };
        let Some(value) = text.get(span.start..span.end) else {
            debug!("cannot slice group {index} at {}..{}", span.start, span.end);
            return Group::default();
        };

        Group {
            name: self.group_names.get(index).unwrap_or_default().to_owned(),
            value: value.to_owned(),
            index: Some(Span {
                start: span.start,
                end: span.end,
            }),
        }
    }
}

/// Compile `source` with the given flag bitmask and extract every match
/// from `text`.
///
/// Fails closed: a malformed pattern produces a diagnostic on the error
/// log and an empty match list, never an abort. Callers that need to
/// distinguish a bad pattern from a pattern that matched nowhere should
/// use [`Pattern::new`] directly.
#[must_use]
pub fn extract_matches(source: &str, text: &str, flags: u32) -> MatchList {
    match Pattern::new(source, flags) {
        Ok(pattern) => pattern.find_matches(text),
        Err(err) => {
            error!("Error during regex match: {err}");
            MatchList::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags;

    #[test]
    fn test_named_and_unnamed_groups() {
        let res = extract_matches(r"(?<year>\d{4})-(\d{2})", "2024-05 and 2023-11", 0);

        assert_eq!(res.matches.len(), 2);

        let m = &res.matches[0];
        assert_eq!(m.text, "2024-05");
        assert_eq!(m.index, Span { start: 0, end: 7 });
        assert_eq!(
            m.groups,
            vec![
                Group {
                    name: "year".to_owned(),
                    value: "2024".to_owned(),
                    index: Some(Span { start: 0, end: 4 }),
                },
                Group {
                    name: String::new(),
                    value: "05".to_owned(),
                    index: Some(Span { start: 5, end: 7 }),
                },
            ]
        );

        let m = &res.matches[1];
        assert_eq!(m.text, "2023-11");
        assert_eq!(m.index, Span { start: 12, end: 19 });
        assert_eq!(m.groups[0].value, "2023");
    }

    #[test]
    fn test_optional_group_not_participating() {
        let res = extract_matches("a(b)?c", "ac", 0);

        assert_eq!(res.matches.len(), 1);
        let m = &res.matches[0];
        assert_eq!(m.text, "ac");
        assert_eq!(m.index, Span { start: 0, end: 2 });
        assert_eq!(m.groups, vec![Group::default()]);
    }

    #[test]
    fn test_empty_capture_differs_from_non_participation() {
        // The group participates with a zero-width capture: it keeps its
        // span, unlike a group that did not participate at all.
        let res = extract_matches("a(b*)c", "ac", 0);

        let group = &res.matches[0].groups[0];
        assert_eq!(group.value, "");
        assert_eq!(group.index, Some(Span { start: 1, end: 1 }));
    }

    #[test]
    fn test_non_taken_alternative() {
        let res = extract_matches("(?<left>a)|(?<right>b)", "ab", 0);

        assert_eq!(res.matches.len(), 2);
        assert_eq!(res.matches[0].groups[0].name, "left");
        assert_eq!(res.matches[0].groups[0].value, "a");
        assert_eq!(res.matches[0].groups[1], Group::default());
        assert_eq!(res.matches[1].groups[0], Group::default());
        assert_eq!(res.matches[1].groups[1].name, "right");
        assert_eq!(res.matches[1].groups[1].value, "b");
    }

    #[test]
    fn test_named_group_identity_across_matches() {
        let res = extract_matches(r"(?<word>\w+)\W", "Hello, World!", 0);

        assert_eq!(res.matches.len(), 2);
        for m in &res.matches {
            assert_eq!(m.groups[0].name, "word");
        }
    }

    #[test]
    fn test_spans_are_increasing_and_consistent() {
        let text = "aa bb aa cc aa";
        let res = extract_matches("a+", text, 0);

        assert_eq!(res.matches.len(), 3);
        for m in &res.matches {
            assert_eq!(m.text, &text[m.index.start..m.index.end]);
        }
        for pair in res.matches.windows(2) {
            assert!(pair[0].index.end <= pair[1].index.start);
        }
    }

    #[test]
    fn test_group_value_matches_span() {
        let text = "x@y z@w";
        let res = extract_matches(r"(\w+)@(\w+)", text, 0);

        for m in &res.matches {
            for group in &m.groups {
                let span = group.index.unwrap();
                assert_eq!(group.value, &text[span.start..span.end]);
            }
        }
    }

    #[test]
    fn test_zero_length_matches_advance() {
        let res = extract_matches("a*", "bb", 0);

        let spans: Vec<_> = res.matches.iter().map(|m| m.index).collect();
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 0 },
                Span { start: 1, end: 1 },
                Span { start: 2, end: 2 },
            ]
        );
    }

    #[test]
    fn test_no_match_is_empty_list() {
        let res = extract_matches(r"\d+", "no digits here", 0);
        assert_eq!(res, MatchList::default());
    }

    #[test]
    fn test_malformed_pattern_fails_closed() {
        assert_eq!(extract_matches("(", "anything", 0), MatchList::default());
        assert_eq!(
            extract_matches(r"(?<word>[a-z]", "anything", 0),
            MatchList::default()
        );
    }

    #[test]
    fn test_case_insensitive_flag() {
        assert!(extract_matches("hello", "HELLO", 0).matches.is_empty());

        let mask = flags::resolve_flag("CASE_INSENSITIVE").unwrap();
        assert_eq!(extract_matches("hello", "HELLO", mask).matches.len(), 1);
    }

    #[test]
    fn test_multi_line_and_dot_all_flags() {
        assert!(extract_matches("^b", "a\nb", 0).matches.is_empty());
        assert_eq!(
            extract_matches("^b", "a\nb", flags::MULTI_LINE).matches.len(),
            1
        );

        assert!(extract_matches("a.b", "a\nb", 0).matches.is_empty());
        assert_eq!(
            extract_matches("a.b", "a\nb", flags::DOT_MATCHES_NEW_LINE)
                .matches
                .len(),
            1
        );
    }

    #[test]
    fn test_combined_flags() {
        let mask = flags::CASE_INSENSITIVE | flags::MULTI_LINE;
        let res = extract_matches("^hello", "x\nHELLO", mask);
        assert_eq!(res.matches.len(), 1);
        assert_eq!(res.matches[0].index, Span { start: 2, end: 7 });
    }

    #[test]
    fn test_offsets_are_byte_offsets() {
        let res = extract_matches("é", "aé", 0);
        assert_eq!(res.matches[0].index, Span { start: 1, end: 3 });
    }

    #[test]
    fn test_idempotence() {
        let first = extract_matches(r"(\w+)@(\w+)", "x@y z@w", 0);
        let second = extract_matches(r"(\w+)@(\w+)", "x@y z@w", 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_shape() {
        let res = extract_matches(r"(?<year>\d{4})-(\d{2})", "2024-05", 0);

        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            serde_json::json!({
                "matches": [{
                    "match": "2024-05",
                    "index": [0, 7],
                    "groups": [
                        {"name": "year", "value": "2024", "index": [0, 4]},
                        {"name": "", "value": "05", "index": [5, 7]},
                    ],
                }]
            })
        );
    }

    #[test]
    fn test_json_non_participating_group_index_is_empty_array() {
        let res = extract_matches("a(b)?c", "ac", 0);

        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            serde_json::json!({
                "matches": [{
                    "match": "ac",
                    "index": [0, 2],
                    "groups": [{"name": "", "value": "", "index": []}],
                }]
            })
        );
    }

    #[test]
    fn test_json_empty_match_list() {
        assert_eq!(
            serde_json::to_string(&MatchList::default()).unwrap(),
            r#"{"matches":[]}"#
        );
    }
}
