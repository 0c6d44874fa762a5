//! Symbolic names for the engine's matching options.
//!
//! Each flag is one bit of the `u32` bitmask accepted by
//! [`Pattern::new`](crate::Pattern::new), and toggles one syntax option of
//! the underlying engine. Flags combine with bitwise OR.

use regex_automata::util::syntax;

/// Letters match without regard to case.
pub const CASE_INSENSITIVE: u32 = 1 << 0;

/// `^` and `$` match at line boundaries instead of text boundaries.
pub const MULTI_LINE: u32 = 1 << 1;

/// `.` also matches the line terminator.
pub const DOT_MATCHES_NEW_LINE: u32 = 1 << 2;

/// Whitespace in the pattern is ignored and `#` starts a comment.
pub const IGNORE_WHITESPACE: u32 = 1 << 3;

/// Repetition operators are lazy by default and `?` makes them greedy.
pub const SWAP_GREED: u32 = 1 << 4;

/// Line anchors also treat `\r\n` as a single line terminator.
pub const CRLF: u32 = 1 << 5;

/// `\123`-style octal escapes are recognized.
pub const OCTAL: u32 = 1 << 6;

const FLAG_TABLE: &[(&str, u32)] = &[
    ("CASE_INSENSITIVE", CASE_INSENSITIVE),
    ("MULTI_LINE", MULTI_LINE),
    ("DOT_MATCHES_NEW_LINE", DOT_MATCHES_NEW_LINE),
    ("IGNORE_WHITESPACE", IGNORE_WHITESPACE),
    ("SWAP_GREED", SWAP_GREED),
    ("CRLF", CRLF),
    ("OCTAL", OCTAL),
];

/// Resolve a symbolic flag name to its bit value.
///
/// The lookup is exact and case-sensitive. Returns `None` for a name that
/// is not part of the engine's flag set.
#[must_use]
pub fn resolve_flag(name: &str) -> Option<u32> {
    FLAG_TABLE
        .iter()
        .find(|(flag_name, _)| *flag_name == name)
        .map(|(_, value)| *value)
}

/// The full set of flag names understood by [`resolve_flag`], with their
/// bit values.
#[must_use]
pub fn flag_table() -> &'static [(&'static str, u32)] {
    FLAG_TABLE
}

/// Translate a flag bitmask into the engine's syntax configuration.
///
/// Bits outside the public flag set are ignored.
pub(crate) fn syntax_config(flags: u32) -> syntax::Config {
    syntax::Config::new()
        .case_insensitive(flags & CASE_INSENSITIVE != 0)
        .multi_line(flags & MULTI_LINE != 0)
        .dot_matches_new_line(flags & DOT_MATCHES_NEW_LINE != 0)
        .ignore_whitespace(flags & IGNORE_WHITESPACE != 0)
        .swap_greed(flags & SWAP_GREED != 0)
        .crlf(flags & CRLF != 0)
        .octal(flags & OCTAL != 0)
}
