//! **rexcap** runs a regex search over a text and returns every
//! non-overlapping match as structured data: the matched text, its byte
//! span, and one record per capturing group (named or not) with the
//! captured value and span.
//!
//! Matching is delegated to the [`regex-automata`] meta regex engine; this
//! crate is a structured consumer of its match API. Engine options are
//! selected through a flag bitmask whose bits are resolved from symbolic
//! names by the [`flags`] module.
//!
//! ```
//! use rexcap::{flags, Pattern};
//!
//! let mask = flags::resolve_flag("CASE_INSENSITIVE").unwrap_or(0);
//! let pattern = Pattern::new(r"(?<word>[a-z]+)", mask)?;
//! let result = pattern.find_matches("Hello, World");
//!
//! assert_eq!(result.matches.len(), 2);
//! assert_eq!(result.matches[0].groups[0].name, "word");
//! assert_eq!(result.matches[1].text, "World");
//! # Ok::<(), rexcap::Error>(())
//! ```
//!
//! [`regex-automata`]: https://docs.rs/regex-automata

mod extractor;
pub use extractor::{extract_matches, Group, Match, MatchList, Span};
pub mod flags;
mod pattern;
pub use pattern::{Error, GroupNames, Pattern};
