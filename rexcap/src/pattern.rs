//! Pattern compilation and group-name resolution.

use std::collections::HashMap;

use regex_automata::meta;
use regex_automata::PatternID;

use crate::flags;

/// A compiled regular expression plus its option bitmask.
///
/// Built once per search from a pattern string and a flag bitmask, and
/// never mutated afterwards. The group-name table is resolved eagerly at
/// construction so that lookups during extraction are infallible.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub(crate) regex: meta::Regex,
    pub(crate) group_names: GroupNames,
}

impl Pattern {
    /// Compile `source` with the given flag bitmask.
    ///
    /// See the [`flags`] module for the supported bits. Bits outside the
    /// public flag set are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern syntax is malformed.
    pub fn new(source: &str, flags: u32) -> Result<Self, Error> {
        let regex = meta::Regex::builder()
            .syntax(flags::syntax_config(flags))
            .build(source)
            .map_err(Error)?;
        let group_names = GroupNames::resolve(&regex);

        Ok(Self { regex, group_names })
    }

    /// Number of declared capturing groups, the whole match excluded.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.regex
            .group_info()
            .group_len(PatternID::ZERO)
            .saturating_sub(1)
    }

    /// The group-name table resolved for this pattern.
    #[must_use]
    pub fn group_names(&self) -> &GroupNames {
        &self.group_names
    }
}

/// Mapping from capturing-group index to declared name.
///
/// Indices are 1-based: group 0 is the whole match and is never named.
/// A group without a declared name is absent from the table.
#[derive(Clone, Debug, Default)]
pub struct GroupNames(HashMap<usize, String>);

impl GroupNames {
    /// Build the table from the group metadata of a compiled regex.
    ///
    /// Best effort: a pattern whose metadata exposes no names yields an
    /// empty table rather than an error.
    pub(crate) fn resolve(regex: &meta::Regex) -> Self {
        let info = regex.group_info();

        Self(
            (1..info.group_len(PatternID::ZERO))
                .filter_map(|index| {
                    info.to_name(PatternID::ZERO, index)
                        .map(|name| (index, name.to_owned()))
                })
                .collect(),
        )
    }

    /// Name declared for the given group index, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    /// Whether no group in the pattern declares a name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An error when compiling a pattern.
#[derive(Clone, Debug)]
pub struct Error(meta::BuildError);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
