// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Punctuation-insensitive text matching.
//!
//! Search terms typed by the operator go through [`normalize`], stored
//! columns go through the SQL built by [`normalized_column`]. Both remove
//! the same fixed set, the 32 ASCII punctuation characters, so they land on
//! the same canonical form before a case-insensitive comparison. Nothing
//! depends on the locale of the database.

/// Bracket expression matching exactly the ASCII punctuation characters:
/// `!` to `/`, `:` to `@`, `[` to `` ` `` and `{` to `~`.
pub const STRIP_PATTERN: &str = "[!-/:-@\\[-`{-~]";

/// Remove every ASCII punctuation character from `input`.
///
/// Everything else, accented letters included, is kept in its original
/// order. Since `%`, `_` and `\` are stripped, the result is always safe to
/// use as a `LIKE` pattern without escaping.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// SQL expression that normalizes `column` inside the database.
pub fn normalized_column(column: &str) -> String {
    format!("regexp_replace({}, '{}', '', 'g')", column, STRIP_PATTERN)
}
