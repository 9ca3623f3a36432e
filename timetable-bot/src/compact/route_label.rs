//! Route description compaction for button labels.
//!
//! A description like "Москва (Курский вокзал) → Петушки" is rewritten by
//! the phrase table, split into tokens, and every plain word is shrunk by
//! one shared ratio so the whole label approaches the character budget.

use std::borrow::Cow;

use super::abbreviate::abbreviate;
use super::tables::AbbreviationTables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    /// Run of alphabetic characters
    Word,
    /// Run of digits
    Number,
    /// The route separator together with the spaces around it
    Separator,
    /// Any other single character
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
}

/// Compact a route description towards `limit` characters.
///
/// Best effort: when the non-word parts alone exceed the limit the result
/// is still longer than `limit`. Tokens are never reordered and non-word
/// tokens are never changed.
pub fn compact(description: &str, limit: usize, tables: &AbbreviationTables) -> String {
    let cleaned = collapse_whitespace(&tables.apply_phrases(description));
    let tokens = tokenize(&cleaned, tables.separator().trim());

    let shrinkable =
        |t: &Token<'_>| t.kind == TokenKind::Word && !tables.is_table_output(t.text);

    let (words_len, others_len) = tokens.iter().fold((0usize, 0usize), |(w, o), t| {
        let n = t.text.chars().count();
        if shrinkable(t) { (w + n, o) } else { (w, o + n) }
    });

    if words_len == 0 {
        return cleaned;
    }

    let ratio = ((limit as f64 - others_len as f64) / words_len as f64).clamp(0.0, 1.0);

    let joined: String = tokens
        .iter()
        .map(|t| {
            if shrinkable(t) {
                Cow::Owned(abbreviate(t.text, ratio, tables))
            } else {
                Cow::Borrowed(t.text)
            }
        })
        .collect();

    collapse_whitespace(&joined)
}

/// Build and compact the "origin → destination" label for two titles.
///
/// # Examples
///
/// ```
/// use timetable_bot::compact::{AbbreviationTables, route_label};
///
/// let tables = AbbreviationTables::russian().unwrap();
/// let label = route_label("Москва (Курский вокзал)", "Петушки", 38, &tables);
/// assert_eq!(label, "Москва → Петушки");
/// ```
pub fn route_label(
    origin: &str,
    destination: &str,
    limit: usize,
    tables: &AbbreviationTables,
) -> String {
    let description = format!("{origin}{}{destination}", tables.separator());
    compact(&description, limit, tables)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into word, number, separator and single-character tokens.
fn tokenize<'a>(text: &'a str, separator: &str) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some(len) = separator_len(rest, separator) {
            tokens.push(Token {
                kind: TokenKind::Separator,
                text: &rest[..len],
            });
            pos += len;
            continue;
        }

        // rest is non-empty here
        let Some(first) = rest.chars().next() else {
            break;
        };

        let (kind, len) = if first.is_alphabetic() {
            (TokenKind::Word, run_len(rest, char::is_alphabetic))
        } else if first.is_numeric() {
            (TokenKind::Number, run_len(rest, char::is_numeric))
        } else {
            (TokenKind::Other, first.len_utf8())
        };

        tokens.push(Token {
            kind,
            text: &rest[..len],
        });
        pos += len;
    }

    tokens
}

/// Byte length of a separator (with surrounding whitespace) at the start
/// of `rest`, if there is one.
fn separator_len(rest: &str, separator: &str) -> Option<usize> {
    if separator.is_empty() {
        return None;
    }

    let lead = rest.len() - rest.trim_start().len();
    if !rest[lead..].starts_with(separator) {
        return None;
    }

    let after = lead + separator.len();
    let trail = rest[after..].len() - rest[after..].trim_start().len();
    Some(after + trail)
}

fn run_len(s: &str, pred: fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map_or(s.len(), |(i, _)| i)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn place() -> impl Strategy<Value = String> {
        proptest::collection::vec("[абвгдежз]{1,8}", 1..4).prop_map(|w| w.join(" "))
    }

    proptest! {
        /// With enough room the label is the description with whitespace collapsed
        #[test]
        fn no_op_under_budget(from in place(), to in place()) {
            let tables = AbbreviationTables::russian().unwrap();
            let description = format!("{from} →  {to}");
            let expected = format!("{from} → {to}");
            let limit = expected.chars().count();
            prop_assert_eq!(compact(&description, limit, &tables), expected);
        }

        /// The separator and the digits survive any budget
        #[test]
        fn others_preserved(from in place(), to in place(), n in 1u32..999, limit in 0usize..40) {
            let tables = AbbreviationTables::russian().unwrap();
            let label = route_label(&format!("{from}-{n}"), &to, limit, &tables);
            let expected_suffix = format!("-{n} → ");
            prop_assert!(label.contains(&expected_suffix));
        }

        /// A tighter budget never gives a longer label
        #[test]
        fn tighter_is_not_longer(from in place(), to in place(), a in 0usize..40, b in 0usize..40) {
            let tables = AbbreviationTables::russian().unwrap();
            let (lo, hi) = (a.min(b), a.max(b));
            let short = route_label(&from, &to, lo, &tables);
            let long = route_label(&from, &to, hi, &tables);
            prop_assert!(short.chars().count() <= long.chars().count());
        }
    }
}
