//! Substitution tables for label compaction.
//!
//! Tables are plain data: a consonant set, a word dictionary keyed by the
//! lowercase word, and an ordered list of phrase rewrites. They are built
//! once at startup and shared read-only.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

/// Error building substitution tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A phrase pattern failed to compile
    #[error("invalid phrase pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How a word rule matches its source word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCase {
    /// Only the exact spelling matches.
    Sensitive,
    /// Any capitalisation matches; the replacement is used as written.
    Insensitive,
    /// Any capitalisation matches; the replacement is title-cased when the
    /// source word starts with an uppercase letter.
    InsensitiveTitled,
}

#[derive(Debug, Clone)]
struct WordRule {
    source: String,
    replacement: String,
    case: WordCase,
}

impl WordRule {
    fn apply(&self, word: &str) -> Option<String> {
        if self.case == WordCase::Sensitive && self.source != word {
            return None;
        }

        let capitalised = word.chars().next().is_some_and(char::is_uppercase);
        if self.case == WordCase::InsensitiveTitled && capitalised {
            return Some(title_case(&self.replacement));
        }

        Some(self.replacement.clone())
    }
}

#[derive(Debug, Clone)]
struct PhraseRule {
    pattern: Regex,
    replacement: String,
}

/// Consonants, word dictionary and phrase rewrites for one language.
#[derive(Debug, Clone)]
pub struct AbbreviationTables {
    consonants: BTreeSet<char>,
    words: BTreeMap<String, WordRule>,
    phrases: Vec<PhraseRule>,
    /// Lowercased replacement values; tokens equal to one are left alone.
    outputs: BTreeSet<String>,
    separator: String,
}

impl AbbreviationTables {
    /// Empty tables with the given consonant alphabet and route separator.
    pub fn new(consonants: &str, separator: impl Into<String>) -> Self {
        Self {
            consonants: consonants.chars().flat_map(char::to_lowercase).collect(),
            words: BTreeMap::new(),
            phrases: Vec::new(),
            outputs: BTreeSet::new(),
            separator: separator.into(),
        }
    }

    /// Add a word substitution. A later rule for the same word replaces an
    /// earlier one.
    pub fn with_word(
        mut self,
        source: impl Into<String>,
        replacement: impl Into<String>,
        case: WordCase,
    ) -> Self {
        let source = source.into();
        let replacement = replacement.into();
        self.remember_output(&replacement);
        self.words.insert(
            source.to_lowercase(),
            WordRule {
                source,
                replacement,
                case,
            },
        );
        self
    }

    /// Add a phrase rewrite. Phrases are applied in insertion order.
    pub fn with_phrase(
        mut self,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, TableError> {
        let compiled = Regex::new(pattern).map_err(|source| TableError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let replacement = replacement.into();
        self.remember_output(&replacement);
        self.phrases.push(PhraseRule {
            pattern: compiled,
            replacement,
        });
        Ok(self)
    }

    /// Tables for Russian station and settlement names.
    pub fn russian() -> Result<Self, TableError> {
        let tables = Self::new(
            "бвгджзйклмнпрстфхцчшщbcdfghjklmnpqrstvwxz",
            " → ",
        )
        .with_phrase(r"\s*\([^)]*\)", "")?
        .with_phrase(r"Санкт-Петербург", "СПб")?
        .with_phrase(r"Нижний Новгород", "Н.Новгород")?
        .with_phrase(r"Ростов-на-Дону", "Ростов-н/Д")?
        .with_phrase(r"(?i)\bимени\b", "им.")?
        .with_word("Новый", "Н.", WordCase::Sensitive)
        .with_word("Московский", "моск", WordCase::InsensitiveTitled)
        .with_word("Московская", "моск", WordCase::InsensitiveTitled)
        .with_word("Ленинградский", "ленингр", WordCase::InsensitiveTitled)
        .with_word("Белорусский", "белорус", WordCase::InsensitiveTitled)
        .with_word("Ярославский", "яросл", WordCase::InsensitiveTitled)
        .with_word("Казанский", "казан", WordCase::InsensitiveTitled)
        .with_word("Аэропорт", "а/п", WordCase::InsensitiveTitled)
        .with_word("вокзал", "вкз", WordCase::Insensitive)
        .with_word("платформа", "пл", WordCase::Insensitive)
        .with_word("станция", "ст", WordCase::Insensitive)
        .with_word("километр", "км", WordCase::Insensitive);

        Ok(tables)
    }

    /// Whether `c` is a consonant, ignoring case.
    pub fn is_consonant(&self, c: char) -> bool {
        c.to_lowercase().all(|l| self.consonants.contains(&l))
    }

    /// Dictionary replacement for `word`, if any.
    pub fn substitute_word(&self, word: &str) -> Option<String> {
        self.words.get(&word.to_lowercase())?.apply(word)
    }

    /// Apply every phrase rewrite in order.
    pub fn apply_phrases(&self, text: &str) -> String {
        self.phrases
            .iter()
            .fold(text.to_string(), |acc, rule| {
                rule.pattern
                    .replace_all(&acc, rule.replacement.as_str())
                    .into_owned()
            })
    }

    /// Whether `token` is (ignoring case) something the tables produce.
    pub fn is_table_output(&self, token: &str) -> bool {
        self.outputs.contains(&token.to_lowercase())
    }

    /// Glyph (with its spacing) joining origin and destination.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn remember_output(&mut self, replacement: &str) {
        if !replacement.trim().is_empty() {
            self.outputs.insert(replacement.to_lowercase());
        }
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
