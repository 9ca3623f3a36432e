//! Single-word abbreviation.

use super::tables::AbbreviationTables;

/// Shrink `word` to roughly `shrink_ratio` of its length.
///
/// Dictionary entries win over everything else. Otherwise the word is cut
/// right after the consonant closest to the target length (ties go to the
/// earlier consonant). The word comes back unchanged when no shrink is
/// needed, when it has no consonants, or when the cut would only save a
/// single character.
///
/// # Examples
///
/// ```
/// use timetable_bot::compact::{AbbreviationTables, abbreviate};
///
/// let tables = AbbreviationTables::russian().unwrap();
/// assert_eq!(abbreviate("Курский", 0.5, &tables), "Курс");
/// assert_eq!(abbreviate("Московский", 0.5, &tables), "Моск");
/// assert_eq!(abbreviate("Курский", 1.0, &tables), "Курский");
/// ```
pub fn abbreviate(word: &str, shrink_ratio: f64, tables: &AbbreviationTables) -> String {
    if let Some(replacement) = tables.substitute_word(word) {
        return replacement;
    }

    if shrink_ratio >= 1.0 {
        return word.to_string();
    }

    let chars: Vec<char> = word.chars().collect();
    let target = chars.len() as f64 * shrink_ratio;

    // min_by keeps the first of equal elements, so ties resolve to the
    // smaller index.
    let cut = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| tables.is_consonant(**c))
        .map(|(i, _)| i)
        .min_by(|a, b| {
            let da = (*a as f64 - target).abs();
            let db = (*b as f64 - target).abs();
            da.total_cmp(&db)
        });

    let Some(cut) = cut else {
        return word.to_string();
    };

    let kept = cut + 1;
    if chars.len() - kept <= 1 {
        return word.to_string();
    }

    chars[..kept].iter().collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Without a dictionary hit the result is always a prefix of the word
        #[test]
        fn result_is_prefix(word in "[абвгдежз]{0,15}", ratio in 0.0f64..1.5) {
            let tables = AbbreviationTables::russian().unwrap();
            let short = abbreviate(&word, ratio, &tables);
            prop_assert!(word.starts_with(&short));
        }

        /// A cut never removes exactly one character
        #[test]
        fn never_saves_just_one(word in "[абвгдежз]{1,15}", ratio in 0.0f64..1.0) {
            let tables = AbbreviationTables::russian().unwrap();
            let short = abbreviate(&word, ratio, &tables);
            prop_assert_ne!(short.chars().count() + 1, word.chars().count());
        }
    }
}
