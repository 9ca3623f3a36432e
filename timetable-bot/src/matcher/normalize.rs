//! Query and title normalization.

/// Fold letter variants that users type interchangeably.
pub fn fold_letters(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'ё' => 'е',
            'Ё' => 'Е',
            other => other,
        })
        .collect()
}

/// Normalize raw user input: collapse whitespace, trim, lowercase and fold
/// letter variants.
///
/// # Examples
///
/// ```
/// use timetable_bot::matcher::normalize_query;
///
/// assert_eq!(normalize_query("  Орехово   Зуево "), "орехово зуево");
/// assert_eq!(normalize_query("Щёлково"), "щелково");
/// ```
pub fn normalize_query(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    fold_letters(&collapsed.to_lowercase())
}

/// Normalize a directory title for comparison with a normalized query.
pub fn normalize_title(title: &str) -> String {
    fold_letters(title).to_lowercase()
}
