//! Ranking and paging of point candidates.
//!
//! Candidates are split into match tiers (exact, prefix, substring), each
//! tier lists stations before settlements, and the result is capped and cut
//! into pages of buttons.

use tracing::error;

use crate::domain::Point;

use super::config::MatchConfig;
use super::error::MatchError;
use super::normalize::{normalize_query, normalize_title};

/// How well a candidate title matches the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Title equals the query
    Exact,
    /// Title starts with the query
    StartsWith,
    /// Query appears elsewhere in the title
    Substring,
}

/// Prefilter the directory should apply before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Only titles equal to the query
    Strict,
    /// Titles containing the query anywhere
    Loose,
}

/// Candidates partitioned by tier, each tier in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedPoints {
    pub exact: Vec<Point>,
    pub starts_with: Vec<Point>,
    pub substring: Vec<Point>,
}

impl RankedPoints {
    /// Total number of ranked points.
    pub fn len(&self) -> usize {
        self.exact.len() + self.starts_with.len() + self.substring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tiers in order, truncated to `max_results`.
    pub fn into_ordered(self, max_results: usize) -> Vec<Point> {
        self.exact
            .into_iter()
            .chain(self.starts_with)
            .chain(self.substring)
            .take(max_results)
            .collect()
    }
}

/// What the button row under a page offers besides the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Further pages remain
    More,
    /// This is the last page
    NoneOfThese,
}

impl PageAction {
    /// Action for the page at `page_index` out of `total_pages`.
    pub fn for_page(page_index: usize, total_pages: usize) -> Self {
        if page_index + 1 < total_pages {
            PageAction::More
        } else {
            PageAction::NoneOfThese
        }
    }
}

/// Normalize raw input and check it is long enough to search for.
pub fn prepare_query(raw: &str, config: &MatchConfig) -> Result<String, MatchError> {
    let query = normalize_query(raw);
    if query.chars().count() < config.min_query_chars {
        return Err(MatchError::InputTooShort {
            min: config.min_query_chars,
        });
    }
    Ok(query)
}

/// Which directory prefilter a normalized query calls for.
pub fn lookup_strictness(query: &str, config: &MatchConfig) -> Strictness {
    if query.chars().count() == config.strict_query_chars {
        Strictness::Strict
    } else {
        Strictness::Loose
    }
}

/// Tier of a normalized title against a normalized query.
pub fn classify(title: &str, query: &str) -> Option<MatchTier> {
    if title == query {
        Some(MatchTier::Exact)
    } else if title.starts_with(query) {
        Some(MatchTier::StartsWith)
    } else if title.contains(query) {
        Some(MatchTier::Substring)
    } else {
        None
    }
}

/// Partition candidates into tiers for a normalized query.
///
/// Within a tier the sort is stable: stations come first, and points of the
/// same kind keep the order the directory gave them.
pub fn rank(
    query: &str,
    candidates: impl IntoIterator<Item = Point>,
) -> Result<RankedPoints, MatchError> {
    let mut ranked = RankedPoints::default();

    for point in candidates {
        let title = normalize_title(&point.title);
        match classify(&title, query) {
            Some(MatchTier::Exact) => ranked.exact.push(point),
            Some(MatchTier::StartsWith) => ranked.starts_with.push(point),
            Some(MatchTier::Substring) => ranked.substring.push(point),
            None => {
                error!(point = %point.id, title = %point.title, query, "candidate falls into no match tier");
                return Err(MatchError::UnclassifiedCandidate {
                    title: point.title,
                    query: query.to_string(),
                });
            }
        }
    }

    for tier in [
        &mut ranked.exact,
        &mut ranked.starts_with,
        &mut ranked.substring,
    ] {
        tier.sort_by_key(|p| p.kind);
    }

    Ok(ranked)
}

/// Cut `points` into consecutive pages of `page_size`.
pub fn paginate(points: Vec<Point>, page_size: usize) -> Vec<Vec<Point>> {
    points
        .chunks(page_size.max(1))
        .map(<[Point]>::to_vec)
        .collect()
}

/// Rank candidates for raw user input and page the result.
///
/// The candidates are whatever the directory returned for the query's
/// strictness; their order does not matter beyond tie-breaking.
pub fn select(
    raw_input: &str,
    candidates: impl IntoIterator<Item = Point>,
    config: &MatchConfig,
) -> Result<Vec<Vec<Point>>, MatchError> {
    let query = prepare_query(raw_input, config)?;
    let ranked = rank(&query, candidates)?;

    if ranked.is_empty() {
        return Err(MatchError::NoMatch);
    }

    Ok(paginate(
        ranked.into_ordered(config.max_results),
        config.page_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PointCode, PointKind};

    fn station(title: &str) -> Point {
        point(PointKind::Station, title)
    }

    fn settlement(title: &str) -> Point {
        point(PointKind::Settlement, title)
    }

    fn point(kind: PointKind, title: &str) -> Point {
        Point::new(kind, title, "Московская область", None)
    }

    fn titles(points: &[Point]) -> Vec<&str> {
        points.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn too_short_input() {
        let config = MatchConfig::default();
        let err = select(" м  ", vec![station("Мосты")], &config).unwrap_err();
        assert_eq!(err, MatchError::InputTooShort { min: 2 });
    }

    #[test]
    fn empty_candidates_is_no_match() {
        let config = MatchConfig::default();
        let err = select("мос", Vec::new(), &config).unwrap_err();
        assert_eq!(err, MatchError::NoMatch);
    }

    #[test]
    fn tiers_with_stations_first() {
        let ranked = rank(
            "мос",
            vec![
                settlement("Москва"),
                station("Мосты"),
                station("Подмосковная"),
            ],
        )
        .unwrap();

        assert!(ranked.exact.is_empty());
        assert_eq!(titles(&ranked.starts_with), vec!["Мосты", "Москва"]);
        assert_eq!(titles(&ranked.substring), vec!["Подмосковная"]);

        let pages = select(
            "мос",
            vec![
                settlement("Москва"),
                station("Мосты"),
                station("Подмосковная"),
            ],
            &MatchConfig::default(),
        )
        .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(titles(&pages[0]), vec!["Мосты", "Москва", "Подмосковная"]);
    }

    #[test]
    fn unmatched_candidate_is_a_defect() {
        let err = rank("мос", vec![station("Мосты"), station("Омск")]).unwrap_err();
        assert_eq!(
            err,
            MatchError::UnclassifiedCandidate {
                title: "Омск".into(),
                query: "мос".into(),
            }
        );
    }

    #[test]
    fn exact_beats_prefix_regardless_of_kind() {
        let pages = select(
            "тверь",
            vec![station("Тверь-Товарная"), settlement("Тверь")],
            &MatchConfig::default(),
        )
        .unwrap();
        assert_eq!(titles(&pages[0]), vec!["Тверь", "Тверь-Товарная"]);
    }

    #[test]
    fn yo_and_case_are_folded() {
        let ranked = rank(&normalize_query("ЩЁЛКОВО"), vec![settlement("Щёлково")]).unwrap();
        assert_eq!(titles(&ranked.exact), vec!["Щёлково"]);
    }

    #[test]
    fn same_kind_keeps_directory_order() {
        let ranked = rank(
            "лес",
            vec![
                settlement("Лесной"),
                station("Лесная"),
                settlement("Лесное"),
                station("Лески"),
            ],
        )
        .unwrap();
        assert_eq!(
            titles(&ranked.starts_with),
            vec!["Лесная", "Лески", "Лесной", "Лесное"]
        );
    }

    #[test]
    fn truncates_and_pages() {
        let candidates: Vec<Point> = (0..57).map(|i| station(&format!("Остановка {i}"))).collect();
        let pages = select("остановка", candidates, &MatchConfig::default()).unwrap();

        assert_eq!(pages.len(), 5);
        assert!(pages.iter().all(|p| p.len() == 10));
        assert_eq!(pages[0][0].title, "Остановка 0");
        assert_eq!(pages[4][9].title, "Остановка 49");
    }

    #[test]
    fn last_page_may_be_short() {
        let candidates: Vec<Point> = (0..23).map(|i| station(&format!("Пункт {i}"))).collect();
        let pages = select("пункт", candidates, &MatchConfig::new(50, 10)).unwrap();

        let sizes: Vec<usize> = pages.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
    }

    #[test]
    fn page_actions() {
        assert_eq!(PageAction::for_page(0, 3), PageAction::More);
        assert_eq!(PageAction::for_page(1, 3), PageAction::More);
        assert_eq!(PageAction::for_page(2, 3), PageAction::NoneOfThese);
        assert_eq!(PageAction::for_page(0, 1), PageAction::NoneOfThese);
    }

    #[test]
    fn strictness_by_length() {
        let config = MatchConfig::default();
        assert_eq!(lookup_strictness("ям", &config), Strictness::Strict);
        assert_eq!(lookup_strictness("яма", &config), Strictness::Loose);
    }

    #[test]
    fn codes_do_not_affect_ranking() {
        let with_code = Point::new(
            PointKind::Settlement,
            "Мытищи",
            "Московская область",
            Some(PointCode::parse("c10740").unwrap()),
        );
        let ranked = rank("мыт", vec![with_code, station("Мытищи")]).unwrap();
        assert_eq!(ranked.starts_with[0].kind, PointKind::Station);
    }

    #[test]
    fn paginate_zero_page_size() {
        let pages = paginate(vec![station("А"), station("Б")], 0);
        assert_eq!(pages.len(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::PointKind;
    use proptest::prelude::*;

    /// Titles built around the query "ок" so every candidate lands in a tier.
    fn candidate() -> impl Strategy<Value = Point> {
        (
            prop_oneof![Just(""), Just("б"), Just("ва")],
            prop_oneof![Just(""), Just("н"), Just("ро")],
            any::<bool>(),
        )
            .prop_map(|(pre, post, is_station)| {
                let kind = if is_station {
                    PointKind::Station
                } else {
                    PointKind::Settlement
                };
                Point::new(kind, format!("{pre}ок{post}"), "Регион", None)
            })
    }

    proptest! {
        /// Tiers appear in order, and stations lead within each tier
        #[test]
        fn tier_order(points in proptest::collection::vec(candidate(), 0..40)) {
            let ranked = rank("ок", points).unwrap();
            let ordered = ranked.into_ordered(usize::MAX);

            let keys: Vec<(MatchTier, PointKind)> = ordered
                .iter()
                .map(|p| (classify(&normalize_title(&p.title), "ок").unwrap(), p.kind))
                .collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }

        /// Pages reassemble into the ranked list; only the last page is short
        #[test]
        fn pages_reassemble(points in proptest::collection::vec(candidate(), 1..80), page_size in 1usize..15) {
            let config = MatchConfig::new(50, page_size);
            let expected = rank("ок", points.clone()).unwrap().into_ordered(50);
            let pages = select("ок", points, &config).unwrap();

            for page in &pages[..pages.len() - 1] {
                prop_assert_eq!(page.len(), page_size);
            }
            prop_assert!(pages.last().unwrap().len() <= page_size);

            let flat: Vec<Point> = pages.into_iter().flatten().collect();
            prop_assert_eq!(flat, expected);
        }
    }
}
