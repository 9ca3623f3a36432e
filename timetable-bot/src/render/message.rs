//! Timetable rendering into chat messages.
//!
//! `render` produces header-plus-lines blocks under a length limit.
//! `compose_messages` additionally frames the blocks for sending: an
//! opening sentence on the first, a "continued" marker on the rest, and the
//! call to action on the last.

use std::collections::HashSet;

use askama::Template;
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{MalformedThread, Thread};
use crate::texts::{ContinuedText, PostludeText, PreludeText};

use super::config::RenderConfig;
use super::error::RenderError;
use super::layout::{Layout, RouteEnds};
use super::line::{escape_html, format_line};
use super::split::split_lines;

/// Separator between the sections of one message.
const SECTION_BREAK: &str = "\n\n";

/// Smallest room for lines worth sending a framed message for.
const MIN_LINE_BUDGET: usize = 32;

/// What the timetable is for, as shown to the user.
#[derive(Debug, Clone, Copy)]
pub struct TimetableContext<'a> {
    /// Full route description, e.g. "Москва → Петушки".
    pub route: &'a str,
    pub date: NaiveDate,
}

/// Keep the well-formed threads, dropping malformed records and repeated
/// UIDs.
///
/// Each dropped record is logged. Fails only when nothing is left.
pub fn collect_threads(
    records: impl IntoIterator<Item = Result<Thread, MalformedThread>>,
) -> Result<Vec<Thread>, RenderError> {
    let mut seen = HashSet::new();
    let mut threads = Vec::new();

    for record in records {
        match record {
            Ok(thread) => {
                if seen.insert(thread.uid.clone()) {
                    threads.push(thread);
                } else {
                    debug!(uid = %thread.uid, "skipping repeated thread");
                }
            }
            Err(e) => warn!(error = %e, "dropping malformed thread"),
        }
    }

    if threads.is_empty() {
        return Err(RenderError::NoRenderableThreads);
    }

    Ok(threads)
}

/// Render threads into blocks of at most `max_block_length` characters,
/// each starting with the layout header (when it has one).
pub fn render(
    threads: &[Thread],
    ends: RouteEnds,
    max_block_length: usize,
    config: &RenderConfig,
) -> Result<Vec<String>, RenderError> {
    if threads.is_empty() {
        return Err(RenderError::NoRenderableThreads);
    }

    let layout = Layout::choose(ends, threads, config);
    let header = layout.header();
    let budget = line_budget(max_block_length, section_len(&header), 1)?;
    let lines = render_lines(threads, &layout, config);

    Ok(split_lines(&lines, budget)
        .iter()
        .map(|block| join_sections([header.as_str(), block]))
        .collect())
}

/// Render threads into complete chat messages, each within
/// `config.max_block_length`.
pub fn compose_messages(
    threads: &[Thread],
    ends: RouteEnds,
    context: TimetableContext<'_>,
    config: &RenderConfig,
) -> Result<Vec<String>, RenderError> {
    if threads.is_empty() {
        return Err(RenderError::NoRenderableThreads);
    }

    let layout = Layout::choose(ends, threads, config);
    let header = layout.header();

    let route = escape_html(context.route);
    let date = context.date.format("%d.%m.%Y").to_string();
    let prelude = PreludeText {
        route: &route,
        date: &date,
    }
    .render()?;
    let continued = ContinuedText.render()?;
    let postlude = PostludeText.render()?;

    // Room for the largest framing any single message can get
    let reserved = section_len(&prelude).max(section_len(&continued))
        + section_len(&header)
        + section_len(&postlude);
    let budget = line_budget(config.max_block_length, reserved, MIN_LINE_BUDGET)?;

    let lines = render_lines(threads, &layout, config);
    let blocks = split_lines(&lines, budget);
    let last = blocks.len().saturating_sub(1);

    debug!(
        threads = threads.len(),
        messages = blocks.len(),
        ?layout,
        "composed timetable"
    );

    Ok(blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let opening = if i == 0 { &prelude } else { &continued };
            let closing = if i == last { postlude.as_str() } else { "" };
            join_sections([opening.as_str(), header.as_str(), block, closing])
        })
        .collect())
}

fn render_lines(threads: &[Thread], layout: &Layout, config: &RenderConfig) -> Vec<String> {
    threads
        .iter()
        .map(|t| format_line(t, layout, config))
        .collect()
}

/// Room left for lines once `reserved` characters of framing are taken,
/// provided at least `min` remain.
fn line_budget(
    max_block_length: usize,
    reserved: usize,
    min: usize,
) -> Result<usize, RenderError> {
    max_block_length
        .checked_sub(reserved)
        .filter(|budget| *budget >= min)
        .ok_or(RenderError::BudgetTooSmall {
            max_block_length,
            reserved,
        })
}

/// Characters a section occupies in a message, including its break.
fn section_len(section: &str) -> usize {
    if section.is_empty() {
        0
    } else {
        section.chars().count() + SECTION_BREAK.chars().count()
    }
}

fn join_sections<'a>(sections: impl IntoIterator<Item = &'a str>) -> String {
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PointKind, StationRef, ThreadUid};
    use chrono::{DateTime, Duration};

    fn thread(uid: &str, hhmm: &str, from: &str, to: &str) -> Thread {
        let departure =
            DateTime::parse_from_rfc3339(&format!("2024-03-15T{hhmm}:00+03:00")).unwrap();
        Thread::new(
            ThreadUid::new(uid.to_string()).unwrap(),
            uid,
            format!("{from} — {to}"),
            StationRef::new(Some(format!("s-{from}")), from),
            StationRef::new(Some(format!("s-{to}")), to),
            departure,
            departure + Duration::minutes(50),
        )
        .unwrap()
    }

    fn many(n: usize) -> Vec<Thread> {
        (0..n)
            .map(|i| {
                let hhmm = format!("{:02}:{:02}", 5 + i / 60 % 18, i % 60);
                thread(&format!("t{i}"), &hhmm, "Курский вокзал", "Петушки")
            })
            .collect()
    }

    fn context() -> TimetableContext<'static> {
        TimetableContext {
            route: "Москва → Петушки",
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    const STATIONS: RouteEnds = RouteEnds {
        origin: PointKind::Station,
        destination: PointKind::Station,
    };

    #[test]
    fn station_pair_lists_routes() {
        let threads = vec![thread("1", "10:00", "A", "B"), thread("2", "11:30", "A", "B")];
        let blocks = render(&threads, STATIONS, 4096, &RenderConfig::default()).unwrap();

        assert_eq!(
            blocks,
            vec!["<b>10:00</b> (A — B)\n<b>11:30</b> (A — B)".to_string()]
        );
    }

    #[test]
    fn differing_departures_are_annotated() {
        let threads = vec![thread("1", "10:00", "A", "B"), thread("2", "11:30", "C", "B")];
        let ends = RouteEnds::new(PointKind::Settlement, PointKind::Station);
        let blocks = render(&threads, ends, 4096, &RenderConfig::default()).unwrap();

        assert_eq!(
            blocks,
            vec![
                "В скобках указана станция отправления.\n\n<b>10:00</b> (A)\n<b>11:30</b> (C)"
                    .to_string()
            ]
        );
    }

    #[test]
    fn render_respects_limit() {
        let threads = many(120);
        let ends = RouteEnds::new(PointKind::Settlement, PointKind::Settlement);
        let blocks = render(&threads, ends, 300, &RenderConfig::default()).unwrap();

        assert!(blocks.len() > 1);
        for block in &blocks {
            assert!(block.chars().count() <= 300);
            assert!(block.starts_with("Отправление со станции"));
        }
    }

    #[test]
    fn single_message_has_full_framing() {
        let threads = vec![thread("1", "10:00", "A", "B")];
        let messages =
            compose_messages(&threads, STATIONS, context(), &RenderConfig::default()).unwrap();

        assert_eq!(messages.len(), 1);
        let expected = format!(
            "Расписание электричек <b>Москва → Петушки</b> на 15.03.2024:\n\n\
             <b>10:00</b> (A — B)\n\n{}",
            PostludeText.render().unwrap()
        );
        assert_eq!(messages[0], expected);
    }

    #[test]
    fn multi_message_framing() {
        let threads = many(200);
        let config = RenderConfig::default().with_max_block_length(600);
        let messages = compose_messages(&threads, STATIONS, context(), &config).unwrap();
        let postlude = PostludeText.render().unwrap();
        let continued = ContinuedText.render().unwrap();

        assert!(messages.len() > 2);
        for (i, message) in messages.iter().enumerate() {
            assert!(message.chars().count() <= 600, "message {i} too long");
            assert_eq!(i == 0, message.starts_with("Расписание электричек"));
            assert_eq!(i > 0, message.starts_with(&continued));
            assert_eq!(i == messages.len() - 1, message.ends_with(&postlude));
        }

        // Every line appears exactly once, in order
        let lines: Vec<&str> = messages
            .iter()
            .flat_map(|m| m.lines())
            .filter(|l| l.starts_with("<b>") && l.contains(" ("))
            .collect();
        let expected: Vec<String> = threads
            .iter()
            .map(|t| {
                format_line(
                    t,
                    &Layout::Direct { short_titles: true },
                    &RenderConfig::default(),
                )
            })
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn route_is_escaped() {
        let threads = vec![thread("1", "10:00", "A", "B")];
        let context = TimetableContext {
            route: "A & B",
            ..context()
        };
        let messages =
            compose_messages(&threads, STATIONS, context, &RenderConfig::default()).unwrap();
        assert!(messages[0].contains("<b>A &amp; B</b>"));
    }

    #[test]
    fn empty_threads_cannot_render() {
        let err = render(&[], STATIONS, 4096, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::NoRenderableThreads));

        let err = compose_messages(&[], STATIONS, context(), &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::NoRenderableThreads));
    }

    #[test]
    fn tiny_limit_is_reported() {
        let threads = vec![thread("1", "10:00", "A", "B")];
        let config = RenderConfig::default().with_max_block_length(100);
        let err = compose_messages(&threads, STATIONS, context(), &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BudgetTooSmall {
                max_block_length: 100,
                ..
            }
        ));
    }

    #[test]
    fn small_limit_renders_when_lines_fit() {
        let threads = vec![thread("1", "10:00", "A", "B"), thread("2", "11:30", "A", "B")];
        let blocks = render(&threads, STATIONS, 30, &RenderConfig::default()).unwrap();

        assert_eq!(
            blocks,
            vec![
                "<b>10:00</b> (A — B)".to_string(),
                "<b>11:30</b> (A — B)".to_string()
            ]
        );
    }

    #[test]
    fn header_filling_the_limit_is_reported() {
        let threads = vec![thread("1", "10:00", "A", "B"), thread("2", "11:30", "C", "B")];
        let ends = RouteEnds::new(PointKind::Settlement, PointKind::Station);
        let config = RenderConfig::default();
        let reserved = section_len(&Layout::choose(ends, &threads, &config).header());

        let err = render(&threads, ends, reserved, &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BudgetTooSmall { max_block_length, reserved: r }
                if max_block_length == reserved && r == reserved
        ));

        // One character of room still renders, cut to an ellipsis
        let blocks = render(&threads, ends, reserved + 1, &config).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.ends_with("\n\n…")));
    }

    #[test]
    fn collect_drops_malformed() {
        let records = vec![
            Ok(thread("1", "10:00", "A", "B")),
            Err(MalformedThread::new(Some("2"), "missing departure")),
            Ok(thread("3", "11:00", "A", "B")),
            Ok(thread("1", "10:00", "A", "B")),
        ];
        let threads = collect_threads(records).unwrap();
        let uids: Vec<&str> = threads.iter().map(|t| t.uid.as_str()).collect();
        assert_eq!(uids, vec!["1", "3"]);
    }

    #[test]
    fn collect_all_malformed_fails() {
        let records = vec![
            Err(MalformedThread::new(None, "missing uid")),
            Err(MalformedThread::new(Some("2"), "bad timestamp")),
        ];
        assert!(matches!(
            collect_threads(records),
            Err(RenderError::NoRenderableThreads)
        ));
        assert!(matches!(
            collect_threads(Vec::new()),
            Err(RenderError::NoRenderableThreads)
        ));
    }
}
