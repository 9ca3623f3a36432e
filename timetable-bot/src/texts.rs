//! Askama templates for the bot's message texts.
//!
//! Texts use the chat transport's HTML mode; values interpolated into them
//! must already be escaped.

use askama::Template;

use crate::matcher::PageAction;

// ============================================================================
// Timetable messages
// ============================================================================

/// Opening sentence of the first timetable message.
#[derive(Template)]
#[template(
    source = "Расписание электричек <b>{{ route }}</b> на {{ date }}:",
    ext = "txt"
)]
pub struct PreludeText<'a> {
    pub route: &'a str,
    pub date: &'a str,
}

/// Marker at the top of every timetable message after the first.
#[derive(Template)]
#[template(source = "<i>(продолжение)</i>", ext = "txt")]
pub struct ContinuedText;

/// Call to action and attribution closing the last timetable message.
#[derive(Template)]
#[template(
    source = "Чтобы узнать расписание на другой день, отправьте дату, например «завтра» или «25».\n\n<i>Данные предоставлены сервисом Яндекс Расписания.</i>",
    ext = "txt"
)]
pub struct PostludeText;

/// Sent instead of a timetable when nothing runs that day.
#[derive(Template)]
#[template(
    source = "На {{ date }} электричек <b>{{ route }}</b> не найдено. Попробуйте другую дату.",
    ext = "txt"
)]
pub struct NoDeparturesText<'a> {
    pub route: &'a str,
    pub date: &'a str,
}

// ============================================================================
// Point search messages
// ============================================================================

/// Asks the user to type more of a name.
#[derive(Template)]
#[template(
    source = "Слишком короткий запрос. Введите хотя бы {{ min }} буквы названия станции или города.",
    ext = "txt"
)]
pub struct TypeMoreText {
    pub min: usize,
}

/// Nothing in the directory matched.
#[derive(Template)]
#[template(
    source = "По запросу «{{ query }}» ничего не найдено. Попробуйте написать название иначе.",
    ext = "txt"
)]
pub struct NotFoundText<'a> {
    pub query: &'a str,
}

/// Prompt above a page of point buttons.
#[derive(Template)]
#[template(
    source = "{% if total_pages > 1 %}Выберите пункт (страница {{ page }} из {{ total_pages }}):{% else %}Выберите пункт:{% endif %}",
    ext = "txt"
)]
pub struct ChoosePointText {
    pub page: usize,
    pub total_pages: usize,
}

/// Caption of the extra button under a page of points.
pub fn page_action_caption(action: PageAction) -> &'static str {
    match action {
        PageAction::More => "Ещё варианты…",
        PageAction::NoneOfThese => "Нет нужного",
    }
}
