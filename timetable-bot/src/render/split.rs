//! Splitting rendered lines into length-bounded blocks.

use std::borrow::Cow;

/// Marks a line cut short to fit a block.
const ELLIPSIS: char = '…';

/// Greedily pack `lines` into newline-joined blocks of at most `budget`
/// characters.
///
/// Lines are never split across blocks. A line longer than the whole budget
/// is cut to `budget` characters ending in an ellipsis and sits in a block
/// of its own. No blocks come back for no lines.
pub fn split_lines(lines: &[String], budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in lines {
        let line = truncate_line(line, budget);
        let line_len = line.chars().count();

        if current_len > 0 && current_len + 1 + line_len > budget {
            blocks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(&line);
        current_len += line_len;
    }

    if current_len > 0 {
        blocks.push(current);
    }

    blocks
}

/// Cut `line` to at most `budget` characters, marking the cut.
pub fn truncate_line(line: &str, budget: usize) -> Cow<'_, str> {
    if line.chars().count() <= budget {
        return Cow::Borrowed(line);
    }

    let mut cut: String = line.chars().take(budget.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    Cow::Owned(cut)
}
