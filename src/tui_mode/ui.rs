use boundcalc::{
    display::{format_number, format_with_spaces},
    features::ceiling_note,
    EvalError,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, HistoryEntry};
use super::helpers::{highlight_expression, wrap_text};

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;

const PROMPT: &str = "> ";
const CONTINUATION: &str = "  ";
const BULLET: &str = "    - ";
const BULLET_CONTINUATION: &str = "      ";

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

fn framed(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(title)
        .title_alignment(Alignment::Center)
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    if area.width < MIN_TERMINAL_WIDTH || area.height < MIN_TERMINAL_HEIGHT {
        draw_too_small(frame, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    draw_input(frame, app, rows[0]);
    draw_status(frame, app, rows[1]);
    draw_history(frame, app, rows[2]);
    app.list_height = rows[2].height as usize;
}

fn draw_too_small(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            format!(
                "Terminal is {}x{}, boundcalc needs at least {}x{}",
                area.width, area.height, MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT
            ),
            error_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Enlarge the window to continue", Style::default().fg(Color::Yellow))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Too Small ")
        .title_alignment(Alignment::Center);

    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = framed(" Expression ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = inner.width.saturating_sub(PROMPT.len() as u16) as usize;
    app.adjust_input_scroll(visible_width);

    let visible: String = app.input.chars().skip(app.input_scroll).take(visible_width).collect();
    let before_cursor: String = visible
        .chars()
        .take(app.cursor_position.saturating_sub(app.input_scroll))
        .collect();
    frame.render_widget(Paragraph::new(format!("{PROMPT}{visible}")), inner);
    frame.set_cursor(inner.x + (PROMPT.len() + before_cursor.width()) as u16, inner.y);

    // more input hidden on either side
    if app.input_scroll > 0 {
        frame.render_widget(Paragraph::new("<").style(dim()), Rect { width: 1, height: 1, ..inner });
    }
    if app.input.chars().count() > app.input_scroll + visible_width {
        let x = inner.right().saturating_sub(1);
        frame.render_widget(Paragraph::new(">").style(dim()), Rect { x, width: 1, height: 1, ..inner });
    }
}

fn status_line(note: &str) -> Line<'static> {
    const KEYS: [(&str, &str); 4] = [
        ("Enter", "evaluate"),
        ("Up/Down PgUp/PgDn", "history"),
        ("F1", "help"),
        ("Ctrl+U", "clear input"),
    ];
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (key, action) in KEYS {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {action}  "), dim()));
    }
    spans.push(Span::styled(format!("[{note}]"), Style::default().fg(Color::Cyan)));
    Line::from(spans)
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let note = ceiling_note(app.calculator.config());
    frame.render_widget(Paragraph::new(status_line(&note)), area);
}

fn draw_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = framed(" History ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let hint = Paragraph::new("Nothing evaluated yet. Type an expression and press Enter.")
            .style(dim())
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    }

    let width = inner.width.saturating_sub(4) as usize;
    let digits = app.calculator.max_digits();
    let note = ceiling_note(app.calculator.config());
    let separator = "-".repeat(inner.width as usize);

    let mut items = Vec::new();
    app.item_start_indices.clear();
    for (index, entry) in app.history.iter().enumerate() {
        if index > 0 {
            items.push(ListItem::new(Line::from(Span::styled(separator.clone(), dim()))));
        }
        app.item_start_indices.push(items.len());
        let selected = index == app.cursor_history;
        items.extend(entry_lines(entry, width, digits, &note, selected).into_iter().map(ListItem::new));
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(inner.height as usize);
        app.scroll_to_bottom = false;
    }

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    let mut state = ListState::default()
        .with_selected(app.item_start_indices.get(app.cursor_history).copied())
        .with_offset(app.history_scroll);
    frame.render_stateful_widget(list, inner, &mut state);
}

/// Display rows for one history entry.
///
/// An error with a column keeps the input exactly as typed, cut into rows of
/// `width` characters, with a caret row under the offending character. Other
/// inputs are spaced around operators and word-wrapped.
fn entry_lines(
    entry: &HistoryEntry,
    width: usize,
    digits: u32,
    note: &str,
    selected: bool,
) -> Vec<Line<'static>> {
    let expr_style = Style::default().fg(if selected { Color::Yellow } else { Color::Cyan });
    let failed_at = entry.result.as_ref().err().and_then(EvalError::position);

    let mut rows = match failed_at {
        Some(position) => marked_rows(&entry.input, position, width, expr_style),
        None => wrap_text(&format_with_spaces(&entry.input), width)
            .iter()
            .map(|row| highlight_expression(row, expr_style))
            .collect(),
    };
    if rows.is_empty() {
        rows.push(Vec::new());
    }

    rows[0].push(Span::styled(" = ", Style::default().fg(Color::Gray)));
    rows[0].push(match &entry.result {
        Ok(value) => Span::styled(
            format_number(*value, digits),
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
        ),
        Err(err) => Span::styled(format!("Error: {err}"), error_style()),
    });

    let mut lines: Vec<Line<'static>> = rows
        .into_iter()
        .enumerate()
        .map(|(index, mut spans)| {
            let lead = if index == 0 {
                Span::styled(PROMPT, Style::default().fg(Color::Green))
            } else {
                Span::raw(CONTINUATION)
            };
            spans.insert(0, lead);
            Line::from(spans)
        })
        .collect();

    if entry.detailed_mode {
        let mut notes: Vec<(String, Style)> = entry
            .detailed_steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let text = format!("Step {}: {} = {}", i + 1, step.operation, format_number(step.result, digits));
                (text, dim())
            })
            .collect();
        if notes.is_empty() {
            if let Err(err) = &entry.result {
                notes.push((format!("Error: {err}"), Style::default().fg(Color::Red)));
            }
        }
        notes.push((format!("Evaluated as {note}"), Style::default().fg(Color::Magenta)));

        for (text, style) in notes {
            lines.extend(bullet(&text, width, style));
        }
    }

    lines
}

/// The raw input in fixed-width rows, with `^` under `position`.
fn marked_rows(input: &str, position: usize, width: usize, style: Style) -> Vec<Vec<Span<'static>>> {
    let width = width.max(1);
    let chars: Vec<char> = input.chars().collect();
    let chunks: Vec<String> = if chars.is_empty() {
        vec![String::new()]
    } else {
        chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
    };
    // a column one past the end marks the row holding the last character
    let marked = (position / width).min(chunks.len() - 1);

    let mut rows = Vec::new();
    for (index, chunk) in chunks.iter().enumerate() {
        rows.push(highlight_expression(chunk, style));
        if index == marked {
            let before: String = chunk.chars().take(position - index * width).collect();
            rows.push(vec![Span::styled(format!("{}^", " ".repeat(before.width())), error_style())]);
        }
    }
    rows
}

fn bullet(text: &str, width: usize, style: Style) -> impl Iterator<Item = Line<'static>> {
    wrap_text(text, width.saturating_sub(BULLET.len()))
        .into_iter()
        .enumerate()
        .map(move |(index, row)| {
            let lead = if index == 0 { BULLET } else { BULLET_CONTINUATION };
            Line::from(Span::styled(format!("{lead}{row}"), style))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundcalc::Calculator;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn entry(input: &str, result: Result<f64, EvalError>) -> HistoryEntry {
        HistoryEntry {
            input: input.to_string(),
            result,
            detailed_steps: Vec::new(),
            detailed_mode: false,
        }
    }

    #[test]
    fn caret_sits_under_the_failing_column() {
        let failed = entry("3 + * 4", Err(EvalError::AdjacentOperators { position: 4 }));
        let lines: Vec<_> = entry_lines(&failed, 40, 15, "exact, 15 digits", false)
            .iter()
            .map(text)
            .collect();
        assert_eq!(
            lines,
            [
                "> 3 + * 4 = Error: invalid adjacent operators found at column 4",
                "      ^",
            ]
        );
    }

    #[test]
    fn caret_follows_the_input_onto_later_rows() {
        let failed = entry("1234567+", Err(EvalError::TrailingOperator { position: 8 }));
        let lines: Vec<_> = entry_lines(&failed, 4, 15, "exact, 15 digits", false)
            .iter()
            .map(text)
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("> 1234 = Error: trailing operator"));
        assert_eq!(lines[1], "  567+");
        assert_eq!(lines[2], "      ^");
    }

    #[test]
    fn answers_are_spaced_and_rounded_to_the_ceiling() {
        let done = entry("2*(3+4)", Ok(14.0));
        let lines = entry_lines(&done, 40, 15, "exact, 15 digits", true);
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "> 2 * (3 + 4) = 14");

        let third = entry("1/3", Ok(1.0 / 3.0));
        assert_eq!(text(&entry_lines(&third, 40, 4, "", false)[0]), "> 1 / 3 = 0.3333");

        let unplaced = entry("20/(10-10)", Err(EvalError::DivisionByZero));
        assert_eq!(entry_lines(&unplaced, 40, 15, "", false).len(), 1);
    }

    #[test]
    fn details_end_with_the_active_ceiling() {
        let mut app = App::new(Calculator::default());
        app.input = "details 2*(3+4)".to_string();
        app.submit();

        let note = ceiling_note(app.calculator.config());
        let lines: Vec<_> = entry_lines(&app.history[0], 60, 15, &note, false)
            .iter()
            .map(text)
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("    - Step 1: "));
        assert_eq!(lines[3], "    - Evaluated as exact, 15 digits");
    }

    #[test]
    fn status_line_names_the_strategy() {
        assert!(text(&status_line("scientific, 12 digits, 10^±300"))
            .ends_with("[scientific, 12 digits, 10^±300]"));
    }
}
