use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use boundcalc::calc_engine::chars;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;

                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width_cjk(c).unwrap_or(1);
                    // a glyph wider than the line still gets a line of its own
                    if chunk_width + char_width > width && !chunk.is_empty() {
                        break;
                    }
                    chunk.push(c);
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }

                if !current_line.is_empty() {
                    lines.push(current_line.trim().to_string());
                    current_line.clear();
                    current_width = 0;
                }

                lines.push(chunk);
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(current_line.trim().to_string());
            current_line.clear();
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line.trim().to_string());
    }

    lines
}

/// Splits an expression into styled spans: digits, operators and the rest.
pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default()
        .fg(Color::LightGreen);

    let mut spans = Vec::new();
    let mut number = String::new();

    for c in expr.chars() {
        if chars::is_digit(c) {
            number.push(c);
            continue;
        }
        if !number.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut number), number_style));
        }

        if chars::is_operator(c) {
            spans.push(Span::styled(c.to_string(), operator_style));
        } else if c == ' ' {
            spans.push(Span::raw(" "));
        } else {
            spans.push(Span::styled(c.to_string(), base_style));
        }
    }

    if !number.is_empty() {
        spans.push(Span::styled(number, number_style));
    }

    spans
}
