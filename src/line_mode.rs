use std::io::{stdin, stdout, Write};

use anyhow::{Context, Result};
use boundcalc::{
    command::Command,
    display::{format_number, format_with_spaces},
    features::feature_lines,
    Calculator, EvaluationTrace,
};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};

const PROMPT: &str = "Expression: ";

// Функция для преобразования позиции символа в байтовую позицию
fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

fn print_features(out: &mut impl Write, calculator: &Calculator) -> Result<()> {
    for line in feature_lines(calculator.config()) {
        write!(out, "{line}\r\n")?;
    }
    write!(out, "\r\n")?;
    Ok(())
}

pub fn run_line(mut calculator: Calculator) -> Result<()> {
    let mut stdout = stdout().into_raw_mode().context("entering raw mode")?;

    write!(stdout, "boundcalc\r\n")?;
    print_features(&mut stdout, &calculator)?;
    write!(stdout, "Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history\r\n")?;
    write!(stdout, "Commands: 'd' for features, 'ans', 'clear', 'e' or 'quit' to exit\r\n")?;
    write!(stdout, "Add 'details' before an expression for step-by-step evaluation\r\n\r\n")?;

    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;
    let mut keys = stdin().keys();

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0; // позиция курсора в символах
        let (_, initial_y) = stdout.cursor_pos().context("reading cursor position")?;

        loop {
            write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, expression)?;
            let column = PROMPT.len() + expression.chars().take(cursor_pos).count() + 1;
            write!(stdout, "{}", Goto(column as u16, initial_y))?;
            stdout.flush()?;

            let Some(key) = keys.next() else {
                // stdin closed
                write!(stdout, "\r\n")?;
                return Ok(());
            };

            match key.context("reading key")? {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    write!(stdout, "\r\nGoodbye!\r\n")?;
                    return Ok(());
                }
                Key::Char(c) => {
                    // Вставляем символ по правильной позиции
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        expression.drain(byte_idx..byte_idx + c.len_utf8());
                    }
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        expression.drain(byte_idx..byte_idx + c.len_utf8());
                    }
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        write!(stdout, "\r\n")?;
        let Some(command) = Command::parse(&expression) else {
            continue;
        };

        match command {
            Command::Quit => {
                write!(stdout, "Goodbye!\r\n")?;
                return Ok(());
            }
            Command::Clear => {
                history.clear();
                history_index = 0;
                write!(stdout, "History cleared\r\n\r\n")?;
            }
            Command::Help => print_features(&mut stdout, &calculator)?,
            Command::Answer => {
                let answer = format_number(calculator.last_answer(), calculator.max_digits());
                write!(
                    stdout,
                    "  {} = {}\r\n\r\n",
                    format_with_spaces(calculator.last_expression()),
                    answer
                )?;
            }
            Command::MissingExpression => {
                write!(stdout, "Please enter a valid expression after 'details'\r\n\r\n")?;
            }
            Command::Evaluate { expr, detailed } => {
                history.push(expression.trim().to_string());
                history_index = history.len();

                let mut trace = EvaluationTrace::new(detailed);
                let formatted_expr = format_with_spaces(expr);
                match calculator.calculate_traced(expr, &mut trace) {
                    Ok(answer) => {
                        let answer = format_number(answer, calculator.max_digits());
                        write!(stdout, "  {} = {}\r\n", formatted_expr, answer)?;

                        if detailed && !trace.steps.is_empty() {
                            write!(stdout, "\r\n  Step-by-step evaluation:\r\n")?;
                            for (i, step) in trace.steps.iter().enumerate() {
                                let result = format_number(step.result, calculator.max_digits());
                                write!(stdout, "  Step {}: {} = {}\r\n", i + 1, step.operation, result)?;
                            }
                        }
                    }
                    Err(e) => write!(stdout, "  {} = Error: {}\r\n", formatted_expr, e)?,
                }
                write!(stdout, "\r\n")?;
            }
        }
    }
}
