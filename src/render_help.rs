use boundcalc::features::feature_lines;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui_mode::app::App;

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" boundcalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let mut help_text = vec![
        Line::from(Span::styled(
            "boundcalc - Bounded Arithmetic Calculator",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Rules and features:"),
    ];
    help_text.extend(feature_lines(app.calculator.config()).into_iter().map(Line::from));

    help_text.extend([
        Line::from(""),
        heading("Commands:"),
        Line::from("  details <expression> : Show each evaluation step and the active ceiling"),
        Line::from("  ans : Show the last answer and its expression"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  help, d : Show this help screen"),
        Line::from("  quit, q, e : Exit the calculator"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from("  Esc : Close this screen"),
        Line::from(""),
        heading("Examples:"),
        Line::from("  4-3*5"),
        Line::from("  -8*+--4"),
        Line::from("  2(1/2)4(5-7)(0+1)"),
        Line::from("  details 2*(3+4)"),
    ]);

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
