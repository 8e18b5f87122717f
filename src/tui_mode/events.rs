use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{app::App, ui};
use crate::render_help::render_help;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const WHEEL_STEP: usize = 3;
const HELP_PAGE: usize = 10;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| {
            if app.show_help {
                render_help(frame, app);
            } else {
                ui::draw(frame, app);
            }
        })?;

        if event::poll(POLL_INTERVAL)? {
            dispatch(app, event::read()?);
        }
    }
    Ok(())
}

fn dispatch(app: &mut App, event: Event) {
    match event {
        Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => {
            if app.show_help {
                help_key(app, code);
            } else {
                edit_key(app, code, modifiers);
            }
        }
        Event::Mouse(mouse) => wheel(app, mouse.kind),
        _ => {}
    }
}

fn help_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
        KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
        KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(HELP_PAGE),
        KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(HELP_PAGE),
        KeyCode::Esc => app.close_help(),
        _ => {}
    }
}

fn edit_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let control = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('u' | 'U') if control => app.clear_input(),
        // Shift is how '*' and '(' are typed on most layouts
        KeyCode::Char(c) if !control => app.insert_char(c),
        KeyCode::Backspace => app.erase_before_cursor(),
        KeyCode::Delete => app.erase_at_cursor(),
        KeyCode::Left if control => app.move_cursor_by_words(-1),
        KeyCode::Right if control => app.move_cursor_by_words(1),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => {
            app.cursor_position = 0;
            app.input_scroll = 0;
        }
        KeyCode::End => app.cursor_position = app.input.chars().count(),
        KeyCode::Up => app.navigate_history(-1),
        KeyCode::Down => app.navigate_history(1),
        KeyCode::PageUp => app.scroll_history(-1),
        KeyCode::PageDown => app.scroll_history(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => app.open_help(),
        _ => {}
    }
}

fn wheel(app: &mut App, kind: MouseEventKind) {
    let offset = if app.show_help {
        &mut app.help_scroll
    } else {
        &mut app.history_scroll
    };
    match kind {
        MouseEventKind::ScrollDown => *offset = offset.saturating_add(WHEEL_STEP),
        MouseEventKind::ScrollUp => *offset = offset.saturating_sub(WHEEL_STEP),
        _ => {}
    }
}
