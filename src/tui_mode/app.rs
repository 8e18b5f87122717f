use boundcalc::{command::Command, Calculator, EvalError, EvaluationTrace, Step};

pub struct HistoryEntry {
    pub input: String,
    pub result: Result<f64, EvalError>,
    pub detailed_steps: Vec<Step>,
    pub detailed_mode: bool,
}

pub struct App {
    pub calculator: Calculator,
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
}

impl App {
    pub fn new(calculator: Calculator) -> Self {
        App {
            calculator,
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
        }
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total_chars = self.input.chars().count();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        }
        else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total_chars.saturating_sub(visible_width) {
            self.input_scroll = total_chars.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.input_scroll = 0;

        let Some(command) = Command::parse(&line) else {
            return;
        };

        match command {
            Command::Quit => self.should_quit = true,
            Command::Clear => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
            }
            Command::Help => self.open_help(),
            Command::Answer => self.push_entry(HistoryEntry {
                input: self.calculator.last_expression().to_string(),
                result: Ok(self.calculator.last_answer()),
                detailed_steps: Vec::new(),
                detailed_mode: false,
            }),
            Command::MissingExpression => self.push_entry(HistoryEntry {
                input: line.trim().to_string(),
                result: Err(EvalError::EmptyExpression),
                detailed_steps: Vec::new(),
                detailed_mode: false,
            }),
            Command::Evaluate { expr, detailed } => {
                let mut trace = EvaluationTrace::new(detailed);
                let result = self.calculator.calculate_traced(expr, &mut trace);
                self.push_entry(HistoryEntry {
                    input: expr.to_string(),
                    result,
                    detailed_steps: trace.steps,
                    detailed_mode: detailed,
                });
            }
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        self.cursor_history = self.history.len().saturating_sub(1);
        self.scroll_to_bottom = true;
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
        self.help_scroll = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    /// Backspace.
    pub fn erase_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.erase_at_cursor();
        }
    }

    /// Delete.
    pub fn erase_at_cursor(&mut self) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        if let Some(c) = self.input[byte_idx..].chars().next() {
            self.input.drain(byte_idx..byte_idx + c.len_utf8());
        }
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn move_cursor_by_words(&mut self, direction: i32) {
        if direction < 0 {
            let input_chars: Vec<char> = self.input.chars().collect();
            let mut pos = self.cursor_position;

            while pos > 0 && input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }

            while pos > 0 && !input_chars[pos - 1].is_whitespace() {
                pos -= 1;
            }

            self.cursor_position = pos;
        } else {
            let input_chars: Vec<char> = self.input.chars().collect();
            let mut pos = self.cursor_position;
            let len = input_chars.len();

            while pos < len && !input_chars[pos].is_whitespace() {
                pos += 1;
            }

            while pos < len && input_chars[pos].is_whitespace() {
                pos += 1;
            }

            self.cursor_position = pos.min(len);
        }
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len().saturating_sub(1) {
            self.cursor_history += 1;
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].input.clone();
        } else {
            self.input.clear();
        }
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self.cursor_history.saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].input.clone();
        }
        self.cursor_position = self.input.chars().count();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
        s.char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or_else(|| s.len())
    }
}
