/// What an interactive front-end should do with a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Help,
    Clear,
    /// Show the last answer and the expression that produced it.
    Answer,
    Evaluate { expr: &'a str, detailed: bool },
    /// `details` given without an expression.
    MissingExpression,
}

impl<'a> Command<'a> {
    /// Returns `None` for a blank line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let command = match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" | "e" => Command::Quit,
            "help" | "d" => Command::Help,
            "clear" | "reset" => Command::Clear,
            "ans" => Command::Answer,
            "details" => Command::MissingExpression,
            _ => {
                let (detailed, expr) = match strip_prefix_ignore_case(line, "details ") {
                    Some(rest) => (true, rest.trim()),
                    None => (false, line),
                };
                if expr.is_empty() {
                    Command::MissingExpression
                } else {
                    Command::Evaluate { expr, detailed }
                }
            }
        };
        Some(command)
    }
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &line[prefix.len()..])
}
