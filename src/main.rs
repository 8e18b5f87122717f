#[cfg(feature = "line")]
mod line_mode;
mod logging;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use std::process::ExitCode;

use anyhow::Context;
use boundcalc::{display::format_number, Calculator, Config, EvalError, Strategy};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[clap(version, about = "Arithmetic calculator with exact or bounded scientific values")]
struct Args {
    #[clap(
        short,
        long,
        allow_hyphen_values = true,
        help = "Evaluate one expression, print the answer and exit"
    )]
    expr: Option<String>,

    #[clap(
        short,
        long,
        default_value_t = Strategy::ExactFraction,
        long_help = "Numeric representation: 'exact' or 'scientific'

exact keeps every value as a fraction of two integers of at most
--max-digits digits; scientific keeps a rounded mantissa and a decimal
exponent of at most --max-magnitude."
    )]
    strategy: Strategy,

    #[clap(long, help = "Significant digit ceiling (1 to 15)")]
    max_digits: Option<u32>,

    #[clap(long, help = "Decimal exponent ceiling for scientific values (1 to 307)")]
    max_magnitude: Option<i32>,

    #[clap(
        short,
        long,
        long_help = "The file to write logs to

Interactive modes discard logs by default; --expr logs to stderr."
    )]
    log_file: Option<String>,

    #[clap(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Show more in logs, may be provided multiple times"
    )]
    verbose: u8,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new(self.strategy);
        if let Some(max_digits) = self.max_digits {
            config = config.with_max_digits(max_digits)?;
        }
        if let Some(max_magnitude) = self.max_magnitude {
            config = config.with_max_magnitude(max_magnitude)?;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref(), args.verbose, args.expr.is_some())?;

    let config = args.config().context("invalid calculator configuration")?;
    debug!(strategy = %config.strategy(), limits = ?config.limits(), "starting");
    let mut calculator = Calculator::new(config);

    match &args.expr {
        Some(expr) => Ok(run_once(&mut calculator, expr)),
        None => run_interactive(calculator).map(|()| ExitCode::SUCCESS),
    }
}

fn run_once(calculator: &mut Calculator, expr: &str) -> ExitCode {
    match calculator.calculate(expr) {
        Ok(answer) => {
            println!("{}", format_number(answer, calculator.max_digits()));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", error_report(expr, &err));
            ExitCode::FAILURE
        }
    }
}

/// `error: <message>`, followed by the expression and a caret under the
/// offending column when the error has one.
fn error_report(expr: &str, err: &EvalError) -> String {
    let mut report = format!("error: {err}\n");
    if let Some(position) = err.position() {
        report.push_str(&format!("  {expr}\n  {}^\n", " ".repeat(position)));
    }
    report
}

#[cfg(feature = "tui")]
fn run_interactive(calculator: Calculator) -> anyhow::Result<()> {
    tui_mode::run_tui(calculator)
}

#[cfg(all(feature = "line", not(feature = "tui")))]
fn run_interactive(calculator: Calculator) -> anyhow::Result<()> {
    line_mode::run_line(calculator)
}

#[cfg(not(any(feature = "tui", feature = "line")))]
fn run_interactive(_calculator: Calculator) -> anyhow::Result<()> {
    anyhow::bail!("no interactive front-end compiled in; use --expr or enable the 'tui' or 'line' feature")
}
