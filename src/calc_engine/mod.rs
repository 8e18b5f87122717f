//! Expression engine: lexer, parser, expression tree and the numeric
//! strategies the tree evaluates with.

pub mod ast;
pub mod chars;
pub mod error;
pub mod lexer;
pub mod number;
pub mod parser;

use tracing::{debug, trace};

use crate::config::{Config, Strategy};
use error::EvalError;
use number::{Fraction, Limits, Number, Scientific};
use parser::Parser;

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub operation: String,
    pub result: f64,
}

/// Collects the intermediate operations of an evaluation when detailed mode is on.
#[derive(Debug, Default)]
pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

/// Parses and evaluates `expr` with the numeric strategy `N`.
pub fn evaluate_with<N: Number>(
    expr: &str,
    limits: &Limits,
    trace: &mut EvaluationTrace,
) -> Result<f64, EvalError> {
    let tree = Parser::<N>::new(expr, *limits)?.parse()?;
    trace!(?tree, "expression tree built");
    let value = tree.evaluate(limits, trace)?;
    let answer = value.finish(limits)?;
    // -0.0 only shows up when a zero result was negated on the way
    Ok(if answer == 0.0 { 0.0 } else { answer })
}

/// Evaluates `expr` once with the default configuration.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    Calculator::default().calculate(expr)
}

/// Runs expressions through the engine and remembers the last success.
///
/// A failed calculation leaves [`Calculator::last_expression`] and
/// [`Calculator::last_answer`] untouched.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: Config,
    last_expression: String,
    last_answer: f64,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(Config::default())
    }
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Calculator {
            config,
            last_expression: String::from("0"),
            last_answer: 0.0,
        }
    }

    pub fn calculate(&mut self, expr: &str) -> Result<f64, EvalError> {
        self.calculate_traced(expr, &mut EvaluationTrace::new(false))
    }

    pub fn calculate_traced(
        &mut self,
        expr: &str,
        trace: &mut EvaluationTrace,
    ) -> Result<f64, EvalError> {
        let limits = self.config.limits();
        let result = match self.config.strategy() {
            Strategy::ExactFraction => evaluate_with::<Fraction>(expr, &limits, trace),
            Strategy::Scientific => evaluate_with::<Scientific>(expr, &limits, trace),
        };

        match &result {
            Ok(answer) => {
                debug!(expr, strategy = %self.config.strategy(), answer, "calculated");
                self.last_expression = expr.to_string();
                self.last_answer = *answer;
            }
            Err(err) => debug!(expr, strategy = %self.config.strategy(), %err, "calculation failed"),
        }
        result
    }

    pub fn last_expression(&self) -> &str {
        &self.last_expression
    }

    pub fn last_answer(&self) -> f64 {
        self.last_answer
    }

    pub fn max_digits(&self) -> u32 {
        self.config.limits().max_digits
    }

    pub fn max_magnitude(&self) -> i32 {
        self.config.limits().max_magnitude
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
