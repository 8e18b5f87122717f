//! Bounded arithmetic expression calculator.
//!
//! Expressions use the four basic operators, parentheses, chained unary signs
//! and implicit multiplication (`2(3)`, `(1)(2)`). Every value is kept either
//! as an exact fraction or as a rounded scientific number, and any value that
//! would outgrow the configured ceiling is reported as an overflow rather than
//! silently losing precision.
//!
//! ```
//! use boundcalc::{Calculator, Config, Strategy};
//!
//! let mut calc = Calculator::new(Config::new(Strategy::Scientific));
//! assert_eq!(calc.calculate("2(1/2)4(5-7)(0+1)").unwrap(), -8.0);
//! assert_eq!(calc.last_expression(), "2(1/2)4(5-7)(0+1)");
//! assert!(calc.calculate("5/0").unwrap_err().is_division_by_zero());
//! ```

pub mod calc_engine;
pub mod command;
pub mod config;
pub mod display;
pub mod features;

pub use calc_engine::error::{Ceiling, EvalError};
pub use calc_engine::number::{Fraction, Limits, Number, Scientific};
pub use calc_engine::{evaluate, evaluate_with, Calculator, EvaluationTrace, Step};
pub use config::{Config, ConfigError, Strategy};
