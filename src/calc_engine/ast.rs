use std::fmt;

use super::error::EvalError;
use super::number::{Limits, Number};
use super::EvaluationTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumOp {
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOp {
    Multiply,
    Divide,
}

impl fmt::Display for SumOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SumOp::Add => "+",
            SumOp::Subtract => "-",
        })
    }
}

impl fmt::Display for ProductOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductOp::Multiply => "*",
            ProductOp::Divide => "/",
        })
    }
}

/// Expression tree. Every node owns its children outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<N> {
    Value(N),
    Negation(Box<Expr<N>>),
    Sum {
        op: SumOp,
        left: Box<Expr<N>>,
        right: Box<Expr<N>>,
    },
    Product {
        op: ProductOp,
        left: Box<Expr<N>>,
        right: Box<Expr<N>>,
    },
}

impl<N: Number> Expr<N> {
    pub fn sum(op: SumOp, left: Expr<N>, right: Expr<N>) -> Self {
        Expr::Sum { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn product(op: ProductOp, left: Expr<N>, right: Expr<N>) -> Self {
        Expr::Product { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn negation(operand: Expr<N>) -> Self {
        Expr::Negation(Box::new(operand))
    }

    /// Evaluates the tree bottom-up, left child before right child.
    pub fn evaluate(&self, limits: &Limits, trace: &mut EvaluationTrace) -> Result<N, EvalError> {
        match self {
            Expr::Value(value) => Ok(value.clone()),
            Expr::Negation(operand) => {
                let value = operand.evaluate(limits, trace)?;
                let result = value.clone().negate();
                trace.add_step(format!("-({value})"), result.to_f64());
                Ok(result)
            }
            Expr::Sum { op, left, right } => {
                let left = left.evaluate(limits, trace)?;
                let right = right.evaluate(limits, trace)?;
                let result = sum(*op, &left, &right, limits)?;
                trace.add_step(format!("{left} {op} {right}"), result.to_f64());
                Ok(result)
            }
            Expr::Product { op, left, right } => {
                let left = left.evaluate(limits, trace)?;
                let right = right.evaluate(limits, trace)?;
                let result = match op {
                    ProductOp::Multiply => left.mul(&right, limits)?,
                    ProductOp::Divide => {
                        if right.is_zero() {
                            return Err(EvalError::DivisionByZero);
                        }
                        left.div(&right, limits)?
                    }
                };
                trace.add_step(format!("{left} {op} {right}"), result.to_f64());
                Ok(result)
            }
        }
    }
}

/// Folds mixed signs into a single magnitude addition or subtraction.
fn sum<N: Number>(op: SumOp, left: &N, right: &N, limits: &Limits) -> Result<N, EvalError> {
    let result = match (op, left.is_negative(), right.is_negative()) {
        (SumOp::Add, false, false) | (SumOp::Subtract, false, true) => {
            left.add_magnitudes(right, limits)?
        }
        (SumOp::Add, false, true) | (SumOp::Subtract, false, false) => {
            left.sub_magnitudes(right, limits)?
        }
        (SumOp::Add, true, false) => right.sub_magnitudes(left, limits)?,
        (SumOp::Add, true, true) | (SumOp::Subtract, true, false) => {
            left.add_magnitudes(right, limits)?.negate()
        }
        (SumOp::Subtract, true, true) => left.sub_magnitudes(right, limits)?.negate(),
    };
    Ok(result)
}
