use std::marker::PhantomData;

use super::ast::{Expr, ProductOp, SumOp};
use super::error::EvalError;
use super::lexer::{Lexer, Token};
use super::number::{Limits, Number};

/// Recursive-descent parser over a [`Lexer`].
///
/// ```text
/// Operand    := {'+'|'-'}* ( '(' Expression ')' | digit+ )
/// Term       := Operand { ('*'|'/') Operand }
/// Expression := Term { ('+'|'-') Term }
/// ```
pub struct Parser<'a, N> {
    lexer: Lexer<'a>,
    limits: Limits,
    number: PhantomData<N>,
}

impl<'a, N: Number> Parser<'a, N> {
    pub fn new(source: &'a str, limits: Limits) -> Result<Self, EvalError> {
        Ok(Parser {
            lexer: Lexer::new(source)?,
            limits,
            number: PhantomData,
        })
    }

    pub fn parse(mut self) -> Result<Expr<N>, EvalError> {
        let expr = self.expression()?;
        match self.lexer.current() {
            Token::End => Ok(expr),
            _ => Err(EvalError::UnexpectedToken { position: self.lexer.column() }),
        }
    }

    fn expression(&mut self) -> Result<Expr<N>, EvalError> {
        let mut left = self.term()?;
        while matches!(self.lexer.current(), Token::Op('+' | '-')) {
            left = self.operate_on_left(left)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr<N>, EvalError> {
        let mut left = self.operand()?;
        while matches!(self.lexer.current(), Token::Op('*' | '/')) {
            left = self.operate_on_left(left)?;
        }
        Ok(left)
    }

    /// Consumes the current operator and its right side, wrapping `left` so
    /// chains of equal precedence associate to the left.
    fn operate_on_left(&mut self, left: Expr<N>) -> Result<Expr<N>, EvalError> {
        let operator = self.lexer.current();
        let column = self.lexer.column();
        self.lexer.advance()?;

        let expr = match operator {
            Token::Op('+') => Expr::sum(SumOp::Add, left, self.term()?),
            Token::Op('-') => Expr::sum(SumOp::Subtract, left, self.term()?),
            Token::Op('*') => Expr::product(ProductOp::Multiply, left, self.operand()?),
            Token::Op('/') => {
                let right = self.operand()?;
                if matches!(&right, Expr::Value(value) if value.is_zero()) {
                    return Err(EvalError::DivisionByZeroLiteral { position: column });
                }
                Expr::product(ProductOp::Divide, left, right)
            }
            _ => return Err(EvalError::UnexpectedToken { position: column }),
        };
        Ok(expr)
    }

    fn operand(&mut self) -> Result<Expr<N>, EvalError> {
        let mut negative = false;
        while let Token::Op(sign @ ('+' | '-')) = self.lexer.current() {
            if sign == '-' {
                negative = !negative;
            }
            self.lexer.advance()?;
        }

        match self.lexer.current() {
            Token::LParen => {
                self.lexer.advance()?;
                let inner = self.expression()?;
                if self.lexer.current() != Token::RParen {
                    return Err(EvalError::UnmatchedOpenParen { position: self.lexer.column() });
                }
                self.lexer.advance()?;
                Ok(if negative { Expr::negation(inner) } else { inner })
            }
            Token::Digit(_) => {
                let mut value = N::zero();
                while let Token::Digit(digit) = self.lexer.current() {
                    value = value.push_digit(digit, &self.limits)?;
                    self.lexer.advance()?;
                }
                Ok(Expr::Value(if negative { value.negate() } else { value }))
            }
            _ => Err(EvalError::UnexpectedToken { position: self.lexer.column() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::number::{Fraction, Scientific};

    fn parse(source: &str) -> Result<Expr<Fraction>, EvalError> {
        Parser::new(source, Limits::default())?.parse()
    }

    fn int(value: i64) -> Expr<Fraction> {
        Expr::Value(Fraction::new(value.unsigned_abs(), 1, value < 0))
    }

    #[test]
    fn same_tier_chains_associate_left() {
        let expected = Expr::sum(SumOp::Subtract, Expr::sum(SumOp::Subtract, int(10), int(3)), int(2));
        assert_eq!(parse("10-3-2").unwrap(), expected);

        let expected =
            Expr::product(ProductOp::Divide, Expr::product(ProductOp::Multiply, int(8), int(4)), int(2));
        assert_eq!(parse("8*4/2").unwrap(), expected);
    }

    #[test]
    fn products_bind_tighter_than_sums() {
        let expected = Expr::sum(SumOp::Subtract, int(4), Expr::product(ProductOp::Multiply, int(3), int(5)));
        assert_eq!(parse("4-3*5").unwrap(), expected);
    }

    #[test]
    fn sign_chains_fold() {
        assert_eq!(parse("+--+-5").unwrap(), int(-5));
        assert_eq!(parse("--5").unwrap(), int(5));
        assert_eq!(
            parse("-(2)").unwrap(),
            Expr::negation(int(2))
        );
        assert_eq!(parse("--(2)").unwrap(), int(2));
    }

    #[test]
    fn implicit_multiplication_builds_products() {
        let expected = Expr::product(ProductOp::Multiply, int(2), int(3));
        assert_eq!(parse("2(3)").unwrap(), expected);
        assert_eq!(parse("(2)3").unwrap(), expected);
        assert_eq!(parse("(2)(3)").unwrap(), expected);
    }

    #[test]
    fn zero_literal_divisor_fails_at_parse_time() {
        assert_eq!(parse("5/0").unwrap_err(), EvalError::DivisionByZeroLiteral { position: 1 });
        assert_eq!(parse("5/-000").unwrap_err(), EvalError::DivisionByZeroLiteral { position: 1 });
        assert_eq!(parse("5/(0)").unwrap_err(), EvalError::DivisionByZeroLiteral { position: 1 });
        assert!(parse("20/(10-10)").is_ok());
    }

    #[test]
    fn literal_overflow_is_immediate() {
        let limits = Limits { max_digits: 3, ..Limits::default() };
        let err = Parser::<Fraction>::new("1+1000", limits).unwrap().parse().unwrap_err();
        assert!(matches!(err, EvalError::Overflow(_)));

        let limits = Limits { max_digits: 12, max_magnitude: 2 };
        let err = Parser::<Scientific>::new("1000", limits).unwrap().parse().unwrap_err();
        assert!(matches!(err, EvalError::Overflow(_)));
    }
}
