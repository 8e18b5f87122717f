use tracing::trace;

use super::chars;
use super::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Digit(u32),
    Op(char),
    LParen,
    RParen,
    /// Returned once the input is exhausted, and on every advance after that.
    End,
}

impl Token {
    pub fn is_operator(self) -> bool {
        matches!(self, Token::Op(c) if chars::is_operator(c))
    }

    fn from_digit(c: char) -> Self {
        Token::Digit(c as u32 - '0' as u32)
    }
}

/// Single-lookahead cursor over an expression.
///
/// The lexer never materializes a token list. It validates the input as it
/// goes, so the parser only ever sees structurally sound sequences, and it
/// inserts the `*` of implicit multiplication (`2(3)`, `(1)(2)`, `(4)5`) by
/// returning the synthesized operator first and holding the real token back
/// until the next [`Lexer::advance`].
pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character.
    offset: usize,
    /// Character column of the next unread character.
    column: usize,
    open_parens: usize,
    current: Token,
    current_column: usize,
    pending: Option<(Token, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Result<Self, EvalError> {
        let mut lexer = Lexer {
            source,
            offset: 0,
            column: 0,
            open_parens: 0,
            current: Token::End,
            current_column: 0,
            pending: None,
        };

        let Some((column, c)) = lexer.next_char() else {
            return Err(EvalError::EmptyExpression);
        };

        lexer.current = match c {
            '*' | '/' => return Err(EvalError::LeadingOperator { position: column }),
            ')' => return Err(EvalError::UnmatchedCloseParen { position: column }),
            '(' => {
                lexer.open_parens += 1;
                Token::LParen
            }
            '+' | '-' => Token::Op(c),
            c if chars::is_digit(c) => Token::from_digit(c),
            _ => return Err(EvalError::InvalidCharacter { character: c, position: column }),
        };
        lexer.current_column = column;

        Ok(lexer)
    }

    pub fn current(&self) -> Token {
        self.current
    }

    /// Column of the current token; for [`Token::End`] this is the input length.
    pub fn column(&self) -> usize {
        self.current_column
    }

    pub fn advance(&mut self) -> Result<(), EvalError> {
        if let Some((token, column)) = self.pending.take() {
            self.current = token;
            self.current_column = column;
            return Ok(());
        }

        let last = self.current;

        let Some((column, c)) = self.next_char() else {
            let position = self.column;
            if self.open_parens != 0 {
                return Err(EvalError::UnmatchedOpenParen { position });
            }
            if last.is_operator() {
                return Err(EvalError::TrailingOperator { position });
            }
            self.current = Token::End;
            self.current_column = position;
            return Ok(());
        };

        let token = match c {
            c if chars::is_digit(c) => Token::from_digit(c),
            '+' | '-' => Token::Op(c),
            '*' | '/' => {
                if last == Token::LParen {
                    return Err(EvalError::InvalidUnaryMulDiv { position: column });
                }
                if last.is_operator() {
                    return Err(EvalError::AdjacentOperators { position: column });
                }
                Token::Op(c)
            }
            '(' => {
                self.open_parens += 1;
                Token::LParen
            }
            ')' => {
                if self.open_parens == 0 {
                    return Err(EvalError::UnmatchedCloseParen { position: column });
                }
                if last.is_operator() {
                    return Err(EvalError::LeadingOperator { position: column });
                }
                if last == Token::LParen {
                    return Err(EvalError::EmptyParentheses { position: column });
                }
                self.open_parens -= 1;
                Token::RParen
            }
            _ => return Err(EvalError::InvalidCharacter { character: c, position: column }),
        };

        let implicit_multiplication = match token {
            Token::Digit(_) => last == Token::RParen,
            Token::LParen => matches!(last, Token::RParen | Token::Digit(_)),
            _ => false,
        };

        self.current_column = column;
        if implicit_multiplication {
            trace!(column, "implicit multiplication");
            self.pending = Some((token, column));
            self.current = Token::Op('*');
        } else {
            self.current = token;
        }

        Ok(())
    }

    /// Skips blanks and consumes the next character, returning it with its column.
    fn next_char(&mut self) -> Option<(usize, char)> {
        let source = self.source;
        for c in source[self.offset..].chars() {
            let column = self.column;
            self.offset += c.len_utf8();
            self.column += 1;
            if !chars::is_blank(c) {
                return Some((column, c));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::*;

    fn tokens(source: &str) -> Result<Vec<Token>, EvalError> {
        let mut lexer = Lexer::new(source)?;
        let mut out = vec![lexer.current()];
        while lexer.current() != End {
            lexer.advance()?;
            out.push(lexer.current());
        }
        Ok(out)
    }

    #[test]
    fn streams_plain_expression() {
        assert_eq!(
            tokens(" 12 + 3").unwrap(),
            vec![Digit(1), Digit(2), Op('+'), Digit(3), End]
        );
    }

    #[test]
    fn synthesizes_implicit_multiplication() {
        assert_eq!(
            tokens("2(3)").unwrap(),
            vec![Digit(2), Op('*'), LParen, Digit(3), RParen, End]
        );
        assert_eq!(
            tokens("(1)(2)").unwrap(),
            vec![LParen, Digit(1), RParen, Op('*'), LParen, Digit(2), RParen, End]
        );
        assert_eq!(
            tokens("(4)5").unwrap(),
            vec![LParen, Digit(4), RParen, Op('*'), Digit(5), End]
        );
    }

    #[test]
    fn blank_separated_digits_stay_one_run() {
        assert_eq!(tokens("1 2").unwrap(), vec![Digit(1), Digit(2), End]);
    }

    #[test]
    fn end_is_sticky() {
        let mut lexer = Lexer::new("7").unwrap();
        lexer.advance().unwrap();
        assert_eq!(lexer.current(), End);
        assert_eq!(lexer.column(), 1);
        lexer.advance().unwrap();
        assert_eq!(lexer.current(), End);
    }

    #[test]
    fn rejects_bad_starts() {
        assert_eq!(tokens("").unwrap_err(), EvalError::EmptyExpression);
        assert_eq!(tokens("   ").unwrap_err(), EvalError::EmptyExpression);
        assert_eq!(tokens("*3+5").unwrap_err(), EvalError::LeadingOperator { position: 0 });
        assert_eq!(tokens(")").unwrap_err(), EvalError::UnmatchedCloseParen { position: 0 });
        assert_eq!(
            tokens("x+1").unwrap_err(),
            EvalError::InvalidCharacter { character: 'x', position: 0 }
        );
    }

    #[test]
    fn reports_structural_errors_with_columns() {
        assert_eq!(tokens("3 + * 4").unwrap_err(), EvalError::AdjacentOperators { position: 4 });
        assert_eq!(tokens("(*3)").unwrap_err(), EvalError::InvalidUnaryMulDiv { position: 1 });
        assert_eq!(tokens("( )").unwrap_err(), EvalError::EmptyParentheses { position: 2 });
        assert_eq!(tokens("(7+)").unwrap_err(), EvalError::LeadingOperator { position: 3 });
        assert_eq!(tokens("4+5)").unwrap_err(), EvalError::UnmatchedCloseParen { position: 3 });
        assert_eq!(tokens("(4+5").unwrap_err(), EvalError::UnmatchedOpenParen { position: 4 });
        assert_eq!(tokens("3+").unwrap_err(), EvalError::TrailingOperator { position: 2 });
        assert_eq!(
            tokens("2^3").unwrap_err(),
            EvalError::InvalidCharacter { character: '^', position: 1 }
        );
    }
}
