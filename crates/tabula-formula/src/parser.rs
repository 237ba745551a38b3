//! Formula parser
//!
//! A recursive descent parser for arithmetic formulas with proper operator
//! precedence.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use tabula_core::{CellError, Position};

/// Parse formula source (without the leading `=`) into an AST
///
/// # Example
/// ```rust
/// use tabula_formula::parse_formula;
///
/// let ast = parse_formula("1+2").unwrap();
/// let ast = parse_formula("(A1 + B2) / 2").unwrap();
/// assert!(parse_formula("1+").is_err());
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = FormulaParser::new(formula)?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if parser.current_token() != &Token::Eof {
        return Err(FormulaError::Parse(format!(
            "Unexpected {:?} after expression",
            parser.current_token()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(Position),

    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,

    Eof,
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c.is_ascii_uppercase() {
            return self.scan_cell_reference();
        }

        if c == '#' {
            return self.scan_error_literal();
        }

        Err(FormulaError::Parse(format!(
            "Unexpected character '{}' at offset {}",
            c, self.pos
        )))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        // Integer part
        self.skip_digits();

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent part
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                self.advance();
            }
            self.skip_digits();
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(num) if num.is_finite() => Ok(Token::Number(num)),
            _ => Err(FormulaError::Parse(format!(
                "Invalid number literal '{}'",
                num_str
            ))),
        }
    }

    fn scan_cell_reference(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek_char().map_or(false, |c| c.is_ascii_uppercase()) {
            self.advance();
        }
        let letters_end = self.pos;
        self.skip_digits();

        if self.pos == letters_end {
            return Err(FormulaError::Parse(format!(
                "Unknown identifier '{}'",
                &self.input[start..self.pos]
            )));
        }

        // Out-of-range references stay in the tree as invalid positions
        Ok(Token::CellRef(Position::from_a1(&self.input[start..self.pos])))
    }

    fn scan_error_literal(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        self.advance(); // '#'
        while self.peek_char().map_or(false, |c| c.is_ascii_uppercase()) {
            self.advance();
        }
        if self.peek_char() == Some('!') {
            self.advance();
        }

        let literal = &self.input[start..self.pos];
        match CellError::from_str(literal) {
            // How a malformed reference prints; read it back as one
            Some(CellError::Ref) => Ok(Token::CellRef(Position::NONE)),
            Some(_) => Err(FormulaError::Parse(format!(
                "Error literal '{}' is not allowed in formulas",
                literal
            ))),
            None => Err(FormulaError::Parse(format!(
                "Unknown error literal '{}' at offset {}",
                literal, start
            ))),
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: +, -
    // 4. Primary: numbers, references, parentheses

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_multiplicative()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_unary()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<FormulaExpr> {
        let op = match self.current_token() {
            Token::Minus => UnaryOperator::Negate,
            Token::Plus => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        self.consume()?;
        let operand = self.parse_unary()?;
        Ok(FormulaExpr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume()?;
                Ok(FormulaExpr::Number(n))
            }

            Token::CellRef(pos) => {
                self.consume()?;
                Ok(FormulaExpr::CellRef(pos))
            }

            Token::LeftParen => {
                self.consume()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            token => Err(FormulaError::Parse(format!("Unexpected token: {:?}", token))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> Box<FormulaExpr> {
        Box::new(FormulaExpr::Number(n))
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_formula("42").unwrap(), FormulaExpr::Number(42.0));
        assert_eq!(parse_formula("3.25").unwrap(), FormulaExpr::Number(3.25));
        assert_eq!(parse_formula("1e10").unwrap(), FormulaExpr::Number(1e10));
        assert_eq!(parse_formula(".5").unwrap(), FormulaExpr::Number(0.5));
    }

    #[test]
    fn test_parse_arithmetic_precedence() {
        // Should parse as 1+(2*3) due to precedence
        let ast = parse_formula("1+2*3").unwrap();
        assert_eq!(
            ast,
            FormulaExpr::BinaryOp {
                op: BinaryOperator::Add,
                left: num(1.0),
                right: Box::new(FormulaExpr::BinaryOp {
                    op: BinaryOperator::Multiply,
                    left: num(2.0),
                    right: num(3.0),
                }),
            }
        );
    }

    #[test]
    fn test_parse_left_associative() {
        let ast = parse_formula("8-4-2").unwrap();
        if let FormulaExpr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Subtract);
            assert!(matches!(
                *left,
                FormulaExpr::BinaryOp {
                    op: BinaryOperator::Subtract,
                    ..
                }
            ));
            assert_eq!(*right, FormulaExpr::Number(2.0));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_unary() {
        let ast = parse_formula("-5").unwrap();
        assert_eq!(
            ast,
            FormulaExpr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: num(5.0),
            }
        );

        let ast = parse_formula("+-5").unwrap();
        assert!(matches!(
            ast,
            FormulaExpr::UnaryOp {
                op: UnaryOperator::Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_cell_reference() {
        assert_eq!(
            parse_formula("B2").unwrap(),
            FormulaExpr::CellRef(Position::new(1, 1))
        );
        assert_eq!(
            parse_formula("ZZZZ1").unwrap(),
            FormulaExpr::CellRef(Position::NONE)
        );
    }

    #[test]
    fn test_parse_ref_error_literal() {
        assert_eq!(
            parse_formula("#REF!").unwrap(),
            FormulaExpr::CellRef(Position::NONE)
        );

        let ast = parse_formula("A0*2").unwrap();
        assert_eq!(ast.to_string(), "#REF!*2");
        assert_eq!(parse_formula(&ast.to_string()).unwrap(), ast);

        assert!(parse_formula("#VALUE!+1").is_err());
        assert!(parse_formula("#ARITHM!").is_err());
        assert!(parse_formula("#REF").is_err());
        assert!(parse_formula("#N/A").is_err());
    }

    #[test]
    fn test_parse_parentheses_and_whitespace() {
        let ast = parse_formula(" ( 1 + 2 ) * 3 ").unwrap();
        if let FormulaExpr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Multiply);
            assert!(matches!(
                *left,
                FormulaExpr::BinaryOp {
                    op: BinaryOperator::Add,
                    ..
                }
            ));
            assert_eq!(*right, FormulaExpr::Number(3.0));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("1+").is_err());
        assert!(parse_formula("(1+2").is_err());
        assert!(parse_formula("1+2)").is_err());
        assert!(parse_formula("1 2").is_err());
        assert!(parse_formula("a1").is_err());
        assert!(parse_formula("SUM").is_err());
        assert!(parse_formula("1e").is_err());
        assert!(parse_formula("1e999").is_err());
        assert!(parse_formula("1 ? 2").is_err());
        assert!(parse_formula("#").is_err());
    }
}
