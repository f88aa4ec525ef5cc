//! Recursive-descent parser for resolved expressions
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Only parentheses recurse. Operator runs and sign runs are consumed in
//! loops, and paren nesting is bounded by [`DEFAULT_MAX_NESTING`].

use crate::error::EvalError;
use crate::token::{Operator, Token};

use super::Expr;

/// Default bound on parenthesis nesting.
pub const DEFAULT_MAX_NESTING: usize = 256;

/// Parser over a token slice.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser positioned at the first token.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_NESTING)
    }

    /// Create a parser with a custom parenthesis nesting limit.
    pub fn with_max_depth(tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse the whole token slice as one expression.
    ///
    /// # Errors
    ///
    /// - `EmptyExpression` if there are no tokens
    /// - `UnexpectedToken` / `UnexpectedEnd` / `UnclosedParen` for bad syntax
    /// - `UnresolvedSymbol` if a symbol is still present
    /// - `TooDeep` if parentheses nest past the limit
    pub fn parse(mut self) -> Result<Expr, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::EmptyExpression);
        }

        let expr = self.expression()?;
        match self.peek() {
            Some(token) => Err(self.unexpected(token)),
            None => Ok(expr),
        }
    }

    fn expression(&mut self) -> Result<Expr, EvalError> {
        self.chain(&[Operator::Add, Operator::Sub], Self::term)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        self.chain(&[Operator::Mul, Operator::Div], Self::unary)
    }

    /// One precedence level: `operand (op operand)*` as a flat chain.
    fn chain(
        &mut self,
        accepted: &[Operator],
        operand: fn(&mut Self) -> Result<Expr, EvalError>,
    ) -> Result<Expr, EvalError> {
        let first = operand(self)?;
        let mut rest = Vec::new();
        while let Some(op) = self.eat_operator(accepted) {
            rest.push((op, operand(self)?));
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Chain {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let mut negative = false;
        while let Some(op) = self.eat_operator(&[Operator::Add, Operator::Sub]) {
            negative ^= op == Operator::Sub;
        }

        let operand = self.primary()?;
        Ok(if negative {
            Expr::negate(operand)
        } else {
            operand
        })
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let open = self.pos;
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(*value)),
            Some(Token::LeftParen) => {
                if self.depth >= self.max_depth {
                    return Err(EvalError::TooDeep {
                        max: self.max_depth,
                    });
                }
                self.depth += 1;
                let inner = self.expression()?;
                self.depth -= 1;

                match self.advance() {
                    Some(Token::RightParen) => Ok(inner),
                    Some(_) => {
                        self.pos -= 1;
                        Err(self.unexpected(&self.tokens[self.pos]))
                    }
                    None => Err(EvalError::UnclosedParen { position: open }),
                }
            }
            Some(Token::Symbol(name)) => Err(EvalError::UnresolvedSymbol { name: name.clone() }),
            Some(token) => {
                self.pos -= 1;
                Err(self.unexpected(token))
            }
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_operator(&mut self, accepted: &[Operator]) -> Option<Operator> {
        match self.peek() {
            Some(Token::Operator(op)) if accepted.contains(op) => {
                self.pos += 1;
                Some(*op)
            }
            _ => None,
        }
    }

    fn unexpected(&self, token: &Token) -> EvalError {
        EvalError::UnexpectedToken {
            token: token.to_string(),
            position: self.pos,
        }
    }
}
