//! Arithmetic evaluation
//!
//! Resolved text is tokenized again, parsed into an [`Expr`] tree by a
//! recursive-descent [`Parser`], and evaluated by walking the tree. Only
//! numbers, `+ - * /`, unary signs and parentheses are understood; anything
//! else is an error, never something to execute.

pub mod binary;
pub mod parser;
pub mod unary;

pub use parser::Parser;

use crate::error::EvalError;
use crate::token::{tokenize, Operator, Token};

/// Parsed arithmetic expression.
///
/// Operators of equal precedence are collected into one flat [`Expr::Chain`]
/// rather than nested left-deep, so a long sum neither recurses nor drops
/// recursively. Parentheses are the only source of nesting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),

    /// Negated operand; an even run of `-` signs cancels and leaves no node
    Negate(Box<Expr>),

    /// `first op e1 op e2 ...`, folded left to right
    Chain {
        /// Leftmost operand
        first: Box<Expr>,
        /// Each following operator and its right operand
        rest: Vec<(Operator, Expr)>,
    },
}

impl Expr {
    /// Build a two-operand chain.
    pub fn binary(op: Operator, left: Expr, right: Expr) -> Self {
        Expr::Chain {
            first: Box::new(left),
            rest: vec![(op, right)],
        }
    }

    /// Build a negation node.
    pub fn negate(operand: Expr) -> Self {
        Expr::Negate(Box::new(operand))
    }
}

/// Trait for evaluating expression nodes to numbers.
pub trait Evaluate {
    /// Evaluate this node.
    fn eval(&self) -> Result<f64, EvalError>;
}

impl Evaluate for Expr {
    fn eval(&self) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => finite(*value),
            Expr::Negate(operand) => unary::eval_neg(operand.eval()?),
            Expr::Chain { first, rest } => {
                let mut acc = first.eval()?;
                for (op, operand) in rest {
                    acc = binary::eval_binary(*op, acc, operand.eval()?)?;
                }
                Ok(acc)
            }
        }
    }
}

/// Reject infinities and NaN.
pub(crate) fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate fully resolved expression text.
///
/// # Example
///
/// ```
/// use calca::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
/// assert!(evaluate("1/0").is_err());
/// ```
pub fn evaluate(resolved: &str) -> Result<f64, EvalError> {
    evaluate_tokens(&tokenize(resolved))
}

/// Evaluate a resolved token sequence.
pub fn evaluate_tokens(tokens: &[Token]) -> Result<f64, EvalError> {
    Parser::new(tokens).parse()?.eval()
}

/// Format a result for output.
///
/// Uses the shortest decimal text that reads back as the same value, so
/// whole numbers print without a fractional part. Negative zero prints as
/// `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
