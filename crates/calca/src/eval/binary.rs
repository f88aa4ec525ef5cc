//! Binary operation evaluation

use crate::error::EvalError;
use crate::token::Operator;

use super::finite;

/// Apply a binary operator to two evaluated operands.
///
/// Division is real division. A zero divisor is an error rather than an
/// infinity, and any non-finite result is reported as overflow.
pub(crate) fn eval_binary(op: Operator, left: f64, right: f64) -> Result<f64, EvalError> {
    match op {
        Operator::Add => finite(left + right),
        Operator::Sub => finite(left - right),
        Operator::Mul => finite(left * right),
        Operator::Div => eval_div(left, right),
    }
}

fn eval_div(left: f64, right: f64) -> Result<f64, EvalError> {
    if right == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    finite(left / right)
}
