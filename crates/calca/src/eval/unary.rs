//! Unary sign evaluation
//!
//! A leading `+` is the identity and never reaches evaluation; the parser
//! folds any run of signs into at most one negation.

use crate::error::EvalError;

use super::finite;

/// Evaluate unary negation (`-x`).
pub(crate) fn eval_neg(operand: f64) -> Result<f64, EvalError> {
    finite(-operand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neg() {
        assert_eq!(eval_neg(4.0), Ok(-4.0));
        assert_eq!(eval_neg(-2.5), Ok(2.5));
    }

    #[test]
    fn test_neg_rejects_non_finite() {
        assert_eq!(eval_neg(f64::INFINITY), Err(EvalError::Overflow));
    }
}
