//! # Calca
//!
//! A literate calculator for plain-text documents.
//!
//! Calca reads text interspersed with assignments (`x = 5`) and queries
//! (`x * 2 =>`), and writes the same text back with every query annotated
//! with its value (`x * 2 => 10`).
//!
//! ## Architecture
//!
//! - **Tokenizer**: split expression text into numbers, symbols, operators
//!   and parentheses
//! - **Symbol Table**: map each name to its unevaluated definition
//! - **Resolver**: expand symbols recursively until only arithmetic is left,
//!   rejecting unbound names, self-reference and runaway nesting
//! - **Evaluator**: parse and evaluate the resolved arithmetic
//! - **Driver**: classify lines and stream a document through the above

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod driver;
pub mod error;
pub mod eval;
pub mod resolver;
pub mod symbol_table;
pub mod token;

// Re-export main types
pub use context::ResolveContext;
pub use driver::{classify, process_file, process_str, Driver, DriverOptions, Line, RunSummary};
pub use error::{CalcaError, EvalError, ResolveError, Result};
pub use eval::{evaluate, evaluate_tokens, format_number, Evaluate, Expr};
pub use resolver::{resolve, resolve_tokens, validate};
pub use symbol_table::SymbolTable;
pub use token::{tokenize, Operator, Token};

/// Calca version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
