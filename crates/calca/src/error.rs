//! Error types for Calca

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Calca operations.
///
/// Every variant is fatal to the line being processed. Under the default
/// fail-fast policy it is fatal to the whole run.
#[derive(Error, Debug)]
pub enum CalcaError {
    /// A line contains `=` or `=>` but does not have a usable shape
    #[error("line {line}: incorrect format: {text:?} ({reason})")]
    MalformedLine {
        /// 1-based line number
        line: usize,
        /// The offending line, without its terminator
        text: String,
        /// Why the line was rejected
        reason: String,
    },

    /// Resolving a query expression failed
    #[error("line {line}: {source}")]
    Resolve {
        /// 1-based line number
        line: usize,
        /// Underlying resolution failure
        #[source]
        source: ResolveError,
    },

    /// Evaluating a resolved expression failed
    #[error("line {line}: {source}")]
    Eval {
        /// 1-based line number
        line: usize,
        /// Underlying evaluation failure
        #[source]
        source: EvalError,
    },

    /// Input could not be read or output could not be created
    #[error("file {} is either not present or cannot be accessed: {source}", .path.display())]
    FileAccess {
        /// Absolute path of the file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// I/O failure while streaming lines
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CalcaError {
    /// The 1-based line number this error is attached to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CalcaError::MalformedLine { line, .. }
            | CalcaError::Resolve { line, .. }
            | CalcaError::Eval { line, .. } => Some(*line),
            CalcaError::FileAccess { .. } | CalcaError::Io(_) => None,
        }
    }
}

/// Errors raised while substituting symbols with their definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Symbol used in an expression has no entry in the table
    #[error("improper symbol: {name} is not defined")]
    UnboundSymbol {
        /// The symbol name
        name: String,
    },

    /// Token is neither a symbol name, a delimiter, nor a numeric literal
    #[error("improper symbol: {token:?} is not a symbol name or a number")]
    MalformedToken {
        /// The offending token text
        token: String,
    },

    /// A definition refers to its own name
    #[error("{name} = {definition} refers to itself; move {name} to one side of the equation")]
    SelfReference {
        /// The symbol name
        name: String,
        /// Its definition
        definition: String,
    },

    /// Expansion nested deeper than the configured bound
    #[error("cycle detected while resolving {name}: expansion depth {depth} exceeds limit of {max}")]
    CycleDetected {
        /// The symbol being expanded when the bound was hit
        name: String,
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// Expansion produced more tokens than the configured limit
    #[error("expanding {name} produces more than {limit} tokens")]
    ExpansionTooLarge {
        /// The symbol being expanded when the limit was hit
        name: String,
        /// Configured maximum token count
        limit: usize,
    },
}

/// Errors raised while evaluating a fully resolved expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Division by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Result is not a finite number
    #[error("numeric overflow while computing result")]
    Overflow,

    /// Nothing to evaluate
    #[error("empty expression")]
    EmptyExpression,

    /// Parentheses nest deeper than the parser allows
    #[error("expression nests deeper than {max} levels")]
    TooDeep {
        /// Configured maximum nesting
        max: usize,
    },

    /// Token in a position the grammar does not allow
    #[error("unexpected {token:?} at token {position}")]
    UnexpectedToken {
        /// The token text
        token: String,
        /// 0-based token index
        position: usize,
    },

    /// Input ended in the middle of an expression
    #[error("expression ended abruptly")]
    UnexpectedEnd,

    /// A `(` with no matching `)`
    #[error("could not find ')' matching '(' at token {position}")]
    UnclosedParen {
        /// 0-based token index of the `(`
        position: usize,
    },

    /// A symbol reached the evaluator; resolution should have removed it
    #[error("unresolved symbol {name:?} reached the evaluator")]
    UnresolvedSymbol {
        /// The symbol name
        name: String,
    },
}

/// Result type alias for Calca operations
pub type Result<T> = std::result::Result<T, CalcaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_reported_for_line_errors() {
        let err = CalcaError::Eval {
            line: 7,
            source: EvalError::DivisionByZero,
        };
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.to_string(), "line 7: division by zero");
    }

    #[test]
    fn test_file_access_has_no_line() {
        let err = CalcaError::FileAccess {
            path: PathBuf::from("/nope/in.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("/nope/in.txt"));
    }
}
