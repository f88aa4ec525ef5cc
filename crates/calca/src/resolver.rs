//! Symbol resolution
//!
//! Expands every symbol in an expression into its definition until only
//! numbers, operators and parentheses remain. Each expansion is wrapped in
//! parentheses so a definition keeps its own grouping: with `y = x + 3`,
//! `y * 2` resolves to `((5)+3)*2`, not `5+3*2`.

use crate::context::ResolveContext;
use crate::error::ResolveError;
use crate::symbol_table::SymbolTable;
use crate::token::{is_symbol_name, render, tokenize, Token};

/// Check that every symbol in `expr` is defined.
///
/// This walks only the top level of `expr`; definitions are checked when
/// they are expanded.
///
/// # Errors
///
/// - `UnboundSymbol` for a well-formed name with no definition
/// - `MalformedToken` for text that is neither a name nor a number
pub fn validate(expr: &str, table: &SymbolTable) -> Result<(), ResolveError> {
    tokenize(expr)
        .iter()
        .filter_map(Token::as_symbol)
        .try_for_each(|name| check_symbol(name, table))
}

/// Resolve `expr` to text containing no symbol references.
///
/// # Example
///
/// ```
/// use calca::{resolve, ResolveContext, SymbolTable};
///
/// let mut table = SymbolTable::new();
/// table.insert("x", "5");
/// table.insert("y", "x + 3");
///
/// let resolved = resolve("y * 2", &table, &ResolveContext::default()).unwrap();
/// assert_eq!(resolved, "((5)+3)*2");
/// ```
pub fn resolve(
    expr: &str,
    table: &SymbolTable,
    ctx: &ResolveContext,
) -> Result<String, ResolveError> {
    resolve_tokens(expr, table, ctx).map(|tokens| render(&tokens))
}

/// Resolve `expr` to a token sequence containing no [`Token::Symbol`].
///
/// # Errors
///
/// - `UnboundSymbol` / `MalformedToken` from [`validate`] or from a nested
///   definition
/// - `SelfReference` if a definition names its own symbol (`x = x + 1`)
/// - `CycleDetected` if expansion nests deeper than `ctx.max_depth`, which
///   is how indirect cycles such as `a = b`, `b = a` surface
/// - `ExpansionTooLarge` if the expansion grows past `ctx.max_tokens`
pub fn resolve_tokens(
    expr: &str,
    table: &SymbolTable,
    ctx: &ResolveContext,
) -> Result<Vec<Token>, ResolveError> {
    validate(expr, table)?;

    let mut resolved = Vec::new();
    expand(expr, table, ctx, 0, &mut resolved)?;
    Ok(resolved)
}

fn expand(
    expr: &str,
    table: &SymbolTable,
    ctx: &ResolveContext,
    depth: usize,
    out: &mut Vec<Token>,
) -> Result<(), ResolveError> {
    for token in tokenize(expr) {
        let name = match token {
            Token::Symbol(name) => name,
            other => {
                out.push(other);
                continue;
            }
        };

        check_symbol(&name, table)?;
        let definition = table.lookup(&name)?;

        if refers_to_itself(&name, definition) {
            return Err(ResolveError::SelfReference {
                name,
                definition: definition.to_string(),
            });
        }

        let depth = depth + 1;
        if ctx.exceeds(depth) {
            return Err(ResolveError::CycleDetected {
                name,
                depth,
                max: ctx.max_depth,
            });
        }

        if ctx.trace {
            log::trace!(
                "{:indent$}{} -> {}",
                "",
                name,
                definition,
                indent = depth * 2
            );
        }

        out.push(Token::LeftParen);
        expand(definition, table, ctx, depth, out)?;
        out.push(Token::RightParen);

        if out.len() > ctx.max_tokens {
            return Err(ResolveError::ExpansionTooLarge {
                name,
                limit: ctx.max_tokens,
            });
        }
    }

    Ok(())
}

fn check_symbol(name: &str, table: &SymbolTable) -> Result<(), ResolveError> {
    if table.contains(name) {
        Ok(())
    } else if is_symbol_name(name) {
        Err(ResolveError::UnboundSymbol {
            name: name.to_string(),
        })
    } else {
        Err(ResolveError::MalformedToken {
            token: name.to_string(),
        })
    }
}

/// Token-level check; `a = ab + 1` is not a self-reference.
fn refers_to_itself(name: &str, definition: &str) -> bool {
    tokenize(definition)
        .iter()
        .filter_map(Token::as_symbol)
        .any(|symbol| symbol == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (name, expr) in entries {
            table.insert(*name, *expr);
        }
        table
    }

    #[test]
    fn test_numbers_pass_through() {
        let ctx = ResolveContext::default();
        assert_eq!(resolve("2+3", &SymbolTable::new(), &ctx).unwrap(), "2+3");
    }

    #[test]
    fn test_substring_is_not_self_reference() {
        assert!(!refers_to_itself("a", "ab + 1"));
        assert!(refers_to_itself("a", "(a) * 2"));
    }

    #[test]
    fn test_validate_distinguishes_unbound_from_malformed() {
        let t = table(&[("x", "1")]);
        assert_eq!(
            validate("x + y", &t),
            Err(ResolveError::UnboundSymbol {
                name: "y".to_string()
            })
        );
        assert_eq!(
            validate("x + 3j", &t),
            Err(ResolveError::MalformedToken {
                token: "3j".to_string()
            })
        );
    }

    #[test]
    fn test_nested_unbound_symbol() {
        let t = table(&[("a", "b + 1")]);
        let err = resolve("a", &t, &ResolveContext::default()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnboundSymbol {
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn test_depth_bound() {
        let t = table(&[("a", "b"), ("b", "c"), ("c", "1")]);
        assert!(resolve("a", &t, &ResolveContext::with_max_depth(3)).is_ok());
        assert!(matches!(
            resolve("a", &t, &ResolveContext::with_max_depth(2)),
            Err(ResolveError::CycleDetected { depth: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_token_bound() {
        // "((1)+(1))" is 9 tokens
        let t = table(&[("a", "1"), ("b", "a + a")]);
        let ctx = ResolveContext::default().with_max_tokens(9);
        assert_eq!(resolve("b", &t, &ctx).unwrap(), "((1)+(1))");
        assert!(matches!(
            resolve("b + b", &t, &ctx),
            Err(ResolveError::ExpansionTooLarge { limit: 9, .. })
        ));
    }
}
