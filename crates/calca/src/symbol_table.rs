//! Symbol table mapping names to their unevaluated definitions

use indexmap::IndexMap;

use crate::error::ResolveError;

/// Mapping from symbol name to its defining expression text.
///
/// Definitions are stored as written (trimmed) and are only expanded when a
/// query needs them. Inserting a name that already exists replaces its
/// definition in place, so the last assignment in file order wins and the
/// name keeps the position of its first definition.
///
/// # Example
///
/// ```
/// use calca::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// table.insert("x", "5");
/// table.insert("y", "x + 3");
/// table.insert("x", "7"); // overwrites
///
/// assert_eq!(table.lookup("x").unwrap(), "7");
/// assert_eq!(table.names().collect::<Vec<_>>(), vec!["x", "y"]);
/// assert!(table.lookup("z").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: IndexMap<String, String>,
}

impl SymbolTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` to `expr`, replacing any earlier definition.
    ///
    /// Returns the previous definition, if there was one.
    pub fn insert(&mut self, name: impl Into<String>, expr: impl Into<String>) -> Option<String> {
        let name = name.into().trim().to_string();
        let expr = expr.into().trim().to_string();
        log::debug!("define {} = {}", name, expr);
        self.entries.insert(name, expr)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up the definition of `name`.
    ///
    /// # Errors
    ///
    /// `UnboundSymbol` if `name` has never been assigned.
    pub fn lookup(&self, name: &str) -> Result<&str, ResolveError> {
        self.get(name).ok_or_else(|| ResolveError::UnboundSymbol {
            name: name.to_string(),
        })
    }

    /// Look up the definition of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check if `name` has a definition.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Iterate over `(name, definition)` pairs in first-definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, expr)| (name.as_str(), expr.as_str()))
    }

    /// Iterate over all defined names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Get the number of defined symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_trims() {
        let mut table = SymbolTable::new();
        table.insert("  rate ", " 0.25 ");
        assert_eq!(table.get("rate"), Some("0.25"));
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut table = SymbolTable::new();
        assert_eq!(table.insert("x", "1"), None);
        assert_eq!(table.insert("x", "2"), Some("1".to_string()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_missing_is_error() {
        let table = SymbolTable::new();
        assert_eq!(
            table.lookup("ghost"),
            Err(ResolveError::UnboundSymbol {
                name: "ghost".to_string()
            })
        );
    }
}
