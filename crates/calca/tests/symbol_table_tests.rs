//! Symbol table tests

use calca::*;

// ═══════════════════════════════════════════════════════════════════════
// Basic Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_symbol_table_new_is_empty() {
    let table = SymbolTable::new();
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert!(!table.contains("x"));
}

#[test]
fn test_symbol_table_insert_and_lookup() {
    let mut table = SymbolTable::new();
    table.insert("x", "5");
    table.insert("y", "x + 3");

    assert_eq!(table.lookup("x").unwrap(), "5");
    assert_eq!(table.lookup("y").unwrap(), "x + 3");
    assert!(table.contains("y"));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_symbol_table_lookup_missing() {
    let table = SymbolTable::new();
    assert!(matches!(
        table.lookup("z"),
        Err(ResolveError::UnboundSymbol { name }) if name == "z"
    ));
    assert_eq!(table.get("z"), None);
}

// ═══════════════════════════════════════════════════════════════════════
// Last Write Wins
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_symbol_table_overwrite() {
    let mut table = SymbolTable::new();
    table.insert("x", "1");
    table.insert("x", "2");

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("x").unwrap(), "2");
}

#[test]
fn test_symbol_table_overwrite_keeps_first_position() {
    let mut table = SymbolTable::new();
    table.insert("a", "1");
    table.insert("b", "2");
    table.insert("a", "3");

    assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(
        table.iter().collect::<Vec<_>>(),
        vec![("a", "3"), ("b", "2")]
    );
}

#[test]
fn test_symbol_table_later_definition_changes_dependents() {
    let mut table = SymbolTable::new();
    table.insert("x", "5");
    table.insert("y", "x + 3");
    table.insert("x", "10");

    let ctx = ResolveContext::default();
    let value = evaluate(&resolve("y", &table, &ctx).unwrap()).unwrap();
    assert_eq!(value, 13.0);
}
