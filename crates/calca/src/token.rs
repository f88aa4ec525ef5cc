//! Tokenizer for arithmetic expression text
//!
//! Splits raw text into numbers, symbol names, operators and parentheses.
//! The tokenizer only segments: a non-numeric segment always becomes a
//! [`Token::Symbol`], and whether that symbol is defined (or is even a
//! well-formed name) is decided later by the resolver.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// The four arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    /// Map a delimiter character to its operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// The operator's source character.
    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Whether this operator may also appear as a sign (`-x`, `+x`).
    pub fn is_sign(self) -> bool {
        matches!(self, Operator::Add | Operator::Sub)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Anything else between delimiters, trimmed
    Symbol(String),
    /// Arithmetic operator
    Operator(Operator),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl Token {
    /// Create a symbol token.
    pub fn symbol(name: impl Into<String>) -> Self {
        Token::Symbol(name.into())
    }

    /// Whether this token is an operator or parenthesis.
    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            Token::Operator(_) | Token::LeftParen | Token::RightParen
        )
    }

    /// The symbol name, if this is a symbol token.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Token::Symbol(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Symbol(name) => write!(f, "{}", name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

fn delimiter(c: char) -> Option<Token> {
    match c {
        '(' => Some(Token::LeftParen),
        ')' => Some(Token::RightParen),
        _ => Operator::from_char(c).map(Token::Operator),
    }
}

fn number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("numeric literal pattern is valid")
    })
}

fn mantissa_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)[eE]$").expect("mantissa pattern is valid")
    })
}

/// Parse `text` as a numeric literal.
///
/// Accepts an optional sign, decimal digits with at most one point, and an
/// optional exponent. Spellings such as `inf` or `nan` are rejected even
/// though `f64::from_str` would take them.
pub fn parse_number(text: &str) -> Option<f64> {
    if number_regex().is_match(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// Check whether `text` is a numeric literal.
pub fn is_number(text: &str) -> bool {
    parse_number(text).is_some()
}

/// Check whether `text` can name a symbol.
///
/// A name is non-empty, does not start with a digit or `.`, and contains
/// neither a delimiter nor `=`. Inner whitespace is allowed, so
/// `total cost` is a single name.
pub fn is_symbol_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        None => false,
        Some(first) if first.is_ascii_digit() || first == '.' || first.is_whitespace() => false,
        Some(_) => {
            text == text.trim_end()
                && !text.chars().any(|c| c == '=' || delimiter(c).is_some())
        }
    }
}

/// Split `input` into tokens.
///
/// Characters accumulate into a pending segment until a delimiter
/// (`+ - * / ( )`) or the end of input is reached. The trimmed segment, if
/// non-empty, becomes a number or symbol token, and the delimiter becomes
/// its own token.
///
/// If the whole (trimmed) input is a signed numeric literal, the result is
/// that single number. A `+` or `-` directly after a mantissa ending in `e`
/// continues the literal as an exponent sign.
///
/// # Example
///
/// ```
/// use calca::{tokenize, Operator, Token};
///
/// assert_eq!(
///     tokenize("2 * rate"),
///     vec![
///         Token::Number(2.0),
///         Token::Operator(Operator::Mul),
///         Token::symbol("rate"),
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    if let Some(value) = parse_number(input.trim()) {
        return vec![Token::Number(value)];
    }

    let mut tokens = Vec::new();
    let mut pending = String::new();

    for c in input.chars() {
        match delimiter(c) {
            Some(Token::Operator(op)) if op.is_sign() && continues_exponent(&pending) => {
                pending.push(c);
            }
            Some(token) => {
                flush(&mut pending, &mut tokens);
                tokens.push(token);
            }
            None => pending.push(c),
        }
    }
    flush(&mut pending, &mut tokens);

    tokens
}

fn continues_exponent(pending: &str) -> bool {
    mantissa_regex().is_match(pending.trim_start())
}

fn flush(pending: &mut String, tokens: &mut Vec<Token>) {
    let segment = pending.trim();
    if !segment.is_empty() {
        tokens.push(match parse_number(segment) {
            Some(value) => Token::Number(value),
            None => Token::symbol(segment),
        });
    }
    pending.clear();
}

/// Concatenate tokens back into expression text.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}
