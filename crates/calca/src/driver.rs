//! Line driver
//!
//! Classifies each input line as plain text, an assignment
//! (`name = expression`) or a query (`expression =>`), feeds assignments
//! into the [`SymbolTable`] and answers queries through the resolver and
//! evaluator. Lines are processed strictly top to bottom, so a query only
//! sees symbols assigned above it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::context::ResolveContext;
use crate::error::{CalcaError, Result};
use crate::eval::{evaluate, format_number};
use crate::resolver::resolve;
use crate::symbol_table::SymbolTable;
use crate::token::is_symbol_name;

/// A classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// No `=` anywhere; copied to output as is
    Text,

    /// `name = expression`
    Assignment {
        /// Trimmed symbol name
        name: &'a str,
        /// Trimmed definition
        expr: &'a str,
    },

    /// `expression =>`
    Query {
        /// Everything before the first `=>`, trailing whitespace removed
        expr: &'a str,
    },
}

fn query_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(.*?)\s*=>").expect("query pattern is valid"))
}

fn assignment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(.*?)\s*=\s*(.*)$").expect("assignment pattern is valid"))
}

/// Classify one line of text (without its terminator).
///
/// A line containing `=>` is always a query, even if it also contains `=`
/// elsewhere; text after the `=>` is ignored.
///
/// # Errors
///
/// `MalformedLine` when the line contains `=` or `=>` but:
/// - a query expression itself contains `=`
/// - an assignment has an empty name or an empty definition
/// - an assignment's left-hand side is not a single symbol name
pub fn classify(line: usize, text: &str) -> Result<Line<'_>> {
    if text.contains("=>") {
        let expr = query_regex()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| malformed(line, text, "no expression before `=>`"))?;

        if expr.contains('=') {
            return Err(malformed(line, text, "expression before `=>` contains `=`"));
        }
        return Ok(Line::Query { expr });
    }

    if !text.contains('=') {
        return Ok(Line::Text);
    }

    let caps = assignment_regex()
        .captures(text)
        .ok_or_else(|| malformed(line, text, "expected `name = expression`"))?;
    let name = caps.get(1).map_or("", |m| m.as_str()).trim();
    let expr = caps.get(2).map_or("", |m| m.as_str()).trim();

    if name.is_empty() {
        return Err(malformed(line, text, "missing symbol name before `=`"));
    }
    if !is_symbol_name(name) {
        return Err(malformed(
            line,
            text,
            "left-hand side of `=` must be a single symbol",
        ));
    }
    if expr.is_empty() {
        return Err(malformed(line, text, "missing expression after `=`"));
    }

    Ok(Line::Assignment { name, expr })
}

fn malformed(line: usize, text: &str, reason: &str) -> CalcaError {
    CalcaError::MalformedLine {
        line,
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Options and Summary
// ═══════════════════════════════════════════════════════════════════════

/// Options controlling a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Resolution settings
    pub context: ResolveContext,

    /// Continue past failing lines instead of aborting the run
    pub keep_going: bool,
}

impl DriverOptions {
    /// Fail-fast options with the given resolution context.
    pub fn with_context(context: ResolveContext) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }

    /// Enable or disable keep-going mode.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// Counts collected over one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Lines copied through unchanged
    pub text_lines: usize,
    /// Assignment lines
    pub assignments: usize,
    /// Query lines answered
    pub queries: usize,
    /// Errors recovered from in keep-going mode
    pub failures: Vec<CalcaError>,
}

impl RunSummary {
    /// True when no line failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Driver
// ═══════════════════════════════════════════════════════════════════════

/// Processes one document, owning its symbol table for the duration.
#[derive(Debug, Default)]
pub struct Driver {
    table: SymbolTable,
    options: DriverOptions,
    summary: RunSummary,
}

impl Driver {
    /// Create a driver with an empty symbol table.
    pub fn new(options: DriverOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// The symbols defined so far.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Process one raw line (terminator included) and return its output.
    ///
    /// Text and assignment lines come back unchanged. A query comes back as
    /// `"<expression> => <value>\n"`.
    pub fn process_line(&mut self, line: usize, raw: &str) -> Result<String> {
        let text = raw.trim_end_matches(['\n', '\r']);

        match classify(line, text)? {
            Line::Text => {
                self.summary.text_lines += 1;
                Ok(raw.to_string())
            }
            Line::Assignment { name, expr } => {
                log::debug!("line {}: assignment {} = {}", line, name, expr);
                self.table.insert(name, expr);
                self.summary.assignments += 1;
                Ok(raw.to_string())
            }
            Line::Query { expr } => {
                log::debug!("line {}: query {}", line, expr);
                let value = self.query(line, expr)?;
                self.summary.queries += 1;
                Ok(format!("{} => {}\n", expr, format_number(value)))
            }
        }
    }

    /// `Ok(None)` means the raw bytes are the output.
    fn process_bytes(&mut self, line: usize, raw: &[u8]) -> Result<Option<String>> {
        match std::str::from_utf8(raw) {
            Ok(text) => self.process_line(line, text).map(Some),
            Err(_) if !raw.contains(&b'=') => {
                log::debug!("line {}: not UTF-8, copied through", line);
                self.summary.text_lines += 1;
                Ok(None)
            }
            Err(_) => {
                let text = String::from_utf8_lossy(raw);
                Err(malformed(
                    line,
                    text.trim_end_matches(['\n', '\r']),
                    "line is not valid UTF-8",
                ))
            }
        }
    }

    fn query(&self, line: usize, expr: &str) -> Result<f64> {
        let resolved = resolve(expr, &self.table, &self.options.context)
            .map_err(|source| CalcaError::Resolve { line, source })?;
        log::debug!("line {}: {} resolves to {}", line, expr, resolved);

        evaluate(&resolved).map_err(|source| CalcaError::Eval { line, source })
    }

    /// Stream every line of `reader` to `writer`.
    ///
    /// In fail-fast mode the first line error is returned and nothing after
    /// it is written. In keep-going mode a failing line is copied verbatim
    /// and recorded in the summary. I/O errors always abort.
    ///
    /// Lines are read as bytes. A line that is not valid UTF-8 is prose and
    /// is copied through byte for byte, unless it contains `=`, in which
    /// case it is a `MalformedLine`.
    pub fn run<R: BufRead, W: Write>(mut self, mut reader: R, writer: &mut W) -> Result<RunSummary> {
        let mut raw = Vec::new();
        let mut line = 0;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line += 1;

            match self.process_bytes(line, &raw) {
                Ok(Some(output)) => writer.write_all(output.as_bytes())?,
                Ok(None) => writer.write_all(&raw)?,
                Err(err) if self.options.keep_going && err.line().is_some() => {
                    log::warn!("{}", err);
                    writer.write_all(&raw)?;
                    self.summary.failures.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        log::info!(
            "processed {} lines: {} assignments, {} queries, {} failed",
            line,
            self.summary.assignments,
            self.summary.queries,
            self.summary.failures.len()
        );
        Ok(self.summary)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Process a whole document held in memory.
///
/// # Example
///
/// ```
/// use calca::{process_str, DriverOptions};
///
/// let input = "x = 5\ny = x + 3\ny + 2 =>\n";
/// let output = process_str(input, DriverOptions::default()).unwrap();
/// assert_eq!(output, "x = 5\ny = x + 3\ny + 2 => 10\n");
/// ```
pub fn process_str(input: &str, options: DriverOptions) -> Result<String> {
    let mut output = Vec::new();
    Driver::new(options).run(input.as_bytes(), &mut output)?;
    String::from_utf8(output)
        .map_err(|err| CalcaError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Process `input` into `output`.
///
/// Both paths are made absolute first. The input is opened and the output
/// created before any line is processed, so a `FileAccess` error means
/// nothing was evaluated.
pub fn process_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: DriverOptions,
) -> Result<RunSummary> {
    let input = absolute(input.as_ref())?;
    let output = absolute(output.as_ref())?;

    let reader = File::open(&input).map_err(|source| CalcaError::FileAccess {
        path: input.clone(),
        source,
    })?;
    let writer = File::create(&output).map_err(|source| CalcaError::FileAccess {
        path: output.clone(),
        source,
    })?;

    log::info!("{} -> {}", input.display(), output.display());

    let mut writer = BufWriter::new(writer);
    let summary = Driver::new(options).run(BufReader::new(reader), &mut writer)?;
    writer.flush()?;
    Ok(summary)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| CalcaError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
