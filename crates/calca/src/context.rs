//! Resolution context configuration

/// Default bound on nested symbol expansion.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default bound on the number of tokens one query may expand to.
pub const DEFAULT_MAX_TOKENS: usize = 100_000;

/// Configuration for symbol resolution.
///
/// This is passed through every resolution call and controls the
/// recursion bound that turns an indirect cycle (`a = b`, `b = a`) into a
/// `CycleDetected` error instead of a stack overflow, and the size bound
/// that stops a short chain of doubling definitions (`b = a + a`,
/// `c = b + b`, ...) from expanding exponentially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    /// Maximum nesting of symbol expansions
    pub max_depth: usize,

    /// Maximum number of tokens in one fully expanded expression
    pub max_tokens: usize,

    /// Whether to log every expansion step at trace level
    pub trace: bool,
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tokens: DEFAULT_MAX_TOKENS,
            trace: false,
        }
    }
}

impl ResolveContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom expansion depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Set the expanded-size limit.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Enable or disable step tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Check whether `depth` is past the configured limit.
    pub fn exceeds(&self, depth: usize) -> bool {
        depth > self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        let ctx = ResolveContext::new();
        assert_eq!(ctx.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ctx.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(!ctx.trace);
    }

    #[test]
    fn test_exceeds_is_strict() {
        let ctx = ResolveContext::with_max_depth(3);
        assert!(!ctx.exceeds(3));
        assert!(ctx.exceeds(4));
    }

    #[test]
    fn test_builders_compose() {
        let ctx = ResolveContext::with_max_depth(7)
            .with_max_tokens(50)
            .with_trace(true);
        assert_eq!(ctx.max_depth, 7);
        assert_eq!(ctx.max_tokens, 50);
        assert!(ctx.trace);
    }
}
