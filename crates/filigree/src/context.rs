//! Parse context for use within tag resolvers.
//!
//! A [`ParseContext`] threads recursion state and original-source
//! tracking through every tag resolution. Resolvers use it to read the
//! message being parsed, to parse nested markup (placeholder values,
//! inserted text) as if it were a fresh top-level message, and to
//! construct [`Diagnostic`]s anchored to the right source.
//!
//! Contexts are cheap values. Every recursion level gets its own: a
//! nested parse never mutates its parent's context, so concurrent
//! resolution of sibling tags cannot race on recursion bookkeeping.
//! The only state shared between levels is the read-only configuration
//! handle.

use std::sync::Arc;

use crate::diagnostic::Diagnostic;
use crate::engine::EngineConfig;
use crate::parser::{markup, TagInvocation};
use crate::tree::Parsed;

/// Parser context for one level of a parse.
///
/// Holds the original message of this level, the shared configuration,
/// and the recursion depth. Depth 0 is the top-level parse; each call
/// to [`ParseContext::parse`] runs one level deeper.
#[derive(Clone, Debug)]
pub struct ParseContext {
    message: Arc<str>,
    config: Arc<EngineConfig>,
    depth: usize,
}

impl ParseContext {
    /// The context for a top-level parse.
    pub(crate) fn root(message: &str, config: Arc<EngineConfig>) -> Self {
        Self {
            message: Arc::from(message),
            config,
            depth: 0,
        }
    }

    /// A fresh context one level deeper, for a nested message.
    fn child(&self, message: &str) -> Self {
        Self {
            message: Arc::from(message),
            config: Arc::clone(&self.config),
            depth: self.depth + 1,
        }
    }

    /// The full original input of the current parse level.
    ///
    /// On a recursive level this is the nested argument string being
    /// parsed, not the outer message.
    pub fn original_message(&self) -> &str {
        &self.message
    }

    /// How many recursive parses are above this one. 0 at top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a nested message with the settings of this context,
    /// including registered tags and placeholders.
    ///
    /// The nested parse behaves exactly like a fresh top-level parse of
    /// `message`, one recursion level deeper. The depth limit is
    /// checked before any work happens: resolving a placeholder whose
    /// value re-introduces the same placeholder terminates with a
    /// recursion-limit failure instead of recursing forever.
    ///
    /// On success the caller receives the sub-parse's tree together
    /// with any diagnostics its lenient fallbacks collected; what to do
    /// with them is the caller's decision.
    pub fn parse(&self, message: &str) -> Result<Parsed, Diagnostic> {
        let next_depth = self.depth + 1;
        if next_depth > self.config.recursion_limit {
            return Err(self.new_error(format!(
                "recursion limit of {} exceeded",
                self.config.recursion_limit
            )));
        }

        log::trace!("recursive parse entering depth {next_depth}");
        markup::run(&self.child(message))
    }

    /// Create a new failure without reference to a specific location.
    ///
    /// Construction never raises anything; the caller decides whether
    /// to return, collect or discard the diagnostic.
    pub fn new_error(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(message, Arc::clone(&self.message))
    }

    /// Create a new failure blamed on the given tag invocations.
    ///
    /// The invocations' spans must index into this context's original
    /// message, which is how the diagnostic renders their source text
    /// later.
    pub fn new_error_at(
        &self,
        message: impl Into<String>,
        tags: Vec<TagInvocation>,
    ) -> Diagnostic {
        Diagnostic::new(message, Arc::clone(&self.message)).with_tags(tags)
    }

    /// Create a new failure caused by a prior one.
    ///
    /// Chaining preserves the full failure history across recursion
    /// boundaries: a nested parse's diagnostic becomes the cause of the
    /// outer tag's diagnostic, each carrying spans into its own level's
    /// message.
    pub fn new_error_caused(
        &self,
        message: impl Into<String>,
        cause: Diagnostic,
        tags: Vec<TagInvocation>,
    ) -> Diagnostic {
        Diagnostic::new(message, Arc::clone(&self.message))
            .with_tags(tags)
            .with_cause(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Filigree;
    use crate::span::SourceSpan;

    fn context(input: &str) -> ParseContext {
        ParseContext::root(input, Filigree::new().config_handle())
    }

    fn limited(input: &str, limit: usize) -> ParseContext {
        let engine = Filigree::builder().recursion_limit(limit).build();
        ParseContext::root(input, engine.config_handle())
    }

    #[test]
    fn original_message_reflects_level() {
        let ctx = context("outer <bold>text</bold>");
        assert_eq!(ctx.original_message(), "outer <bold>text</bold>");
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn new_error_without_tags() {
        let ctx = context("input");
        let diag = ctx.new_error("it broke");
        assert_eq!(diag.message(), "it broke");
        assert!(diag.tags().is_empty());
        assert!(diag.cause().is_none());
    }

    #[test]
    fn new_error_matches_new_error_at_with_no_tags() {
        let ctx = context("input");
        let plain = ctx.new_error("it broke");
        let with_empty = ctx.new_error_at("it broke", Vec::new());

        assert_eq!(plain.message(), with_empty.message());
        assert!(plain.tags().is_empty() && with_empty.tags().is_empty());
        assert!(plain.cause().is_none() && with_empty.cause().is_none());
    }

    #[test]
    fn new_error_at_carries_tags() {
        let input = "<nope>";
        let ctx = context(input);
        let inv = TagInvocation::from_raw("nope", SourceSpan::new(0, 6));
        let diag = ctx.new_error_at("unknown tag", vec![inv]);

        assert_eq!(diag.tags().len(), 1);
        assert_eq!(diag.tags()[0].span.value(diag.original_message()), "<nope>");
    }

    #[test]
    fn new_error_caused_chains() {
        let ctx = context("input");
        let inner = ctx.new_error("inner");
        let outer = ctx.new_error_caused("outer", inner, Vec::new());

        assert_eq!(outer.message(), "outer");
        assert_eq!(outer.cause().unwrap().message(), "inner");
    }

    #[test]
    fn nested_parse_increments_depth() {
        let ctx = context("ignored");
        let parsed = ctx.parse("plain text").unwrap();
        assert_eq!(parsed.plain_text(), "plain text");
    }

    #[test]
    fn recursion_limit_checked_before_work() {
        let ctx = limited("ignored", 0);
        let err = ctx.parse("anything").unwrap_err();
        assert_eq!(err.message(), "recursion limit of 0 exceeded");
        assert!(err.tags().is_empty());
    }

    #[test]
    fn exact_limit_depth_succeeds() {
        // With limit N, a chain of exactly N nested parses succeeds
        // and the next one fails.
        let limit = 3;
        let mut ctx = limited("top", limit);

        for level in 0..limit {
            assert_eq!(ctx.depth(), level);
            assert!(ctx.parse("nested").is_ok());
            ctx = ctx.child("nested");
        }

        assert_eq!(ctx.depth(), limit);
        let err = ctx.parse("one too many").unwrap_err();
        assert_eq!(err.message(), format!("recursion limit of {limit} exceeded"));
    }

    #[test]
    fn sibling_parses_do_not_share_depth() {
        let ctx = limited("top", 1);

        // Each call starts from this context's depth; one deep call
        // does not consume budget from the next.
        assert!(ctx.parse("first").is_ok());
        assert!(ctx.parse("second").is_ok());
    }
}
