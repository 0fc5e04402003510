//! Structured parse failures.
//!
//! A [`Diagnostic`] is the sole vehicle for reporting parse failures:
//! a human-readable message, an optional causing failure, and the tag
//! invocations responsible. There is no taxonomy of subtypes; a
//! recursion-limit failure, an unknown tag and a resolver error are all
//! the same shape, differing only in message and attached tags.
//!
//! Diagnostics are values. Constructing one (via
//! [`ParseContext::new_error`](crate::context::ParseContext::new_error)
//! and friends) never aborts anything; whether it is returned, raised or
//! collected is decided by whoever holds it.

use std::sync::Arc;

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::parser::TagInvocation;

/// A structured parse failure anchored to the message it occurred in.
///
/// Each diagnostic keeps a shared handle on the original message of the
/// parse level that created it, so spans in `tags` can be resolved to
/// text long after that parse level is gone. A diagnostic created by a
/// recursive parse points into the nested argument string, not the
/// outer message; chained causes therefore each render against their
/// own source.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct Diagnostic {
    message: String,
    #[source]
    cause: Option<Box<Diagnostic>>,
    tags: Vec<TagInvocation>,
    source_text: Arc<str>,
}

impl Diagnostic {
    pub(crate) fn new(message: impl Into<String>, source_text: Arc<str>) -> Self {
        Self {
            message: message.into(),
            cause: None,
            tags: Vec::new(),
            source_text,
        }
    }

    pub(crate) fn with_tags(mut self, tags: Vec<TagInvocation>) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn with_cause(mut self, cause: Diagnostic) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The human-readable failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The failure this one was caused by, if any.
    pub fn cause(&self) -> Option<&Diagnostic> {
        self.cause.as_deref()
    }

    /// The innermost failure in the cause chain.
    pub fn root_cause(&self) -> &Diagnostic {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// The tag invocations responsible, in source order.
    ///
    /// Empty for structural failures such as an exceeded recursion
    /// limit, which have no single location to blame.
    pub fn tags(&self) -> &[TagInvocation] {
        &self.tags
    }

    /// The original message of the parse level that created this
    /// diagnostic. Spans in [`Diagnostic::tags`] index into this text.
    pub fn original_message(&self) -> &str {
        &self.source_text
    }

    /// Render the failure and its cause chain in a compact form:
    ///
    /// ```text
    /// unable to parse tag argument as a number
    ///   tag: <my_tag:not_a_number>  (offset 14-35)
    /// caused by: expected digits, found 'not_a_number'
    /// ```
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        let mut current = Some(self);
        let mut first = true;

        while let Some(diag) = current {
            if first {
                lines.push(diag.message.clone());
            } else {
                lines.push(format!("caused by: {}", diag.message));
            }
            for tag in &diag.tags {
                let span = tag.span;
                lines.push(format!(
                    "  tag: {}  (offset {}-{})",
                    span.value(&diag.source_text),
                    span.start,
                    span.end
                ));
            }
            current = diag.cause();
            first = false;
        }

        lines.join("\n")
    }

    /// Render the failure with a source excerpt and caret underline:
    ///
    /// ```text
    /// error: unknown tag 'nope'
    ///  --> line 1, column 7
    ///   |
    /// 1 | hello <nope> world
    ///   |       ^^^^^^
    /// ```
    ///
    /// The caret line is aligned by display width, so wide characters
    /// before the span do not skew the underline.
    pub fn render_excerpt(&self) -> String {
        let mut lines = vec![format!("error: {}", self.message)];

        if let Some(tag) = self.tags.first() {
            let span = tag.span;
            let source = &*self.source_text;
            let (line, col) = span.line_col(source);

            let line_start = source[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let line_end = source[span.start..]
                .find('\n')
                .map(|i| span.start + i)
                .unwrap_or(source.len());
            let source_line = &source[line_start..line_end];

            let gutter = line.to_string();
            let pad = " ".repeat(gutter.len());
            let caret_pad = " ".repeat(source[line_start..span.start].width());
            let caret_end = span.end.min(line_end);
            let carets = "^".repeat(source[span.start..caret_end].width().max(1));

            lines.push(format!(" --> line {line}, column {col}"));
            lines.push(format!("{pad} |"));
            lines.push(format!("{gutter} | {source_line}"));
            lines.push(format!("{pad} | {caret_pad}{carets}"));
        }

        let mut cause = self.cause();
        while let Some(diag) = cause {
            lines.push(format!("caused by: {}", diag.message));
            cause = diag.cause();
        }

        lines.join("\n")
    }
}
