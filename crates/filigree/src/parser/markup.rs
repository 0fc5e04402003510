//! Main markup parser.
//!
//! Walks the token stream and builds the component tree, dispatching
//! tag invocations to the configured resolvers.

use crate::context::ParseContext;
use crate::diagnostic::Diagnostic;
use crate::span::SourceSpan;
use crate::tags::Tag;
use crate::tree::{Component, Parsed};

use super::lexer::{Lexer, Token};
use super::tag::TagInvocation;

/// Parse the context's message into a component tree.
///
/// In strict configuration the first failure aborts with its
/// [`Diagnostic`]; in lenient configuration the offending markup stays
/// in the output as literal text and the failures are collected on the
/// returned [`Parsed`].
pub(crate) fn run(ctx: &ParseContext) -> Result<Parsed, Diagnostic> {
    log::trace!(
        "parsing {} bytes at depth {}",
        ctx.original_message().len(),
        ctx.depth()
    );

    let mut builder = TreeBuilder::new(ctx);
    for token in Lexer::new(ctx.original_message()) {
        builder.process_token(token)?;
    }
    builder.finish()
}

/// An entry on the open-tag stack.
struct Frame {
    /// The invocation that opened this frame; `None` for the root.
    invocation: Option<TagInvocation>,
    /// Style applied to everything the frame encloses.
    style: crate::style::Style,
    /// Completed child nodes, in source order.
    children: Vec<Component>,
}

impl Frame {
    fn root() -> Self {
        Self {
            invocation: None,
            style: crate::style::Style::default(),
            children: Vec::new(),
        }
    }

    fn name(&self) -> Option<&str> {
        self.invocation.as_ref().map(|inv| inv.name.as_str())
    }
}

struct TreeBuilder<'c> {
    ctx: &'c ParseContext,
    frames: Vec<Frame>,
    /// Pending literal run, flushed before any structural change.
    text: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> TreeBuilder<'c> {
    fn new(ctx: &'c ParseContext) -> Self {
        Self {
            ctx,
            frames: vec![Frame::root()],
            text: String::new(),
            diagnostics: Vec::new(),
        }
    }

    fn process_token(&mut self, token: Token<'_>) -> Result<(), Diagnostic> {
        match token {
            Token::Text(text) => self.text.push_str(text),
            Token::Escaped(c) => self.text.push(c),
            Token::Open { body, span } => {
                self.flush_text();
                self.process_open(body, span)?;
            }
            Token::Close { body, span } => {
                self.flush_text();
                self.process_close(body, span)?;
            }
        }
        Ok(())
    }

    fn process_open(&mut self, body: &str, span: SourceSpan) -> Result<(), Diagnostic> {
        let invocation = TagInvocation::from_raw(body, span);

        // <reset> is structural: it closes every open tag rather than
        // resolving to anything, and strict parsing rejects it because
        // it cannot be balanced by a closing tag.
        if invocation.name == "reset" {
            if self.ctx.config().strict {
                return Err(self
                    .ctx
                    .new_error_at("<reset> is not allowed in strict parsing", vec![invocation]));
            }
            while self.frames.len() > 1 {
                self.close_top_frame();
            }
            return Ok(());
        }

        let Some(resolver) = self.ctx.config().registry.find(&invocation.name) else {
            let diagnostic = self.ctx.new_error_at(
                format!("unknown tag '{}'", invocation.name),
                vec![invocation],
            );
            return self.fail_or_keep_literal(diagnostic, span);
        };

        match resolver.resolve(&invocation, self.ctx) {
            Ok(Tag::Styling(style)) => {
                self.frames.push(Frame {
                    invocation: Some(invocation),
                    style,
                    children: Vec::new(),
                });
            }
            Ok(Tag::Inserting(parsed)) => {
                let (root, diagnostics) = parsed.into_parts();
                self.diagnostics.extend(diagnostics);
                self.top_frame().children.push(root);
            }
            Err(diagnostic) => return self.fail_or_keep_literal(diagnostic, span),
        }

        Ok(())
    }

    fn process_close(&mut self, body: &str, span: SourceSpan) -> Result<(), Diagnostic> {
        let invocation = TagInvocation::from_raw(body, span);

        let matching = self
            .frames
            .iter()
            .rposition(|frame| frame.name() == Some(invocation.name.as_str()));

        let Some(position) = matching else {
            let diagnostic = self.ctx.new_error_at(
                format!("closing tag '</{}>' has no opening tag", invocation.name),
                vec![invocation],
            );
            return self.fail_or_keep_literal(diagnostic, span);
        };

        if self.ctx.config().strict && position != self.frames.len() - 1 {
            let open_name = self.top_frame().name().unwrap_or_default().to_string();
            return Err(self.ctx.new_error_at(
                format!(
                    "closing tag '</{}>' does not match open tag '<{}>'",
                    invocation.name, open_name
                ),
                vec![invocation],
            ));
        }

        // Close intermediates implicitly, then the matching frame.
        while self.frames.len() > position {
            self.close_top_frame();
        }

        Ok(())
    }

    fn finish(mut self) -> Result<Parsed, Diagnostic> {
        self.flush_text();

        while self.frames.len() > 1 {
            if self.ctx.config().strict {
                let invocation = self
                    .top_frame()
                    .invocation
                    .clone()
                    .expect("non-root frame has an invocation");
                return Err(self.ctx.new_error_at(
                    format!("tag '<{}>' is never closed", invocation.name),
                    vec![invocation],
                ));
            }
            self.close_top_frame();
        }

        let root_frame = self.frames.pop().expect("root frame present");
        let mut children = root_frame.children;

        let root = if children.len() == 1 {
            children.pop().expect("checked length")
        } else {
            let mut root = Component::empty();
            for child in children {
                root.push_child(child);
            }
            root
        };

        Ok(Parsed::new(root, self.diagnostics))
    }

    fn top_frame(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("frame stack is never empty")
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.top_frame().children.push(Component::text(text));
        }
    }

    /// Pop the top frame and wrap its children in a styled node.
    ///
    /// Frames that enclosed nothing produce no node.
    fn close_top_frame(&mut self) {
        debug_assert!(self.frames.len() > 1, "root frame is never closed");
        let frame = self.frames.pop().expect("checked above");

        if frame.children.is_empty() {
            return;
        }

        let mut node = Component::styled(frame.style);
        for child in frame.children {
            node.push_child(child);
        }
        self.top_frame().children.push(node);
    }

    /// Strict parsing aborts with the diagnostic; lenient parsing keeps
    /// the offending tag as literal text and collects it.
    fn fail_or_keep_literal(
        &mut self,
        diagnostic: Diagnostic,
        span: SourceSpan,
    ) -> Result<(), Diagnostic> {
        if self.ctx.config().strict {
            return Err(diagnostic);
        }

        log::debug!("keeping failed tag as literal text: {diagnostic}");
        self.text.push_str(span.value(self.ctx.original_message()));
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}
