//! The component tree produced by parsing.
//!
//! A [`Component`] is a node of styled rich text: literal content, the
//! style its enclosing tags resolved to, and child nodes for nested
//! markup. The tree is plain data; rendering it to any presentation
//! format is up to the consumer.

use crate::diagnostic::Diagnostic;
use crate::style::Style;

/// A node in the parsed rich-text tree.
///
/// Styles are hierarchical: a child inherits its ancestors' style, with
/// its own style applied on top (see [`Style::apply`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Component {
    content: String,
    style: Style,
    children: Vec<Component>,
}

impl Component {
    /// A leaf node holding literal text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// An empty container node with the given style.
    pub fn styled(style: Style) -> Self {
        Self {
            content: String::new(),
            style,
            children: Vec::new(),
        }
    }

    /// An empty, unstyled node.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The literal text of this node (not including children).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The style attached to this node.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Child nodes, in source order.
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Append a child node.
    pub fn push_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Builder-style variant of [`Component::push_child`].
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// True if this node has no content and no children.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.children.is_empty()
    }

    /// Flatten the tree into its literal text, in source order.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.content);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Component::node_count).sum::<usize>()
    }
}

/// The result of a parse: the component tree plus any failures that were
/// collected instead of aborting.
///
/// In strict configuration parsing fails on the first [`Diagnostic`], so
/// `diagnostics` is always empty on success. In lenient configuration the
/// offending markup is kept as literal text and every failure is
/// collected here; it is the caller's decision what to do with them.
#[derive(Clone, Debug, Default)]
pub struct Parsed {
    root: Component,
    diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// Bundle a parse result.
    pub fn new(root: Component, diagnostics: Vec<Diagnostic>) -> Self {
        Self { root, diagnostics }
    }

    /// A clean result from plain text (no markup, no failures).
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            root: Component::text(text),
            diagnostics: Vec::new(),
        }
    }

    /// The root of the parsed tree.
    pub fn root(&self) -> &Component {
        &self.root
    }

    /// Failures collected during a lenient parse.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True if any failure was collected.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Discard the diagnostics and keep the tree.
    pub fn into_root(self) -> Component {
        self.root
    }

    /// Split into tree and diagnostics.
    pub fn into_parts(self) -> (Component, Vec<Diagnostic>) {
        (self.root, self.diagnostics)
    }

    /// The flattened literal text of the tree.
    pub fn plain_text(&self) -> String {
        self.root.plain_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn text_node() {
        let node = Component::text("hello");
        assert_eq!(node.content(), "hello");
        assert!(node.children().is_empty());
        assert!(node.style().is_empty());
    }

    #[test]
    fn styled_container() {
        let node = Component::styled(Style::colored(Color::Named("red")))
            .with_child(Component::text("hi"));
        assert_eq!(node.content(), "");
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.style().color, Some(Color::Named("red")));
    }

    #[test]
    fn plain_text_flattens_in_order() {
        let tree = Component::empty()
            .with_child(Component::text("a"))
            .with_child(Component::styled(Style::default()).with_child(Component::text("b")))
            .with_child(Component::text("c"));
        assert_eq!(tree.plain_text(), "abc");
    }

    #[test]
    fn node_count() {
        let tree = Component::empty()
            .with_child(Component::text("a"))
            .with_child(Component::empty().with_child(Component::text("b")));
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn parsed_plain() {
        let parsed = Parsed::plain("hello");
        assert_eq!(parsed.plain_text(), "hello");
        assert!(!parsed.has_diagnostics());
    }
}
