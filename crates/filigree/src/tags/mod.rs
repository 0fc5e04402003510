//! Tag resolvers and the tag registry.
//!
//! A [`TagResolver`] turns a [`TagInvocation`] into a [`Tag`]: either a
//! style to apply to the enclosed content, or pre-built content to
//! insert. The [`TagRegistry`] is an ordered list of resolvers; the
//! first resolver claiming a name wins, so resolvers registered earlier
//! shadow later ones.

mod placeholder;
mod standard;

pub use placeholder::PlaceholderResolver;
pub use standard::StandardTags;

use std::sync::Arc;

use crate::context::ParseContext;
use crate::diagnostic::Diagnostic;
use crate::parser::TagInvocation;
use crate::style::Style;
use crate::tree::Parsed;

/// What a tag invocation resolved to.
#[derive(Clone, Debug)]
pub enum Tag {
    /// Apply a style to the content the tag encloses.
    Styling(Style),
    /// Insert pre-built content at the tag's position.
    ///
    /// Carrying a full [`Parsed`] keeps any diagnostics a nested parse
    /// collected flowing to the enclosing parse instead of being lost.
    Inserting(Parsed),
}

impl Tag {
    /// A tag that styles its enclosed content.
    pub fn styling(style: Style) -> Self {
        Tag::Styling(style)
    }

    /// A tag that inserts the result of a nested parse.
    pub fn inserting(parsed: Parsed) -> Self {
        Tag::Inserting(parsed)
    }

    /// A tag that inserts a plain string.
    pub fn inserting_text(text: impl Into<String>) -> Self {
        Tag::Inserting(Parsed::plain(text))
    }
}

/// Resolves tag names to their behavior.
///
/// Implementations must be thread safe: a registry is shared read-only
/// across a whole top-level parse and all its recursive children.
pub trait TagResolver: Send + Sync {
    /// Whether this resolver handles the given (lowercased) tag name.
    fn has_tag(&self, name: &str) -> bool;

    /// Resolve one invocation.
    ///
    /// Failures are reported as [`Diagnostic`]s built via the context,
    /// which anchors them to the message being parsed. Resolvers may
    /// call [`ParseContext::parse`] to process nested markup.
    fn resolve(&self, invocation: &TagInvocation, ctx: &ParseContext)
        -> Result<Tag, Diagnostic>;
}

/// A resolver for a single tag name backed by a closure.
pub struct FnTagResolver {
    name: String,
    resolve: Box<ResolveFn>,
}

type ResolveFn =
    dyn Fn(&TagInvocation, &ParseContext) -> Result<Tag, Diagnostic> + Send + Sync;

impl FnTagResolver {
    /// Create a resolver for `name` that delegates to `resolve`.
    pub fn new<F>(name: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&TagInvocation, &ParseContext) -> Result<Tag, Diagnostic>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into().to_ascii_lowercase(),
            resolve: Box::new(resolve),
        }
    }
}

impl TagResolver for FnTagResolver {
    fn has_tag(&self, name: &str) -> bool {
        self.name == name
    }

    fn resolve(
        &self,
        invocation: &TagInvocation,
        ctx: &ParseContext,
    ) -> Result<Tag, Diagnostic> {
        (self.resolve)(invocation, ctx)
    }
}

/// An ordered collection of tag resolvers.
#[derive(Clone, Default)]
pub struct TagRegistry {
    resolvers: Vec<Arc<dyn TagResolver>>,
}

impl TagRegistry {
    /// A registry with no resolvers at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with only the standard tags.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(StandardTags);
        registry
    }

    /// Append a resolver. Earlier registrations take priority.
    pub fn register(&mut self, resolver: impl TagResolver + 'static) {
        self.resolvers.push(Arc::new(resolver));
    }

    /// Find the first resolver claiming `name`.
    pub fn find(&self, name: &str) -> Option<&dyn TagResolver> {
        self.resolvers
            .iter()
            .find(|r| r.has_tag(name))
            .map(|r| r.as_ref())
    }

    /// Whether any resolver claims `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_nothing() {
        let registry = TagRegistry::empty();
        assert!(!registry.has_tag("bold"));
        assert!(registry.find("bold").is_none());
    }

    #[test]
    fn standard_registry_has_decorations() {
        let registry = TagRegistry::standard();
        assert!(registry.has_tag("bold"));
        assert!(registry.has_tag("color"));
        assert!(!registry.has_tag("no_such_tag"));
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = TagRegistry::empty();
        registry.register(FnTagResolver::new("x", |_, _| {
            Ok(Tag::inserting_text("first"))
        }));
        registry.register(FnTagResolver::new("x", |_, _| {
            Ok(Tag::inserting_text("second"))
        }));

        // Both claim "x"; find returns the earliest.
        assert!(registry.find("x").is_some());
        assert_eq!(registry.resolvers.len(), 2);
    }

    #[test]
    fn fn_resolver_name_is_lowercased() {
        let resolver = FnTagResolver::new("LOUD", |_, _| Ok(Tag::inserting_text("")));
        assert!(resolver.has_tag("loud"));
        assert!(!resolver.has_tag("LOUD"));
    }
}
