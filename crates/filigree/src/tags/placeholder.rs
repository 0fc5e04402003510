//! Placeholder resolution.
//!
//! Placeholders are named substitution values supplied by the caller.
//! A placeholder's value may itself contain tags (or further
//! placeholders), so resolution re-parses the value through the
//! context. The recursion guard is what keeps a self-referential
//! placeholder from looping forever.

use std::collections::HashMap;

use crate::context::ParseContext;
use crate::diagnostic::Diagnostic;
use crate::parser::TagInvocation;

use super::{Tag, TagResolver};

/// Resolver mapping placeholder names to replacement strings.
#[derive(Clone, Debug, Default)]
pub struct PlaceholderResolver {
    values: HashMap<String, String>,
}

impl PlaceholderResolver {
    /// An empty placeholder set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placeholder. Names are matched case-insensitively.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Builder-style variant of [`PlaceholderResolver::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// True if no placeholders are registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TagResolver for PlaceholderResolver {
    fn has_tag(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn resolve(
        &self,
        invocation: &TagInvocation,
        ctx: &ParseContext,
    ) -> Result<Tag, Diagnostic> {
        let Some(value) = self.values.get(&invocation.name) else {
            return Err(ctx.new_error_at(
                format!("unknown placeholder '{}'", invocation.name),
                vec![invocation.clone()],
            ));
        };

        log::trace!("resolving placeholder '{}'", invocation.name);

        let parsed = ctx.parse(value).map_err(|cause| {
            ctx.new_error_caused(
                format!("failed to resolve placeholder '{}'", invocation.name),
                cause,
                vec![invocation.clone()],
            )
        })?;

        Ok(Tag::inserting(parsed))
    }
}
