//! The engine handle and its configuration.
//!
//! [`Filigree`] owns the configuration for a family of parses: the tag
//! registry, placeholders, strictness, and the recursion limit. The
//! configuration is frozen behind an `Arc` when the engine is built;
//! every parse (top-level or recursive) reads the same immutable
//! handle, so no tag resolver can mutate the registry mid-parse.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::context::ParseContext;
use crate::diagnostic::Diagnostic;
use crate::parser::{markup, Lexer, Token};
use crate::tags::{FnTagResolver, PlaceholderResolver, Tag, TagRegistry, TagResolver};
use crate::tree::Parsed;

/// Default bound on recursive re-parse depth.
pub const DEFAULT_RECURSION_LIMIT: usize = 16;

/// Frozen configuration shared by every level of a parse.
#[derive(Debug)]
pub struct EngineConfig {
    pub(crate) registry: TagRegistry,
    pub(crate) strict: bool,
    pub(crate) recursion_limit: usize,
}

/// The markup engine.
///
/// # Examples
///
/// ```
/// use filigree::Filigree;
///
/// let engine = Filigree::new();
/// let parsed = engine.parse("<bold>Hello</bold> World").unwrap();
/// assert_eq!(parsed.plain_text(), "Hello World");
/// ```
#[derive(Clone, Debug)]
pub struct Filigree {
    config: Arc<EngineConfig>,
}

impl Filigree {
    /// An engine with the standard tags, lenient parsing, and the
    /// default recursion limit.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a customized engine.
    pub fn builder() -> FiligreeBuilder {
        FiligreeBuilder::new()
    }

    /// Whether any failure aborts a parse immediately.
    pub fn strict(&self) -> bool {
        self.config.strict
    }

    /// The configured recursion depth limit.
    pub fn recursion_limit(&self) -> usize {
        self.config.recursion_limit
    }

    /// Parse a message into a component tree.
    ///
    /// In strict configuration the first [`Diagnostic`] aborts the
    /// whole parse. In lenient configuration the offending markup is
    /// kept as literal text and every failure is collected on the
    /// returned [`Parsed`].
    pub fn parse(&self, input: &str) -> Result<Parsed, Diagnostic> {
        log::debug!(
            "parse requested: {} bytes, strict={}",
            input.len(),
            self.config.strict
        );
        markup::run(&self.root_context(input))
    }

    /// Remove all tag markup from a message, keeping literal text and
    /// unescaping escaped characters. Placeholders are not resolved.
    pub fn strip(&self, input: &str) -> String {
        let mut out = String::new();
        for token in Lexer::new(input) {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Escaped(c) => out.push(c),
                Token::Open { .. } | Token::Close { .. } => {}
            }
        }
        out
    }

    pub(crate) fn root_context(&self, input: &str) -> ParseContext {
        ParseContext::root(input, Arc::clone(&self.config))
    }

    #[cfg(test)]
    pub(crate) fn config_handle(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.config)
    }
}

impl Default for Filigree {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared default engine instance.
///
/// Equivalent to [`Filigree::new`], built once and reused.
pub fn filigree() -> &'static Filigree {
    static DEFAULT: Lazy<Filigree> = Lazy::new(Filigree::new);
    &DEFAULT
}

/// Builder for [`Filigree`] engines.
pub struct FiligreeBuilder {
    registry: TagRegistry,
    placeholders: PlaceholderResolver,
    standard_tags: bool,
    strict: bool,
    recursion_limit: usize,
}

impl FiligreeBuilder {
    fn new() -> Self {
        Self {
            registry: TagRegistry::empty(),
            placeholders: PlaceholderResolver::new(),
            standard_tags: true,
            strict: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Register a custom resolver. Custom resolvers shadow placeholders
    /// and standard tags for the names they claim.
    pub fn resolver(mut self, resolver: impl TagResolver + 'static) -> Self {
        self.registry.register(resolver);
        self
    }

    /// Register a closure as the resolver for a single tag name.
    pub fn tag<F>(self, name: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&crate::parser::TagInvocation, &ParseContext) -> Result<Tag, Diagnostic>
            + Send
            + Sync
            + 'static,
    {
        self.resolver(FnTagResolver::new(name, resolve))
    }

    /// Supply a placeholder value. The value may itself contain markup,
    /// which is parsed recursively when the placeholder is resolved.
    pub fn placeholder(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.placeholders.insert(name, value);
        self
    }

    /// Abort on the first failure instead of collecting failures and
    /// keeping offending markup as literal text. Off by default.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Bound on recursive re-parse depth. Defaults to
    /// [`DEFAULT_RECURSION_LIMIT`]. The limit is fixed for the lifetime
    /// of the engine; no tag can alter it mid-parse.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Include or exclude the standard tag set. On by default.
    pub fn standard_tags(mut self, enabled: bool) -> Self {
        self.standard_tags = enabled;
        self
    }

    /// Freeze the configuration and build the engine.
    pub fn build(self) -> Filigree {
        let mut registry = self.registry;
        if !self.placeholders.is_empty() {
            registry.register(self.placeholders);
        }
        if self.standard_tags {
            registry.register(crate::tags::StandardTags);
        }

        Filigree {
            config: Arc::new(EngineConfig {
                registry,
                strict: self.strict,
                recursion_limit: self.recursion_limit,
            }),
        }
    }
}
