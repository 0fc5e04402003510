//! Recursive tag-markup parser producing styled component trees.
//!
//! This crate turns a flat string containing inline tags into a tree of
//! styled text nodes:
//!
//! - `<bold>text</bold>` - bold decoration
//! - `<color:red>text</color>` - named or hex colors (`<#ff5733>` works
//!   as a bare tag)
//! - `<player>` - a placeholder supplied by the caller, whose value may
//!   itself contain markup and is parsed recursively
//! - `\<` - escaped bracket (literal `<`)
//!
//! # Overview
//!
//! Parsing is driven by a [`Filigree`] engine holding an immutable
//! configuration: the tag registry, placeholder values, a strictness
//! flag, and a recursion limit. Tag resolvers may re-enter the parser
//! through the [`ParseContext`] they receive, so a placeholder value
//! such as `"<bold><name></bold>"` is processed like a fresh top-level
//! message one recursion level deeper. The recursion guard bounds that
//! depth and makes self-referential placeholders terminate with a
//! failure instead of looping.
//!
//! Failures are [`Diagnostic`] values: a message, an optional causing
//! failure, and the tag invocations responsible, each anchored to an
//! exact span of the message that produced it. In lenient configuration
//! (the default) failures are collected and the offending markup stays
//! in the output as literal text; in strict configuration the first
//! failure aborts the parse.
//!
//! # Usage
//!
//! ```
//! use filigree::Filigree;
//!
//! let engine = Filigree::builder()
//!     .placeholder("who", "<bold>world</bold>")
//!     .build();
//!
//! let parsed = engine.parse("hello <who>!").unwrap();
//! assert_eq!(parsed.plain_text(), "hello world!");
//! assert!(!parsed.has_diagnostics());
//! ```

pub mod color;
pub mod context;
pub mod diagnostic;
pub mod engine;
pub mod parser;
pub mod span;
pub mod style;
pub mod tags;
pub mod tree;

// Re-export main types at crate root
pub use color::{Color, ColorParseError};
pub use context::ParseContext;
pub use diagnostic::Diagnostic;
pub use engine::{filigree, Filigree, FiligreeBuilder, DEFAULT_RECURSION_LIMIT};
pub use parser::TagInvocation;
pub use span::SourceSpan;
pub use style::{Decorations, Style};
pub use tags::{FnTagResolver, PlaceholderResolver, StandardTags, Tag, TagRegistry, TagResolver};
pub use tree::{Component, Parsed};
