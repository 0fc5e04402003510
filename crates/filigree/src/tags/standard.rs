//! The standard tag set: decorations and colors.

use crate::color::Color;
use crate::context::ParseContext;
use crate::diagnostic::Diagnostic;
use crate::parser::TagInvocation;
use crate::style::{Decorations, Style};

use super::{Tag, TagResolver};

/// Resolver for the built-in styling tags.
///
/// Handles:
/// - decorations: `<bold>`/`<b>`, `<italic>`/`<i>`/`<em>`,
///   `<underlined>`/`<u>`, `<strikethrough>`/`<st>`,
///   `<obfuscated>`/`<obf>`
/// - colors by argument: `<color:red>`, `<color:#ff5733>` (also
///   `colour` and `c`)
/// - colors as bare tags: `<red>`, `<#ff5733>`
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTags;

impl StandardTags {
    fn decoration(name: &str) -> Option<Decorations> {
        let mut deco = Decorations::default();
        match name {
            "bold" | "b" => deco.bold = true,
            "italic" | "i" | "em" => deco.italic = true,
            "underlined" | "u" => deco.underlined = true,
            "strikethrough" | "st" => deco.strikethrough = true,
            "obfuscated" | "obf" => deco.obfuscated = true,
            _ => return None,
        }
        Some(deco)
    }

    fn is_color_keyword(name: &str) -> bool {
        matches!(name, "color" | "colour" | "c")
    }

    fn parse_color(
        input: &str,
        invocation: &TagInvocation,
        ctx: &ParseContext,
    ) -> Result<Tag, Diagnostic> {
        match Color::parse(input) {
            Ok(color) => Ok(Tag::styling(Style::colored(color))),
            Err(err) => Err(ctx.new_error_at(
                format!("unable to parse color '{input}': {err}"),
                vec![invocation.clone()],
            )),
        }
    }
}

impl TagResolver for StandardTags {
    fn has_tag(&self, name: &str) -> bool {
        Self::decoration(name).is_some()
            || Self::is_color_keyword(name)
            || name.starts_with('#')
            || Color::is_known_name(name)
    }

    fn resolve(
        &self,
        invocation: &TagInvocation,
        ctx: &ParseContext,
    ) -> Result<Tag, Diagnostic> {
        let name = invocation.name.as_str();

        if let Some(decorations) = Self::decoration(name) {
            return Ok(Tag::styling(Style {
                color: None,
                decorations,
            }));
        }

        if Self::is_color_keyword(name) {
            let Some(argument) = invocation.argument(0) else {
                return Err(ctx.new_error_at(
                    format!("'<{name}>' requires a color argument"),
                    vec![invocation.clone()],
                ));
            };
            return Self::parse_color(argument, invocation, ctx);
        }

        // Bare color tags: <red>, <#ff5733>.
        Self::parse_color(name, invocation, ctx)
    }
}
