//! Tag invocation parsing.
//!
//! Parses the body of a `<...>` tag into its name and arguments.

use crate::span::SourceSpan;

/// A resolved reference to a single tag occurrence in a message.
///
/// Carries the lowercased tag name, the ordered argument list, and the
/// span of the full `<...>` syntax in the source. Diagnostics hold
/// clones of these to pinpoint the markup responsible for a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagInvocation {
    /// The tag name, lowercased.
    pub name: String,
    /// Arguments in source order, with quoting removed.
    pub arguments: Vec<String>,
    /// The span of the whole tag, brackets included.
    pub span: SourceSpan,
}

impl TagInvocation {
    /// Parse a raw tag body (the text between `<` and `>`).
    ///
    /// Arguments are separated by `:`; an argument may be wrapped in
    /// single or double quotes to include `:` or `>` literally, with
    /// `\"`, `\'` and `\\` escapes inside.
    pub fn from_raw(body: &str, span: SourceSpan) -> Self {
        let mut parts = split_body(body);
        let name = parts.remove(0).trim().to_ascii_lowercase();
        Self {
            name,
            arguments: parts,
            span,
        }
    }

    /// The argument at `index`, if present.
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }
}

/// Split a tag body on `:`, honoring quoted segments.
///
/// Always returns at least one element.
fn split_body(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    match chars.peek() {
                        Some(&next) if next == q || next == '\\' => {
                            chars.next();
                            current.push(next);
                        }
                        _ => current.push(c),
                    }
                } else if c == q {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            None => match c {
                ':' => parts.push(std::mem::take(&mut current)),
                '\'' | '"' if current.is_empty() => quote = Some(c),
                _ => current.push(c),
            },
        }
    }

    parts.push(current);
    parts
}

/// True if `c` may appear in a tag name.
///
/// The first character additionally allows `#` so hex colors can be
/// used as bare tags (`<#ff5733>`).
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '#'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(body: &str) -> TagInvocation {
        TagInvocation::from_raw(body, SourceSpan::new(0, body.len() + 2))
    }

    #[test]
    fn name_only() {
        let tag = inv("bold");
        assert_eq!(tag.name, "bold");
        assert!(tag.arguments.is_empty());
    }

    #[test]
    fn name_is_lowercased() {
        assert_eq!(inv("BOLD").name, "bold");
        assert_eq!(inv("Color:red").name, "color");
    }

    #[test]
    fn single_argument() {
        let tag = inv("color:red");
        assert_eq!(tag.name, "color");
        assert_eq!(tag.arguments, vec!["red"]);
    }

    #[test]
    fn multiple_arguments() {
        let tag = inv("key:a:b:c");
        assert_eq!(tag.arguments, vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_argument_keeps_separator() {
        let tag = inv("hover:'a:b'");
        assert_eq!(tag.arguments, vec!["a:b"]);
    }

    #[test]
    fn double_quoted_argument() {
        let tag = inv(r#"hover:"some text""#);
        assert_eq!(tag.arguments, vec!["some text"]);
    }

    #[test]
    fn escaped_quote_inside_quotes() {
        let tag = inv(r#"hover:"say \"hi\"""#);
        assert_eq!(tag.arguments, vec![r#"say "hi""#]);
    }

    #[test]
    fn empty_argument_preserved() {
        let tag = inv("key::b");
        assert_eq!(tag.arguments, vec!["", "b"]);
    }

    #[test]
    fn argument_accessor() {
        let tag = inv("color:red");
        assert_eq!(tag.argument(0), Some("red"));
        assert_eq!(tag.argument(1), None);
    }
}
