//! Lexer for tag markup.
//!
//! Converts input text into a stream of tokens. The lexer itself never
//! fails: a `<` that does not begin a well-formed tag is literal text,
//! and every failure a caller can observe is a tag-resolution failure
//! reported later with an exact span.

use crate::span::SourceSpan;

use super::tag::is_name_char;

/// A token produced by the lexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text content.
    Text(&'a str),
    /// Opening tag body (without brackets): `color:red`
    Open {
        /// The text between `<` and `>`.
        body: &'a str,
        /// Span of the whole tag, brackets included.
        span: SourceSpan,
    },
    /// Closing tag body (without brackets or slash): `color`
    Close {
        /// The text between `</` and `>`.
        body: &'a str,
        /// Span of the whole tag, brackets included.
        span: SourceSpan,
    },
    /// An escaped character (`\<` or `\\`).
    Escaped(char),
}

impl Token<'_> {
    /// The span of this token within the source, when it has one.
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Token::Open { span, .. } | Token::Close { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Lexer for tag markup text.
///
/// # Examples
///
/// ```
/// use filigree::parser::{Lexer, Token};
///
/// let tokens: Vec<_> = Lexer::new("<bold>Hello</bold>").collect();
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(tokens[1], Token::Text("Hello")));
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume text until the next special character.
    ///
    /// With `skip_first` the character at the current position is taken
    /// as literal even if it is special, which is how a failed tag or a
    /// lone backslash falls back to text.
    fn consume_text(&mut self, skip_first: bool) -> Token<'a> {
        let start = self.pos;
        if skip_first {
            self.advance();
        }

        while let Some(c) = self.peek() {
            match c {
                '<' | '\\' => break,
                _ => {
                    self.advance();
                }
            }
        }

        Token::Text(&self.input[start..self.pos])
    }

    /// Consume an escape sequence, if the next two characters form one.
    fn try_consume_escape(&mut self) -> Option<Token<'a>> {
        let mut chars = self.remaining().chars();
        chars.next(); // the backslash
        match chars.next() {
            Some(c @ ('<' | '\\')) => {
                self.pos += 1 + c.len_utf8();
                Some(Token::Escaped(c))
            }
            _ => None,
        }
    }

    /// Consume a tag (including the brackets), if the input at the
    /// current position forms one.
    ///
    /// A well-formed tag is `<`, an optional `/`, a name made of name
    /// characters, optionally `:`-separated arguments (quoted segments
    /// may contain `:` and `>`), and a closing `>`.
    fn try_consume_tag(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        let rest = &self.input[start + 1..];
        let (closing, slash_len) = match rest.strip_prefix('/') {
            Some(_) => (true, 1),
            None => (false, 0),
        };
        let body_input = &rest[slash_len..];

        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut in_name = true;
        let mut body_end = None;

        for (i, c) in body_input.char_indices() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '>' => {
                    // an empty name is not a tag
                    if i == 0 {
                        return None;
                    }
                    body_end = Some(i);
                    break;
                }
                ':' => in_name = false,
                '\'' | '"' if !in_name => quote = Some(c),
                c if in_name && !is_name_char(c) => return None,
                _ => {}
            }
        }

        let body_end = body_end?;
        let body = &body_input[..body_end];
        let end = start + 1 + slash_len + body_end + 1;
        let span = SourceSpan::new(start, end);
        self.pos = end;

        Some(if closing {
            Token::Close { body, span }
        } else {
            Token::Open { body, span }
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        match self.peek() {
            Some('<') => self
                .try_consume_tag()
                .or_else(|| Some(self.consume_text(true))),
            Some('\\') => self
                .try_consume_escape()
                .or_else(|| Some(self.consume_text(true))),
            _ => Some(self.consume_text(false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token<'_>> {
        Lexer::new(input).collect()
    }

    fn open(body: &str, start: usize, end: usize) -> Token<'_> {
        Token::Open {
            body,
            span: SourceSpan::new(start, end),
        }
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("Hello World"), vec![Token::Text("Hello World")]);
    }

    #[test]
    fn lex_open_tag() {
        assert_eq!(lex("<bold>"), vec![open("bold", 0, 6)]);
    }

    #[test]
    fn lex_close_tag() {
        assert_eq!(
            lex("</bold>"),
            vec![Token::Close {
                body: "bold",
                span: SourceSpan::new(0, 7),
            }]
        );
    }

    #[test]
    fn lex_tag_with_arguments() {
        assert_eq!(lex("<color:red>"), vec![open("color:red", 0, 11)]);
    }

    #[test]
    fn lex_quoted_argument_with_gt() {
        assert_eq!(lex("<hover:'a > b'>"), vec![open("hover:'a > b'", 0, 15)]);
    }

    #[test]
    fn lex_styled_text() {
        assert_eq!(
            lex("<bold>Hello</bold>"),
            vec![
                open("bold", 0, 6),
                Token::Text("Hello"),
                Token::Close {
                    body: "bold",
                    span: SourceSpan::new(11, 18),
                },
            ]
        );
    }

    #[test]
    fn lex_escaped_tag() {
        assert_eq!(
            lex(r"\<bold>"),
            vec![Token::Escaped('<'), Token::Text("bold>")]
        );
    }

    #[test]
    fn lex_escaped_backslash() {
        assert_eq!(lex(r"\\"), vec![Token::Escaped('\\')]);
    }

    #[test]
    fn lex_lone_backslash_is_text() {
        assert_eq!(lex(r"a\b"), vec![Token::Text("a"), Token::Text(r"\b")]);
    }

    #[test]
    fn lex_unclosed_tag_is_text() {
        assert_eq!(lex("<bold"), vec![Token::Text("<bold")]);
    }

    #[test]
    fn lex_empty_tag_is_text() {
        assert_eq!(lex("<>"), vec![Token::Text("<>")]);
    }

    #[test]
    fn lex_space_in_name_is_text() {
        assert_eq!(lex("<not a tag>"), vec![Token::Text("<not a tag>")]);
    }

    #[test]
    fn lex_lt_inside_tag_aborts_it() {
        let tokens = lex("a <b< c");
        assert_eq!(
            tokens,
            vec![Token::Text("a "), Token::Text("<b"), Token::Text("< c")]
        );
    }

    #[test]
    fn lex_hex_color_tag() {
        assert_eq!(lex("<#ff5733>"), vec![open("#ff5733", 0, 9)]);
    }

    #[test]
    fn lex_mixed_content() {
        assert_eq!(
            lex(r"Hello <bold>World</bold> \<escaped>"),
            vec![
                Token::Text("Hello "),
                open("bold", 6, 12),
                Token::Text("World"),
                Token::Close {
                    body: "bold",
                    span: SourceSpan::new(17, 24),
                },
                Token::Text(" "),
                Token::Escaped('<'),
                Token::Text("escaped>"),
            ]
        );
    }

    #[test]
    fn lex_unicode_text() {
        assert_eq!(
            lex("<bold>日本語</bold>"),
            vec![
                open("bold", 0, 6),
                Token::Text("日本語"),
                Token::Close {
                    body: "bold",
                    span: SourceSpan::new(15, 22),
                },
            ]
        );
    }

    #[test]
    fn sibling_spans_are_ordered_and_disjoint() {
        let input = "a <bold>b</bold> <red>c</red>";
        let spans: Vec<SourceSpan> = Lexer::new(input).filter_map(|t| t.span()).collect();

        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }
}
