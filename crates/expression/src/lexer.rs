//! Tokenizer for reference chains
//!
//! Only the tokens that make up references are distinguished; every other
//! character becomes [`TokenKind::Other`]. String literals are kept whole so
//! that `#` inside them is never taken for a variable.

use crate::error::{ExpressionError, ExpressionResult, Span};

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `#name`
    Variable,
    /// Identifier
    Ident,
    /// `.`
    Dot,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `'..'` or `".."`
    Str,
    /// Anything else that is not whitespace
    Other,
}

/// A token and its location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Kind
    pub kind: TokenKind,
    /// Byte range in the input
    pub span: Span,
}

impl Token {
    /// Source text of the token
    pub fn text(self, input: &str) -> &str {
        &input[self.span.range()]
    }
}

/// Whether `c` may appear in an identifier
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `input` into tokens, skipping whitespace.
pub fn tokenize(input: &str) -> ExpressionResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => continue,
            '#' => {
                let mut end = start + 1;
                while let Some(&(i, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                if end == start + 1 {
                    TokenKind::Other
                } else {
                    tokens.push(Token {
                        kind: TokenKind::Variable,
                        span: Span::new(start, end),
                    });
                    continue;
                }
            }
            '\'' | '"' => {
                let end = skip_string(input, &mut chars, start, c)?;
                tokens.push(Token {
                    kind: TokenKind::Str,
                    span: Span::new(start, end),
                });
                continue;
            }
            c if is_ident_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Ident,
                    span: Span::new(start, end),
                });
                continue;
            }
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            _ => TokenKind::Other,
        };
        tokens.push(Token {
            kind,
            span: Span::new(start, start + c.len_utf8()),
        });
    }

    Ok(tokens)
}

fn skip_string(
    input: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
    quote: char,
) -> ExpressionResult<usize> {
    let mut escaped = false;
    for (i, c) in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok(i + 1);
        }
    }
    Err(ExpressionError::parse(
        "unterminated string literal",
        Span::new(start, input.len()),
    ))
}

/// Whether the end of `prefix` lies inside an unterminated string literal.
pub(crate) fn ends_in_string(prefix: &str) -> bool {
    let mut open: Option<char> = None;
    let mut escaped = false;
    for c in prefix.chars() {
        match open {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(quote) if c == quote => open = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => open = Some(c),
            None => {}
        }
    }
    open.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_reference_chain() {
        use TokenKind::*;
        assert_eq!(
            kinds("#p.distance(#q, 2)"),
            vec![Variable, Dot, Ident, LParen, Variable, Comma, Ident, RParen]
        );
    }

    #[test]
    fn test_token_text() {
        let input = "#point.y";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[0].text(input), "#point");
        assert_eq!(tokens[2].text(input), "y");
    }

    #[test]
    fn test_strings_hide_references() {
        use TokenKind::*;
        assert_eq!(kinds("'#p.x' + #q"), vec![Str, Other, Variable]);
        assert_eq!(kinds(r##""say \"#p\"""##), vec![Str]);
    }

    #[test]
    fn test_lone_hash_is_other() {
        assert_eq!(kinds("# "), vec![TokenKind::Other]);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("#p + 'abc").unwrap_err();
        assert_eq!(err.span(), Span::new(5, 9));
    }

    #[rstest]
    #[case("#p.", false)]
    #[case("'#p.", true)]
    #[case("'a' + #p.", false)]
    #[case(r"'it\'s #p.", true)]
    #[case("\"'\" #p", false)]
    fn test_ends_in_string(#[case] prefix: &str, #[case] expected: bool) {
        assert_eq!(ends_in_string(prefix), expected);
    }
}
