//! Reference chains: `#variable(.member | .method(args))*`

use smallvec::SmallVec;

use crate::error::{ExpressionError, ExpressionResult, Span};
use crate::lexer::{Token, TokenKind, tokenize};

/// One `.member` or `.method(args)` step of a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Member name
    pub name: String,
    /// Location of the name
    pub span: Span,
    /// Argument count when written as a call
    pub call: Option<usize>,
}

impl Segment {
    /// Whether the segment is written with call parentheses
    pub fn is_call(&self) -> bool {
        self.call.is_some()
    }
}

/// A `#variable` followed by its member steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Variable name without `#`
    pub variable: String,
    /// Location of `#variable`
    pub variable_span: Span,
    /// Member steps in order
    pub segments: SmallVec<[Segment; 4]>,
    /// Location of the whole chain
    pub span: Span,
}

impl Reference {
    /// Parse an input that consists of exactly one reference chain.
    pub fn parse(input: &str) -> ExpressionResult<Self> {
        let tokens = tokenize(input)?;
        let Some(first) = tokens.first() else {
            return Err(ExpressionError::parse(
                "expected a reference",
                Span::new(0, input.len()),
            ));
        };
        if first.kind != TokenKind::Variable {
            return Err(ExpressionError::parse(
                "a reference must start with '#'",
                first.span,
            ));
        }

        let (reference, next) = parse_chain(input, &tokens, 0)?;
        if let Some(extra) = tokens.get(next) {
            return Err(ExpressionError::parse(
                "unexpected input after reference",
                extra.span.to(Span::new(input.len(), input.len())),
            ));
        }
        Ok(reference)
    }

    /// The reference text up to and including segment `index`
    pub fn path_to(&self, index: usize) -> String {
        let mut path = format!("#{}", self.variable);
        for segment in self.segments.iter().take(index + 1) {
            path.push('.');
            path.push_str(&segment.name);
            if segment.is_call() {
                path.push_str("()");
            }
        }
        path
    }
}

/// Every reference chain in `input`, including those nested in call arguments.
pub fn references(input: &str) -> ExpressionResult<Vec<Reference>> {
    let tokens = tokenize(input)?;
    let mut found = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Variable {
            let (reference, _) = parse_chain(input, &tokens, index)?;
            found.push(reference);
        }
    }
    Ok(found)
}

/// Parse the chain that starts at the variable token `start`, returning the
/// index of the first token after it.
fn parse_chain(
    input: &str,
    tokens: &[Token],
    start: usize,
) -> ExpressionResult<(Reference, usize)> {
    let head = tokens[start];
    let mut segments = SmallVec::new();
    let mut span = head.span;
    let mut i = start + 1;

    while let Some(dot) = tokens.get(i).filter(|t| t.kind == TokenKind::Dot) {
        let Some(name) = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Ident) else {
            return Err(ExpressionError::parse(
                "expected a member name after '.'",
                dot.span,
            ));
        };

        let mut segment = Segment {
            name: name.text(input).to_string(),
            span: name.span,
            call: None,
        };
        span = span.to(name.span);
        i += 2;

        if tokens.get(i).is_some_and(|t| t.kind == TokenKind::LParen) {
            let (arguments, close) = count_arguments(tokens, i)?;
            segment.call = Some(arguments);
            span = span.to(tokens[close].span);
            i = close + 1;
        }
        segments.push(segment);
    }

    let reference = Reference {
        variable: head.text(input)[1..].to_string(),
        variable_span: head.span,
        segments,
        span,
    };
    Ok((reference, i))
}

/// Count the arguments of the call opened at `open`, returning the count and
/// the index of the matching `)`.
fn count_arguments(tokens: &[Token], open: usize) -> ExpressionResult<(usize, usize)> {
    let mut depth = 0usize;
    let mut commas = 0;
    let mut empty = true;

    for (offset, token) in tokens[open..].iter().enumerate() {
        match token.kind {
            TokenKind::LParen => {
                depth += 1;
                if depth > 1 {
                    empty = false;
                }
            }
            TokenKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    let count = if empty { 0 } else { commas + 1 };
                    return Ok((count, open + offset));
                }
            }
            TokenKind::Comma if depth == 1 => commas += 1,
            _ => empty = false,
        }
    }

    Err(ExpressionError::parse("unclosed '('", tokens[open].span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_chain() {
        let reference = Reference::parse("#point.origin.distance(#q, 2)").unwrap();

        assert_eq!(reference.variable, "point");
        assert_eq!(reference.variable_span, Span::new(0, 6));
        let names: Vec<&str> = reference.segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["origin", "distance"]);
        assert_eq!(reference.segments[0].call, None);
        assert_eq!(reference.segments[1].call, Some(2));
        assert_eq!(reference.span, Span::new(0, 29));
        assert_eq!(reference.path_to(1), "#point.origin.distance()");
    }

    #[rstest]
    #[case("#p.m()", Some(0))]
    #[case("#p.m(1)", Some(1))]
    #[case("#p.m(f(1, 2), 3)", Some(2))]
    #[case("#p.m((1))", Some(1))]
    #[case("#p.m", None)]
    fn test_argument_count(#[case] input: &str, #[case] expected: Option<usize>) {
        let reference = Reference::parse(input).unwrap();
        assert_eq!(reference.segments[0].call, expected);
    }

    #[test]
    fn test_references_include_nested() {
        let found = references("#a.b(#c.d) + '#e.f' + #g").unwrap();
        let roots: Vec<&str> = found.iter().map(|r| r.variable.as_str()).collect();
        assert_eq!(roots, vec!["a", "c", "g"]);
        assert_eq!(found[1].segments[0].name, "d");
    }

    #[rstest]
    #[case("")]
    #[case("point.x")]
    #[case("#p.")]
    #[case("#p.x(")]
    #[case("#p.x + 1")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(matches!(
            Reference::parse(input),
            Err(ExpressionError::Parse { .. })
        ));
    }
}
