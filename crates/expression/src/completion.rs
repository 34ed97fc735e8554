//! Reference completion
//!
//! Suggestions are computed from the text before the caret. The trailing run
//! of `[#A-Za-z0-9_.-]` characters decides what is offered:
//!
//! - `#pre` offers variables starting with `pre`;
//! - `#var.a.b.pre` offers the visible members of the type reached through
//!   `a` and `b` that start with `pre`.
//!
//! Hidden members are never offered, and a hidden step in the chain yields
//! no suggestions at all.

use std::collections::BTreeMap;
use std::sync::Arc;

use nebula_introspect::{MemberDescriptor, MemberKind, ParameterDescriptor, TypeRegistry};
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::context::ExpressionContext;
use crate::error::Span;
use crate::lexer::{ends_in_string, is_ident_char};
use crate::reference::Segment;
use crate::resolve;

/// Caret location in an editor, both zero-based; `column` counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaretPosition {
    /// Line
    pub row: usize,
    /// Character within the line
    pub column: usize,
}

impl CaretPosition {
    /// Create a caret position
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Caret after the last character of `input`
    pub fn end_of(input: &str) -> Self {
        let row = input.matches('\n').count();
        let column = input.rsplit('\n').next().map_or(0, |line| line.chars().count());
        Self { row, column }
    }

    /// Byte offset of the caret in `input`, clamped to the line and input ends
    pub fn offset_in(self, input: &str) -> usize {
        let mut line_start = 0;
        for _ in 0..self.row {
            match input[line_start..].find('\n') {
                Some(newline) => line_start += newline + 1,
                None => return input.len(),
            }
        }
        let line = &input[line_start..];
        let line = &line[..line.find('\n').unwrap_or(line.len())];
        let column = line
            .char_indices()
            .nth(self.column)
            .map_or(line.len(), |(i, _)| i);
        line_start + column
    }
}

/// What a suggestion refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A context variable
    Variable,
    /// A field
    Field,
    /// A method
    Method,
}

impl From<MemberKind> for SuggestionKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Field => Self::Field,
            MemberKind::Method => Self::Method,
        }
    }
}

/// A completion entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Member name, or variable name without `#`
    pub name: String,
    /// Variable, field or method
    pub kind: SuggestionKind,
    /// Member type, method return type or declared variable type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Member description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Method parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDescriptor>,
}

impl Suggestion {
    fn member(member: &MemberDescriptor) -> Self {
        Self {
            name: member.name().to_string(),
            kind: member.kind.into(),
            type_name: Some(member.type_name().to_string()),
            description: member.description.as_deref().map(str::to_string),
            parameters: member.parameters.to_vec(),
        }
    }
}

/// Completion over a type registry and a set of variables
#[derive(Debug, Clone)]
pub struct ExpressionSuggester {
    registry: Arc<TypeRegistry>,
    context: ExpressionContext,
    config: CompletionConfig,
}

impl ExpressionSuggester {
    /// Create a suggester with default settings
    pub fn new(registry: Arc<TypeRegistry>, context: ExpressionContext) -> Self {
        Self {
            registry,
            context,
            config: CompletionConfig::default(),
        }
    }

    /// Replace the settings
    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    /// Current settings
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Suggestions for the reference being typed at `caret`
    pub fn suggestions_for(&self, input: &str, caret: CaretPosition) -> Vec<Suggestion> {
        let prefix = &input[..caret.offset_in(input)];
        if ends_in_string(prefix) {
            return Vec::new();
        }

        let mut suggestions = match trailing_reference(prefix) {
            Some(path) => self.complete(path),
            None => Vec::new(),
        };
        suggestions.truncate(self.config.max_suggestions);

        tracing::trace!(count = suggestions.len(), "computed suggestions");
        suggestions
    }

    fn complete(&self, path: &str) -> Vec<Suggestion> {
        let parts: Vec<&str> = path.split('.').collect();
        if !parts.iter().all(|part| part.chars().all(is_ident_char)) {
            return Vec::new();
        }

        let [root, steps @ .., typed] = parts.as_slice() else {
            return self.variables(path);
        };

        let Some(root_type) = self.context.type_of(root) else {
            return Vec::new();
        };
        let segments: Vec<Segment> = steps
            .iter()
            .map(|name| Segment {
                name: (*name).to_string(),
                span: Span::default(),
                call: None,
            })
            .collect();

        match resolve::walk(&self.registry, root_type, &segments) {
            Ok(Some(type_name)) => self.members(&type_name, typed),
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::trace!(%error, "no suggestions past unresolved step");
                Vec::new()
            }
        }
    }

    fn variables(&self, typed: &str) -> Vec<Suggestion> {
        self.context
            .variables()
            .filter(|(name, _)| self.config.matches(name, typed))
            .map(|(name, variable)| Suggestion {
                name: name.to_string(),
                kind: SuggestionKind::Variable,
                type_name: variable.type_name.clone(),
                description: None,
                parameters: Vec::new(),
            })
            .collect()
    }

    fn members(&self, type_name: &str, typed: &str) -> Vec<Suggestion> {
        let Some(descriptor) = self.registry.resolve(type_name) else {
            return Vec::new();
        };

        // One entry per name; a field wins over its accessor.
        let mut by_name: BTreeMap<&str, &MemberDescriptor> = BTreeMap::new();
        for member in descriptor.visible_members() {
            if member.is_method() && !self.config.include_methods {
                continue;
            }
            if !self.config.matches(member.name(), typed) {
                continue;
            }
            by_name
                .entry(member.name())
                .and_modify(|existing| {
                    if existing.is_method() && !member.is_method() {
                        *existing = member;
                    }
                })
                .or_insert(member);
        }

        by_name.into_values().map(Suggestion::member).collect()
    }
}

/// The `#...` reference run that ends `prefix`, without the leading `#`.
fn trailing_reference(prefix: &str) -> Option<&str> {
    let run_start = prefix
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ident_char(c) || matches!(c, '#' | '.' | '-'))
        .last()
        .map_or(prefix.len(), |(i, _)| i);
    let run = &prefix[run_start..];
    let hash = run.rfind('#')?;
    Some(&run[hash + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_introspect::TypeDescriptor;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn suggester() -> ExpressionSuggester {
        let registry = TypeRegistry::from_definitions([
            TypeDescriptor::new("Point")
                .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32"))
                .with_member(MemberDescriptor::new("x", MemberKind::Method, "i32").hidden())
                .with_member(MemberDescriptor::new("y", MemberKind::Field, "i32"))
                .with_member(MemberDescriptor::new("y", MemberKind::Method, "i32"))
                .with_member(
                    MemberDescriptor::new("distance", MemberKind::Method, "f64")
                        .with_parameter("other", "&Point"),
                ),
            TypeDescriptor::new("Segment")
                .with_member(MemberDescriptor::new("start", MemberKind::Field, "Point"))
                .with_member(MemberDescriptor::new("secret", MemberKind::Field, "Point").hidden()),
        ])
        .unwrap();

        let context = ExpressionContext::builder()
            .variable("point", "Point")
            .variable("path", "Segment")
            .variable("count", "i64")
            .build();

        ExpressionSuggester::new(Arc::new(registry), context)
    }

    fn names(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.name.as_str()).collect()
    }

    fn at_end(input: &str) -> Vec<Suggestion> {
        suggester().suggestions_for(input, CaretPosition::end_of(input))
    }

    #[test]
    fn test_hidden_member_not_offered() {
        let suggestions = at_end("#point.");
        assert_eq!(names(&suggestions), vec!["distance", "y"]);
        assert_eq!(suggestions[1].kind, SuggestionKind::Field);
    }

    #[rstest]
    #[case("#p", vec!["path", "point"])]
    #[case("#PO", vec!["point"])]
    #[case("#point.y", vec!["y"])]
    #[case("#point.x", vec![])]
    #[case("#path.start.", vec!["distance", "y"])]
    #[case("#path.secret.", vec![])]
    #[case("#path.missing.", vec![])]
    #[case("#count.", vec![])]
    #[case("#unknown.", vec![])]
    #[case("1 + #point.d", vec!["distance"])]
    #[case("'#point.", vec![])]
    #[case("point.", vec![])]
    #[case("#point.distance.", vec![])]
    fn test_suggestions(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(names(&at_end(input)), expected);
    }

    #[test]
    fn test_caret_in_middle() {
        let input = "#point.y + #path.start.x";
        let caret = CaretPosition::new(0, 8);
        assert_eq!(names(&suggester().suggestions_for(input, caret)), vec!["y"]);
    }

    #[test]
    fn test_caret_on_second_line() {
        let input = "#count\n  + #path.";
        let caret = CaretPosition::new(1, 10);
        assert_eq!(names(&suggester().suggestions_for(input, caret)), vec!["start"]);
    }

    #[test]
    fn test_config_limits() {
        let config = CompletionConfig {
            include_methods: false,
            ..CompletionConfig::default()
        };
        let suggester = suggester().with_config(config);
        assert_eq!(
            names(&suggester.suggestions_for("#point.", CaretPosition::new(0, 7))),
            vec!["y"]
        );

        let limited = self::suggester().with_config(CompletionConfig {
            max_suggestions: 1,
            ..CompletionConfig::default()
        });
        assert_eq!(
            names(&limited.suggestions_for("#p", CaretPosition::new(0, 2))),
            vec!["path"]
        );
    }

    #[test]
    fn test_method_suggestion_carries_parameters() {
        let suggestions = at_end("#point.dist");
        assert_eq!(suggestions[0].kind, SuggestionKind::Method);
        assert_eq!(suggestions[0].parameters.len(), 1);
        assert_eq!(suggestions[0].type_name.as_deref(), Some("f64"));
    }

    #[rstest]
    #[case("", 0, 0, 0)]
    #[case("ab\ncd", 1, 1, 4)]
    #[case("ab\ncd", 0, 9, 2)]
    #[case("ab\ncd", 5, 0, 5)]
    #[case("añb", 0, 2, 3)]
    fn test_caret_offset(
        #[case] input: &str,
        #[case] row: usize,
        #[case] column: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(CaretPosition::new(row, column).offset_in(input), expected);
    }
}
