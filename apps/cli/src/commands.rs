//! Subcommand implementations

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use nebula_expression::{
    CaretPosition, CompletionConfig, ErrorFormatter, ExpressionContext, ExpressionSuggester,
    ExpressionValidator,
};
use nebula_introspect::TypeRegistry;

/// Parse a `name=Type` variable declaration. A leading `#` on the name is
/// accepted.
pub fn parse_variable(s: &str) -> Result<(String, String), String> {
    let (name, type_name) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable '{s}': expected NAME=TYPE"))?;
    let name = name.trim().trim_start_matches('#');
    let type_name = type_name.trim();
    if name.is_empty() || type_name.is_empty() {
        return Err(format!("invalid variable '{s}': name and type must not be empty"));
    }
    Ok((name.to_string(), type_name.to_string()))
}

fn load_registry(file: &Path) -> anyhow::Result<Arc<TypeRegistry>> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let registry = TypeRegistry::from_json(&json)
        .with_context(|| format!("failed to load type definitions from {}", file.display()))?;
    tracing::debug!(types = registry.len(), file = %file.display(), "type definitions loaded");
    Ok(Arc::new(registry))
}

fn context(variables: &[(String, String)]) -> ExpressionContext {
    variables
        .iter()
        .fold(ExpressionContext::builder(), |builder, (name, type_name)| {
            builder.variable(name, type_name)
        })
        .build()
}

pub fn types(file: &Path, all: bool) -> anyhow::Result<ExitCode> {
    let registry = load_registry(file)?;
    let types = if all {
        registry.definitions()
    } else {
        registry.types_information()
    };
    println!("{}", serde_json::to_string_pretty(&types)?);
    Ok(ExitCode::SUCCESS)
}

pub fn suggest(
    file: &Path,
    variables: &[(String, String)],
    expression: &str,
    caret: Option<(usize, usize)>,
    config: CompletionConfig,
) -> anyhow::Result<ExitCode> {
    let registry = load_registry(file)?;
    let caret = caret.map_or_else(
        || CaretPosition::end_of(expression),
        |(row, column)| CaretPosition::new(row, column),
    );

    let suggester = ExpressionSuggester::new(registry, context(variables)).with_config(config);
    let suggestions = suggester.suggestions_for(expression, caret);
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(ExitCode::SUCCESS)
}

pub fn validate(
    file: &Path,
    variables: &[(String, String)],
    expression: &str,
    explain: bool,
) -> anyhow::Result<ExitCode> {
    let registry = load_registry(file)?;
    let validator = ExpressionValidator::new(registry, context(variables));

    let Err(errors) = validator.validate(expression) else {
        println!("ok");
        return Ok(ExitCode::SUCCESS);
    };

    for error in errors.errors() {
        println!("{}: {error}", error.span());
        if explain {
            eprintln!("{}", ErrorFormatter::for_error(expression, error).format());
        }
    }
    Ok(ExitCode::from(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variables() {
        assert_eq!(
            parse_variable("point=Point").unwrap(),
            ("point".to_string(), "Point".to_string())
        );
        assert_eq!(
            parse_variable("#loc = Option<Point>").unwrap(),
            ("loc".to_string(), "Option<Point>".to_string())
        );
        assert!(parse_variable("point").is_err());
        assert!(parse_variable("=Point").is_err());
    }
}
