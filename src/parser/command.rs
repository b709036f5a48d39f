//! Command dispatcher: applies `@command` handlers to a record.
//!
//! Handlers never abort a block. Unknown commands and handler failures
//! become [`Diagnostic`]s on the record and parsing moves on to the next
//! annotation. By default empty arguments are taken as-is; strict mode
//! reports them instead.

use super::annotation::AnnotationLine;
use super::ParseOptions;
use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// -- Regex patterns -----------------------------------------------------------

static RE_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\{(.+)\}\s*").unwrap());

static RE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+)\s*(-\s*)?").unwrap());

// -- Handlers -----------------------------------------------------------------

/// Failure raised by a single handler. Only reported with
/// [`ParseOptions::strict`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("@{command} needs text")]
    EmptyArgument { command: &'static str },
}

type Handler = fn(&mut DocRecord, &str, &ParseOptions) -> Result<(), CommandError>;

/// Look up the handler registered for `command`.
fn lookup(command: &str) -> Option<Handler> {
    let handler: Handler = match command {
        "brief" => brief,
        "description" => description,
        "param" => param,
        "returns" | "return" => returns,
        "type" => type_,
        "feature" => feature,
        _ => return None,
    };
    Some(handler)
}

/// Apply one annotation to `record`.
pub fn apply(record: &mut DocRecord, line: &AnnotationLine, options: &ParseOptions) {
    let Some(handler) = lookup(&line.command) else {
        tracing::warn!(command = %line.command, line = %line.raw, "unknown annotation");
        record.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::UnknownAnnotation,
            detail: format!("unknown annotation @{}", line.command),
            source_line: line.raw.clone(),
        });
        return;
    };

    if let Err(err) = handler(record, &line.argument, options) {
        tracing::warn!(error = %err, line = %line.raw, "failed to parse annotation");
        record.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::AnnotationParseFailure,
            detail: err.to_string(),
            source_line: line.raw.clone(),
        });
    }
}

/// Trimmed `text`, rejected when empty in strict mode.
fn required<'a>(
    text: &'a str,
    command: &'static str,
    options: &ParseOptions,
) -> Result<&'a str, CommandError> {
    let text = text.trim();
    if options.strict && text.is_empty() {
        return Err(CommandError::EmptyArgument { command });
    }
    Ok(text)
}

fn brief(record: &mut DocRecord, text: &str, options: &ParseOptions) -> Result<(), CommandError> {
    let text = required(text, "brief", options)?;
    record.brief = Some(text.to_string());
    Ok(())
}

fn description(
    record: &mut DocRecord,
    text: &str,
    options: &ParseOptions,
) -> Result<(), CommandError> {
    let text = required(text, "description", options)?;
    let desc = record.description.get_or_insert_with(String::new);
    desc.push_str(text);
    desc.push('\n');
    Ok(())
}

fn param(record: &mut DocRecord, line: &str, _: &ParseOptions) -> Result<(), CommandError> {
    let (ty, rest) = take_type(line);
    let (name, rest) = take_name(rest);
    record.params.push(Param {
        name,
        ty,
        brief: rest.trim().to_string(),
    });
    Ok(())
}

fn returns(record: &mut DocRecord, line: &str, _: &ParseOptions) -> Result<(), CommandError> {
    let (ty, rest) = take_type(line);
    record.returns = Some(Return {
        ty,
        brief: rest.trim().to_string(),
    });
    Ok(())
}

fn type_(record: &mut DocRecord, line: &str, options: &ParseOptions) -> Result<(), CommandError> {
    let (ty, rest) = take_type(line);
    record.ty = ty;
    // Strict: a bare `@type {T}` keeps whatever brief the block already has
    if options.strict && rest.trim().is_empty() {
        return Ok(());
    }
    brief(record, rest, options)
}

fn feature(record: &mut DocRecord, text: &str, options: &ParseOptions) -> Result<(), CommandError> {
    let text = required(text, "feature", options)?;
    record.features.push(text.to_string());
    Ok(())
}

// -- Helpers ------------------------------------------------------------------

/// Split a leading `{type}` off `text`. Without a match the whole text is
/// returned untouched.
fn take_type(text: &str) -> (Option<String>, &str) {
    let text = text.trim_start();
    match RE_TYPE.captures(text) {
        Some(caps) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            let ty = caps.get(1).map(|m| m.as_str().trim().to_string());
            (ty, &text[end..])
        }
        None => (None, text),
    }
}

/// Split a leading name and optional `-` separator off `text`.
fn take_name(text: &str) -> (Option<String>, &str) {
    match RE_NAME.captures(text) {
        Some(caps) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            let name = caps.get(1).map(|m| m.as_str().to_string());
            (name, &text[end..])
        }
        None => (None, text),
    }
}
