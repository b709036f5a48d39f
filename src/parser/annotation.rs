//! Annotation line grouper: folds a comment body into `(command, argument)`
//! pairs, merging continuation lines into the command above them.

use super::{LeadingText, ParseOptions};
use regex::Regex;
use std::sync::LazyLock;

static RE_COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@(\w*)").unwrap());

/// One annotation after continuation lines have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLine {
    pub command: String,
    pub argument: String,
    /// Folded text, `@command argument`, kept for diagnostics
    pub raw: String,
}

impl AnnotationLine {
    fn from_entry(raw: String) -> Self {
        let (command, argument) = match RE_COMMAND.captures(&raw) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                let name = caps.get(1).map_or("", |m| m.as_str());
                (name.to_string(), raw[end..].trim().to_string())
            }
            None => (String::new(), raw.trim().to_string()),
        };
        AnnotationLine {
            command,
            argument,
            raw,
        }
    }
}

/// Group the lines of a comment body.
///
/// Text before the first `@command` is attributed to a synthetic `@brief`
/// or `@description` entry depending on `options.leading_text`. Any other
/// line without a leading `@` continues the entry above it.
///
/// A bare `@brief` seed is kept, so a block with no leading text still
/// sets an empty brief. The seed is dropped in strict mode and for
/// `@description`.
pub fn group(body: &str, indent: usize, options: &ParseOptions) -> Vec<AnnotationLine> {
    let leading = options.leading_text;
    let seed = match leading {
        LeadingText::Brief => "@brief",
        LeadingText::Description => "@description",
    };

    let mut entries: Vec<String> = vec![seed.to_string()];
    let mut in_leading = true;

    for line in body.lines() {
        let text = strip_indent(line, indent).trim();
        if text.is_empty() {
            continue;
        }

        if text.starts_with('@') {
            in_leading = false;
            entries.push(text.to_string());
            continue;
        }

        // Leading description lines stay separate so they join with newlines
        if in_leading && leading == LeadingText::Description {
            entries.push(format!("{} {}", seed, text));
            continue;
        }

        if let Some(last) = entries.last_mut() {
            last.push(' ');
            last.push_str(text);
        }
    }

    let keep_seed = leading == LeadingText::Brief && !options.strict;
    if !keep_seed && entries.first().is_some_and(|e| e == seed) {
        entries.remove(0);
    }

    entries.into_iter().map(AnnotationLine::from_entry).collect()
}

/// Remove up to `indent` characters of comment prefix (spaces, tabs and
/// stars) from the start of `line`.
fn strip_indent(line: &str, indent: usize) -> &str {
    let cut = line
        .char_indices()
        .take(indent)
        .take_while(|(_, c)| matches!(c, ' ' | '\t' | '*'))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BRIEF: ParseOptions = ParseOptions {
        dotted_names: false,
        leading_text: LeadingText::Brief,
        strict: false,
    };

    const DESCRIPTION: ParseOptions = ParseOptions {
        leading_text: LeadingText::Description,
        ..BRIEF
    };

    const STRICT: ParseOptions = ParseOptions {
        strict: true,
        ..BRIEF
    };

    fn pairs(lines: &[AnnotationLine]) -> Vec<(&str, &str)> {
        lines
            .iter()
            .map(|l| (l.command.as_str(), l.argument.as_str()))
            .collect()
    }

    #[test]
    fn leading_text_becomes_brief() {
        let body = " * Adds two numbers.\n * @param {number} a - first\n ";
        let lines = group(body, 3, &BRIEF);
        assert_eq!(
            pairs(&lines),
            vec![("brief", "Adds two numbers."), ("param", "{number} a - first")]
        );
    }

    #[test]
    fn continuation_lines_join_with_spaces() {
        let body = " * Adds two\n * numbers together.\n * @returns {number}\n *   the sum\n ";
        let lines = group(body, 3, &BRIEF);
        assert_eq!(
            pairs(&lines),
            vec![
                ("brief", "Adds two numbers together."),
                ("returns", "{number} the sum"),
            ]
        );
    }

    #[test]
    fn blank_lines_are_dropped() {
        let body = " *\n * Summary\n *\n *\n * @feature fast\n ";
        let lines = group(body, 3, &BRIEF);
        assert_eq!(pairs(&lines), vec![("brief", "Summary"), ("feature", "fast")]);
    }

    #[test]
    fn no_leading_text_keeps_bare_seed() {
        let body = " * @param x\n ";
        let lines = group(body, 3, &BRIEF);
        assert_eq!(pairs(&lines), vec![("brief", ""), ("param", "x")]);
    }

    #[test]
    fn strict_drops_bare_seed() {
        let body = " * @param x\n ";
        let lines = group(body, 3, &STRICT);
        assert_eq!(pairs(&lines), vec![("param", "x")]);
    }

    #[test]
    fn empty_body_has_only_seed() {
        assert_eq!(pairs(&group("", 0, &BRIEF)), vec![("brief", "")]);
        assert!(group("", 0, &STRICT).is_empty());
        assert!(group(" *\n ", 3, &DESCRIPTION).is_empty());
    }

    #[test]
    fn leading_description_lines_stay_separate() {
        let body = " * First line.\n * Second line.\n * @brief Short\n * more brief\n ";
        let lines = group(body, 3, &DESCRIPTION);
        assert_eq!(
            pairs(&lines),
            vec![
                ("description", "First line."),
                ("description", "Second line."),
                ("brief", "Short more brief"),
            ]
        );
    }

    #[test]
    fn bare_at_sign_has_empty_command() {
        let lines = group(" * @ loose\n ", 3, &STRICT);
        assert_eq!(pairs(&lines), vec![("", "loose")]);
        assert_eq!(lines[0].raw, "@ loose");
    }

    #[test]
    fn raw_keeps_folded_text() {
        let lines = group(" * @param {T} n\n *   - described\n ", 3, &STRICT);
        assert_eq!(lines[0].raw, "@param {T} n - described");
    }

    #[test]
    fn strip_indent_never_eats_text() {
        assert_eq!(strip_indent(" * text", 3), "text");
        assert_eq!(strip_indent("text", 3), "text");
        assert_eq!(strip_indent(" *", 3), "");
        assert_eq!(strip_indent("  éa", 3), "éa");
    }
}
