//! Comment splitter: cuts source text into doc comment bodies and the
//! code fragment that follows each one.

use regex::Regex;
use std::sync::LazyLock;

/// Opening marker. The newline is part of it, so `/** inline */` is not a
/// doc block.
const OPEN: &str = "/**\n";
const CLOSE: &str = "*/";

/// Leading whitespace plus an optional run of stars and one space.
static RE_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(?:\*+[ \t]?)?").unwrap());

/// A raw comment body and the code after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentBlock<'a> {
    /// Text between the opening marker and the first `*/`
    pub body: &'a str,
    /// Text after `*/` up to the next opening marker; only scanned for an
    /// identifier
    pub code: &'a str,
    /// Column of the comment text, stripped from every body line
    pub indent: usize,
}

/// Split `input` into comment blocks. Text before the first opening
/// marker is discarded.
pub fn split(input: &str) -> Vec<CommentBlock<'_>> {
    input
        .split(OPEN)
        .skip(1)
        .map(|segment| {
            let (body, code) = match segment.find(CLOSE) {
                Some(pos) => (&segment[..pos], &segment[pos + CLOSE.len()..]),
                // Unterminated: all body, nothing to name it by
                None => (segment, ""),
            };
            CommentBlock {
                body,
                code,
                indent: measure_indent(body),
            }
        })
        .collect()
}

/// Width of the comment prefix on the first body line that has content.
fn measure_indent(body: &str) -> usize {
    body.lines()
        .filter_map(|line| RE_INDENT.find(line).map(|m| (line, m.end())))
        .find(|(line, end)| !line[*end..].trim().is_empty())
        .map_or(0, |(_, end)| end)
}
