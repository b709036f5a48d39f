//! Identifier finder: picks the name a comment block documents out of
//! the code that follows it.

use regex::Regex;
use std::sync::LazyLock;

/// Declaration keywords that precede the name rather than being it.
pub const RESERVED_WORDS: &[&str] = &["function", "var", "const", "export", "import", "fun"];

static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@?\w+").unwrap());

// Dots only between word runs: `Object.prototype.foo`, not `foo.`
static RE_DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@?\w+(?:\.\w+)*").unwrap());

/// Return the first token of `code` that is neither a reserved word nor an
/// annotation (`@Override`). With `dotted`, member paths count as one
/// token.
pub fn first_identifier(code: &str, dotted: bool) -> Option<&str> {
    let re = if dotted { &*RE_DOTTED } else { &*RE_WORD };
    re.find_iter(code)
        .map(|m| m.as_str())
        .find(|token| !token.starts_with('@') && !RESERVED_WORDS.contains(token))
}
