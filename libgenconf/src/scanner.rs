//! Phase 1: Scanner
//!
//! The scanner classifies a single source line into one of the line forms of
//! the format. The patterns are tried in a fixed order and the first match
//! wins:
//!
//! 1. `<name>` opens a block, `</name>` closes the innermost one
//! 2. `<name value>` opens a shorthand block
//! 3. `key "value"` double-quoted attribute
//! 4. `key 'value'` single-quoted attribute
//! 5. `key value` or `key` unquoted attribute
//! 6. `# text` comment
//! 7. blank line
//!
//! A line matching none of them is reported as `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::tree::Quote;

/// `<token>` or `</token>`, surrounding whitespace ignored.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<(\S+)>\s*$").expect("Invalid tag regex"));

/// `<token1 token2>`. Neither token may start with `/`, since a rendered
/// `<token2>` tag must not read back as a close tag.
static TAG_WITH_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<([^\s/]\S*)\s+([^\s/]\S*)>\s*$").expect("Invalid shorthand tag regex")
});

// Attribute keys never start with `<` or `#`, so malformed tags and comments
// cannot be mistaken for attributes. The key is the whole first token, and a
// quoted value must be separated from it by whitespace. The value runs from
// the first quote after the key to the last quote on the line; anything after
// that is dropped.

static DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*([^\s#<]\S*)\s+"(.*)""#).expect("Invalid quoted regex")
});

static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*([^\s#<]\S*)\s+'(.*)'"#).expect("Invalid single quoted regex")
});

/// Only the first token after the key is kept; anything after it is dropped.
static UNQUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^\s#<]\S*)(?:\s+(\S+))?").expect("Invalid attribute regex")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#(.*)$").expect("Invalid comment regex"));

static BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").expect("Invalid blank line regex"));

/// The classification of one line, borrowing its captures from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `<name>`
    Open(&'a str),
    /// `</name>`; the name is not checked against the block it closes.
    Close(&'a str),
    /// `<container name>`
    OpenWithValue(&'a str, &'a str),
    /// `key value`, `key "value"` or `key 'value'`.
    Attribute {
        name: &'a str,
        value: &'a str,
        quote: Quote,
    },
    /// Text after the `#` marker, verbatim.
    Comment(&'a str),
    /// Whitespace only.
    Blank,
}

impl Line<'_> {
    /// Short name of the line form, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Line::Open(_) => "open",
            Line::Close(_) => "close",
            Line::OpenWithValue(..) => "open-with-value",
            Line::Attribute { .. } => "attribute",
            Line::Comment(_) => "comment",
            Line::Blank => "blank",
        }
    }
}

/// Classify a line (without its line terminator).
pub fn classify(line: &str) -> Option<Line<'_>> {
    if let Some(caps) = TAG.captures(line) {
        let token = caps.get(1)?.as_str();
        return Some(match token.strip_prefix('/') {
            Some(name) => Line::Close(name),
            None => Line::Open(token),
        });
    }

    if let Some(caps) = TAG_WITH_VALUE.captures(line) {
        return Some(Line::OpenWithValue(caps.get(1)?.as_str(), caps.get(2)?.as_str()));
    }

    for (pattern, quote) in [(&DOUBLE_QUOTED, Quote::Double), (&SINGLE_QUOTED, Quote::Single)] {
        if let Some(caps) = pattern.captures(line) {
            return Some(Line::Attribute {
                name: caps.get(1)?.as_str(),
                value: caps.get(2)?.as_str(),
                quote,
            });
        }
    }

    if let Some(caps) = UNQUOTED.captures(line) {
        return Some(Line::Attribute {
            name: caps.get(1)?.as_str(),
            value: caps.get(2).map_or("", |m| m.as_str()),
            quote: Quote::None,
        });
    }

    if let Some(caps) = COMMENT.captures(line) {
        return Some(Line::Comment(caps.get(1)?.as_str()));
    }

    if BLANK.is_match(line) {
        return Some(Line::Blank);
    }

    None
}
