//! Error types for genconf parsing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for genconf parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages. `line` is zero-based.
    pub fn loc_suffix(&self, line: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at line {} of <{}>", line + 1, name),
            None => format!(" at line {}", line + 1),
        }
    }
}

/// Error type for genconf parsing.
///
/// Construction either yields a complete document or one of these; there is
/// no partial tree.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A line matched none of the line forms.
    #[error("Unrecognized line \"{line}\"{location}")]
    UnrecognizedLine { line: String, location: String },

    /// The source could not be opened.
    #[error("Cannot open <{}>: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from the line source failed part way.
    #[error("Read failed: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Build an unrecognized-line error with location information.
    pub fn unrecognized(line: &str, ctx: &ParseContext, line_num: usize) -> Self {
        ParseError::UnrecognizedLine {
            line: line.to_string(),
            location: ctx.loc_suffix(line_num),
        }
    }

    /// The offending raw line, for unrecognized-line errors.
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::UnrecognizedLine { line, .. } => Some(line),
            _ => None,
        }
    }
}
