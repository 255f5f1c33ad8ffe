//! Parser and serializer for genconf, the nested block configuration format
//! popularized by Perl's Config::General.
//!
//! ```text
//! # comment
//! <database main>
//!     host corp.example.com
//!     user root
//!     motd "quoted values may contain spaces"
//! </database>
//! <logger>
//!     file /var/log/db.log
//! </logger>
//! ```
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Classifies each line as a block tag, shorthand block tag,
//!    attribute, comment, or blank line.
//!
//! 2. **Tree Builder**: Assembles classified lines into a
//!    [`Document`], keeping a stack of the blocks still open.
//!
//! The document is queried through [`Block`] views and written back out with
//! [`Document::render`]. Rendering a parsed rendering again yields the same
//! bytes.

mod error;
mod parser;
mod render;
mod scanner;
mod tree;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub use error::{ParseContext, ParseError, Result};
pub use parser::parse_lines;
pub use render::{RenderOptions, DEFAULT_INDENT_WIDTH, INDENT_ENV};
pub use scanner::{classify, Line};
pub use tree::{Attribute, Block, BlockId, Comment, Document, Item, Node, Quote};

/// Parse a genconf document from a string.
///
/// # Example
///
/// ```
/// use libgenconf::parse;
///
/// let doc = parse("<server>\n  port 8080\n</server>").unwrap();
/// assert_eq!(doc.root().get_value_from_path("server/port"), "8080");
/// ```
pub fn parse(input: &str) -> Result<Document> {
    parse_with_filename(input, None)
}

/// Parse a genconf document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Document> {
    let ctx = ParseContext::new(filename);
    parse_lines(input.lines().map(Ok::<_, io::Error>), &ctx)
}

/// Parse a genconf document from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Document> {
    parse_lines(reader.lines(), &ParseContext::default())
}

/// Open and parse a genconf file. The file name appears in error messages.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path.display().to_string();
    parse_lines(BufReader::new(file).lines(), &ParseContext::new(Some(&name)))
}
