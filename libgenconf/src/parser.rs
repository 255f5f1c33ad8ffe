//! Phase 2: Tree Builder
//!
//! Pulls lines one at a time from a single-pass source, classifies each with
//! the scanner, and builds the tree. Open blocks are kept on an explicit
//! stack, one entry per nesting level: an open tag pushes, a close tag pops,
//! and running out of lines closes every level still open. A block is
//! attached to its parent when it is popped, so it is complete before it
//! becomes visible.

use std::io;

use tracing::{debug, trace};

use crate::error::{ParseContext, ParseError, Result};
use crate::scanner::{self, Line};
use crate::tree::{BlockId, Document};

/// Sequential line reader that remembers the zero-based number of the last
/// line handed out.
struct LineSource<I> {
    lines: I,
    next: usize,
}

impl<I, S> LineSource<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    fn new(lines: I) -> Self {
        Self { lines, next: 0 }
    }

    fn next_line(&mut self) -> Result<Option<(usize, S)>> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                let num = self.next;
                self.next += 1;
                Ok(Some((num, line)))
            }
            None => Ok(None),
        }
    }
}

/// Build a document from a stream of lines without terminators.
///
/// Read failures from the source are returned as [`ParseError::Io`]. Any
/// line the scanner cannot classify aborts the whole parse.
pub fn parse_lines<I, S>(lines: I, ctx: &ParseContext) -> Result<Document>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut source = LineSource::new(lines.into_iter());
    let mut doc = Document::new();

    if let Err(err) = build_tree(&mut source, &mut doc, ctx) {
        debug!(error = %err, "parse failed");
        return Err(err);
    }

    debug!(
        lines = source.next,
        blocks = doc.block_count(),
        "parsed document"
    );
    Ok(doc)
}

fn build_tree<I, S>(
    source: &mut LineSource<I>,
    doc: &mut Document,
    ctx: &ParseContext,
) -> Result<()>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    // Root at the bottom, innermost open block on top.
    let mut stack = vec![BlockId::ROOT];

    while let Some((line_num, raw)) = source.next_line()? {
        let raw = raw.as_ref();
        let Some(line) = scanner::classify(raw) else {
            return Err(ParseError::unrecognized(raw, ctx, line_num));
        };
        trace!(
            line = line_num + 1,
            kind = line.kind(),
            depth = stack.len() - 1,
            "classified line"
        );

        let current = *stack.last().unwrap_or(&BlockId::ROOT);
        match line {
            Line::Open(name) => {
                let child = doc.add_block(current);
                doc.set_name(child, name, None);
                stack.push(child);
            }
            Line::Close(_) => {
                if stack.len() == 1 {
                    debug!(
                        line = line_num + 1,
                        "close tag at top level ends the document"
                    );
                    return Ok(());
                }
                stack.pop();
                doc.attach_block(current);
            }
            Line::OpenWithValue(container, name) => {
                let existing = doc.block(current).get(container).map(|block| block.id());
                let middle = match existing {
                    Some(id) => {
                        debug!(line = line_num + 1, container, name, "merge into existing block");
                        id
                    }
                    None => {
                        let id = doc.add_block(current);
                        doc.set_name(id, container, None);
                        doc.attach_block(id);
                        id
                    }
                };
                let child = doc.add_block(middle);
                doc.set_name(child, name, Some(name));
                stack.push(child);
            }
            Line::Attribute { name, value, quote } => {
                doc.add_attribute(current, name, value, quote);
            }
            Line::Comment(text) => doc.add_comment(current, text),
            Line::Blank => doc.add_blank_line(current),
        }
    }

    // End of input closes whatever is still open, innermost first.
    while stack.len() > 1 {
        if let Some(id) = stack.pop() {
            doc.attach_block(id);
        }
    }
    Ok(())
}
