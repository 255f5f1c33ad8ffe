//! Serialize a genconf tree back to text.
//!
//! Output is fully regenerated from the tree: indentation comes from block
//! depth, not from the source, so re-parsing a rendering and rendering it
//! again gives the same bytes.

use std::env;

use crate::tree::{Attribute, Block, Item};

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Environment variable consulted by [`RenderOptions::from_env`].
pub const INDENT_ENV: &str = "GENCONF_INDENT";

/// Options threaded into every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Read the indent width from `GENCONF_INDENT`, or fall back to the default.
    pub fn from_env() -> Self {
        let indent_width = env::var(INDENT_ENV)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_INDENT_WIDTH);
        Self { indent_width }
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    fn write_pad(&self, out: &mut String, depth: usize) {
        out.extend(std::iter::repeat(' ').take(self.indent_width * depth));
    }
}

/// Render a block and its subtree.
pub(crate) fn render_block(block: Block<'_>, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_block(&mut out, block, block.depth(), options);
    out
}

/// The open tag is written without leading padding; the caller has already
/// placed it. Children are padded to their parent's depth, close tags to one
/// level less. Blocks still being written are kept on an explicit stack
/// together with the iterator over their remaining children.
fn write_block(out: &mut String, block: Block<'_>, depth: usize, options: &RenderOptions) {
    write_open_tag(out, block);
    let mut stack = vec![(block, depth, block.nodes())];

    while let Some((current, depth, children)) = stack.last_mut() {
        let (current, depth) = (*current, *depth);
        match children.next() {
            Some(Item::Block(child)) => {
                options.write_pad(out, depth);
                write_open_tag(out, child);
                stack.push((child, depth + 1, child.nodes()));
            }
            Some(Item::Attribute(attr)) => {
                options.write_pad(out, depth);
                write_attribute(out, attr);
            }
            Some(Item::Comment(comment)) => {
                options.write_pad(out, depth);
                out.push('#');
                out.push_str(&comment.text);
                out.push('\n');
            }
            Some(Item::BlankLine) => out.push('\n'),
            None => {
                stack.pop();
                if !current.is_root() {
                    options.write_pad(out, depth.saturating_sub(1));
                    out.push_str("</");
                    out.push_str(current.name());
                    out.push_str(">\n");
                }
            }
        }
    }
}

fn write_open_tag(out: &mut String, block: Block<'_>) {
    if !block.is_root() {
        out.push('<');
        out.push_str(block.name());
        out.push_str(">\n");
    }
}

fn write_attribute(out: &mut String, attr: &Attribute) {
    out.push_str(&attr.name);
    match attr.quote.as_char() {
        Some(q) => {
            out.push(' ');
            out.push(q);
            out.push_str(&attr.value);
            out.push(q);
        }
        None if attr.value.is_empty() => {}
        None => {
            out.push(' ');
            out.push_str(&attr.value);
        }
    }
    out.push('\n');
}
