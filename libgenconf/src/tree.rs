//! Genconf tree representation.
//!
//! A [`Document`] owns every block in a flat arena. Blocks refer to their
//! children through [`Node::Block`] ids and to their parent through a plain
//! [`BlockId`], so ownership only ever flows from parent to children. The
//! back-reference is used for depth and nothing else.
//!
//! Callers query the tree through [`Block`], a cheap copyable view.

use std::collections::HashMap;
use std::fmt;

use crate::render::{self, RenderOptions};

/// Index of a block in its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

impl BlockId {
    /// The synthetic root block.
    pub const ROOT: BlockId = BlockId(0);
}

/// How an attribute value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    /// `key value`
    #[default]
    None,
    /// `key "value"`
    Double,
    /// `key 'value'`
    Single,
}

impl Quote {
    /// The quote character, if any.
    pub fn as_char(self) -> Option<char> {
        match self {
            Quote::None => None,
            Quote::Double => Some('"'),
            Quote::Single => Some('\''),
        }
    }
}

/// A `key value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// May be empty; an empty value is still a present attribute.
    pub value: String,
    pub quote: Quote,
}

/// A comment line. Holds the text after `#` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// A child of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Block(BlockId),
    Attribute(Attribute),
    Comment(Comment),
    BlankLine,
}

#[derive(Debug, Clone)]
struct BlockData {
    name: String,
    value: Option<String>,
    parent: Option<BlockId>,
    children: Vec<Node>,
}

/// A parsed configuration document.
#[derive(Debug, Clone)]
pub struct Document {
    blocks: Vec<BlockData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding only the nameless root block.
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockData {
                name: String::new(),
                value: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root block.
    pub fn root(&self) -> Block<'_> {
        self.block(BlockId::ROOT)
    }

    /// View of the block with the given id.
    ///
    /// Panics if the id does not belong to this document.
    pub fn block(&self, id: BlockId) -> Block<'_> {
        assert!(id.0 < self.blocks.len(), "block id out of range");
        Block { doc: self, id }
    }

    /// Total number of blocks, root included.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Serialize the whole document.
    pub fn render(&self, options: &RenderOptions) -> String {
        self.root().render(options)
    }

    fn data(&self, id: BlockId) -> &BlockData {
        &self.blocks[id.0]
    }

    // Construction primitives, used by the parser only.

    /// Allocate a nameless, unattached block under `parent`. It becomes
    /// visible to queries once passed to [`Document::attach_block`].
    pub(crate) fn add_block(&mut self, parent: BlockId) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(BlockData {
            name: String::new(),
            value: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    /// Append a block allocated with [`Document::add_block`] to its parent.
    pub(crate) fn attach_block(&mut self, child: BlockId) {
        if let Some(parent) = self.blocks[child.0].parent {
            self.blocks[parent.0].children.push(Node::Block(child));
        }
    }

    pub(crate) fn set_name(&mut self, id: BlockId, name: &str, value: Option<&str>) {
        let data = &mut self.blocks[id.0];
        data.name = name.to_string();
        data.value = value.map(String::from);
    }

    pub(crate) fn add_attribute(&mut self, id: BlockId, name: &str, value: &str, quote: Quote) {
        self.blocks[id.0].children.push(Node::Attribute(Attribute {
            name: name.to_string(),
            value: value.to_string(),
            quote,
        }));
    }

    pub(crate) fn add_comment(&mut self, id: BlockId, text: &str) {
        self.blocks[id.0].children.push(Node::Comment(Comment {
            text: text.to_string(),
        }));
    }

    pub(crate) fn add_blank_line(&mut self, id: BlockId) {
        self.blocks[id.0].children.push(Node::BlankLine);
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

/// A child node seen through a [`Block`] view.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Block(Block<'a>),
    Attribute(&'a Attribute),
    Comment(&'a Comment),
    BlankLine,
}

/// Read-only view of one block in a [`Document`].
#[derive(Clone, Copy)]
pub struct Block<'a> {
    doc: &'a Document,
    id: BlockId,
}

impl<'a> Block<'a> {
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The tag name. Empty for the root.
    pub fn name(&self) -> &'a str {
        &self.doc.data(self.id).name
    }

    /// The value of the `<container value>` tag this block was opened with,
    /// if it was opened that way.
    pub fn shorthand_value(&self) -> Option<&'a str> {
        self.doc.data(self.id).value.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.doc.data(self.id).parent.is_none()
    }

    pub fn parent(&self) -> Option<Block<'a>> {
        self.doc.data(self.id).parent.map(|id| self.doc.block(id))
    }

    /// Number of ancestors. The root is at depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.doc.data(self.id).parent;
        while let Some(id) = current {
            depth += 1;
            current = self.doc.data(id).parent;
        }
        depth
    }

    /// Direct children in order.
    pub fn nodes(&self) -> impl Iterator<Item = Item<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id).children.iter().map(move |node| match node {
            Node::Block(id) => Item::Block(doc.block(*id)),
            Node::Attribute(attr) => Item::Attribute(attr),
            Node::Comment(comment) => Item::Comment(comment),
            Node::BlankLine => Item::BlankLine,
        })
    }

    fn blocks(&self) -> impl Iterator<Item = Block<'a>> + 'a {
        self.nodes().filter_map(|item| match item {
            Item::Block(block) => Some(block),
            _ => None,
        })
    }

    fn attributes(&self) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.nodes().filter_map(|item| match item {
            Item::Attribute(attr) => Some(attr),
            _ => None,
        })
    }

    /// First direct child block named `name`.
    pub fn get(&self, name: &str) -> Option<Block<'a>> {
        self.blocks().find(|block| block.name() == name)
    }

    /// Every direct child block named `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<Block<'a>> {
        self.blocks().filter(|block| block.name() == name).collect()
    }

    /// Value of the first attribute named `key`, or `""` if there is none.
    /// Use [`Block::values`] to tell an absent attribute from an empty one.
    pub fn value(&self, key: &str) -> &'a str {
        self.attributes()
            .find(|attr| attr.name == key)
            .map_or("", |attr| attr.value.as_str())
    }

    /// Values of every attribute named `key`, in order.
    pub fn values(&self, key: &str) -> Vec<&'a str> {
        self.attributes()
            .filter(|attr| attr.name == key)
            .map(|attr| attr.value.as_str())
            .collect()
    }

    /// Attribute names to values. On repeated names the last one wins.
    pub fn map(&self) -> HashMap<&'a str, &'a str> {
        self.attributes()
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
            .collect()
    }

    /// Names of the direct child blocks, duplicates included.
    pub fn children(&self) -> Vec<&'a str> {
        self.blocks().map(|block| block.name()).collect()
    }

    /// Names of the direct attributes, duplicates included.
    pub fn keys(&self) -> Vec<&'a str> {
        self.attributes().map(|attr| attr.name.as_str()).collect()
    }

    /// Resolve a `/`-separated path: every segment but the last names a
    /// child block, the last names an attribute. Returns `""` when any step
    /// is missing.
    pub fn get_value_from_path(&self, path: &str) -> &'a str {
        let mut segments: Vec<&str> = path.split('/').collect();
        let key = segments.pop().unwrap_or_default();
        let mut block = *self;
        for segment in segments {
            match block.get(segment) {
                Some(child) => block = child,
                None => return "",
            }
        }
        block.value(key)
    }

    /// Serialize this block and everything below it.
    pub fn render(&self, options: &RenderOptions) -> String {
        render::render_block(*self, options)
    }
}

impl fmt::Debug for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("name", &self.name())
            .field("children", &self.children())
            .field("keys", &self.keys())
            .finish()
    }
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}
