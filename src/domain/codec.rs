//! Line-oriented text format for decision trees
//!
//! Pre-order, two lines per node:
//!
//! ```text
//! Internal node
//! Is it bigger than a breadbox?
//! Leaf
//! an elephant
//! Leaf
//! a mouse
//! ```
//!
//! The framing needs no closing markers: every node is a leaf or has
//! exactly two children, so the tag alone fixes the shape.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use super::{DomainError, Node};

pub const LEAF_TAG: &str = "Leaf";
pub const INTERNAL_TAG: &str = "Internal node";

/// Deepest nesting the reader accepts before giving up on a file.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// How the reader treats tags other than `Leaf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPolicy {
    /// Only `Leaf` and `Internal node` are accepted; trailing content is an error.
    #[default]
    Strict,
    /// Any tag other than `Leaf` means internal node; trailing content is ignored.
    Lenient,
}

impl FromStr for TagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(TagPolicy::Strict),
            "lenient" => Ok(TagPolicy::Lenient),
            other => Err(format!("unknown tag policy '{other}' (expected strict or lenient)")),
        }
    }
}

// ============================================================
// Writing
// ============================================================

/// Write `node` in pre-order to `out`.
///
/// Fails with `InvalidInput` if a label contains a line break or surrounding
/// whitespace: the reader trims lines, so neither would survive a reload.
pub fn write_tree<W: Write>(node: &Node, out: &mut W) -> io::Result<()> {
    let text = to_text(node).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    out.write_all(text.as_bytes())
}

/// Serialize `node` to a string.
pub fn to_text(node: &Node) -> Result<String, DomainError> {
    let mut out = String::new();
    push_node(node, &mut out)?;
    Ok(out)
}

fn push_node(node: &Node, out: &mut String) -> Result<(), DomainError> {
    let (tag, label) = match node {
        Node::Leaf { guess } => (LEAF_TAG, guess),
        Node::Internal { question, .. } => (INTERNAL_TAG, question),
    };
    if label.contains(['\n', '\r']) {
        return Err(DomainError::MultilineLabel {
            label: label.clone(),
        });
    }
    if label.trim() != label {
        return Err(DomainError::PaddedLabel {
            label: label.clone(),
        });
    }
    out.push_str(tag);
    out.push('\n');
    out.push_str(label);
    out.push('\n');
    if let Node::Internal { yes, no, .. } = node {
        push_node(yes, out)?;
        push_node(no, out)?;
    }
    Ok(())
}

// ============================================================
// Reading
// ============================================================

/// Recursive-descent reader over a source of lines.
pub struct TreeReader<I> {
    lines: I,
    line_no: usize,
    policy: TagPolicy,
    depth: usize,
    max_depth: usize,
}

impl<I> TreeReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, policy: TagPolicy) -> Self {
        Self {
            lines,
            line_no: 0,
            policy,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Read one complete tree and check what follows it.
    #[instrument(level = "debug", skip(self), fields(policy = ?self.policy))]
    pub fn read_document(mut self) -> Result<Node, DomainError> {
        let root = self.read_node()?;
        while let Some(line) = self.next_line()? {
            if line.is_empty() {
                continue;
            }
            match self.policy {
                TagPolicy::Strict => {
                    return Err(DomainError::TrailingContent { line: self.line_no })
                }
                TagPolicy::Lenient => {
                    trace!(line = self.line_no, "ignoring trailing content");
                    break;
                }
            }
        }
        Ok(root)
    }

    /// Read a single node and, for internal nodes, both of its subtrees.
    pub fn read_node(&mut self) -> Result<Node, DomainError> {
        if self.depth >= self.max_depth {
            return Err(DomainError::TooDeep {
                line: self.line_no + 1,
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let node = self.read_node_at_depth();
        self.depth -= 1;
        node
    }

    fn read_node_at_depth(&mut self) -> Result<Node, DomainError> {
        let tag = self
            .next_line()?
            .ok_or(DomainError::UnexpectedEof {
                line: self.line_no + 1,
                expected: "a node tag",
            })?;
        if tag.is_empty() {
            return Err(DomainError::MissingTag { line: self.line_no });
        }
        let tag_line = self.line_no;
        let label = self.next_line()?.ok_or(DomainError::UnexpectedEof {
            line: self.line_no + 1,
            expected: "a node label",
        })?;

        if tag == LEAF_TAG {
            trace!(line = tag_line, guess = %label, "leaf");
            return Ok(Node::leaf(label));
        }
        if self.policy == TagPolicy::Strict && tag != INTERNAL_TAG {
            return Err(DomainError::UnknownTag {
                line: tag_line,
                tag,
            });
        }
        trace!(line = tag_line, question = %label, "internal node");
        let yes = self.read_node()?;
        let no = self.read_node()?;
        Ok(Node::internal(label, Arc::new(yes), Arc::new(no)))
    }

    /// Next line, trimmed; `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>, DomainError> {
        match self.lines.next() {
            None => Ok(None),
            Some(Err(source)) => Err(DomainError::Read {
                line: self.line_no + 1,
                source,
            }),
            Some(Ok(line)) => {
                self.line_no += 1;
                Ok(Some(line.trim().to_string()))
            }
        }
    }
}

/// Read a tree from a buffered reader.
pub fn read_tree<R: BufRead>(reader: R, policy: TagPolicy) -> Result<Node, DomainError> {
    TreeReader::new(reader.lines(), policy).read_document()
}

/// Parse a tree from text.
pub fn parse_tree(text: &str, policy: TagPolicy) -> Result<Node, DomainError> {
    read_tree(text.as_bytes(), policy)
}
