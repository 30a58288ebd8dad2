//! The lossless parse tree.
//!
//! Leaves ([`RawSegment`]) hold the verbatim text of one token; nodes
//! ([`NodeSegment`]) group children under a type tag. Every byte of the
//! source ends up in exactly one leaf, so [`Segment::raw`] on the root gives
//! back the original input.

use std::fmt::Write as _;

use serde::Serialize;

use crate::lexer::{Span, Token, TokenKind};

/// Type tag of the node wrapping a region that could not be decomposed.
pub const UNPARSABLE: &str = "unparsable";

/// Type tag of the node produced by a bracketed grammar.
pub const BRACKETED: &str = "bracketed";

/// A leaf: one token with the type the grammar assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSegment {
    /// The segment type, e.g. `keyword` or `naked_identifier`.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// The lexical class of the underlying token.
    pub kind: TokenKind,
    /// The verbatim source text.
    pub raw: String,
    /// The location in the source.
    pub span: Span,
}

impl RawSegment {
    /// Creates a leaf from a token with an explicit type.
    #[must_use]
    pub fn from_token(token: &Token, type_tag: &str) -> Self {
        Self {
            type_tag: type_tag.to_string(),
            kind: token.kind,
            raw: token.raw.clone(),
            span: token.span,
        }
    }

    /// Creates a leaf typed by the token's lexical class.
    #[must_use]
    pub fn untyped(token: &Token) -> Self {
        Self::from_token(token, token.kind.default_type())
    }

    /// Returns true for whitespace, newlines and comments.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

/// An interior node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSegment {
    /// The segment type, e.g. `create_table_statement`.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// The bracket kind for `bracketed` nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket_kind: Option<String>,
    /// Children in document order.
    pub children: Vec<Segment>,
}

impl NodeSegment {
    /// Creates a node.
    #[must_use]
    pub fn new(type_tag: &str, children: Vec<Segment>) -> Self {
        Self {
            type_tag: type_tag.to_string(),
            bracket_kind: None,
            children,
        }
    }

    /// Creates a `bracketed` node of the given bracket kind.
    #[must_use]
    pub fn bracketed(kind: &str, children: Vec<Segment>) -> Self {
        Self {
            type_tag: BRACKETED.to_string(),
            bracket_kind: Some(kind.to_string()),
            children,
        }
    }

    /// Creates an `unparsable` node holding the given tokens verbatim.
    #[must_use]
    pub fn unparsable(tokens: &[Token]) -> Self {
        Self::new(
            UNPARSABLE,
            tokens
                .iter()
                .map(|t| Segment::Raw(RawSegment::untyped(t)))
                .collect(),
        )
    }

    /// The span from the first child's start to the last child's end.
    /// Empty nodes (only the root of an empty file) get an empty span.
    #[must_use]
    pub fn span(&self) -> Span {
        match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::default(),
        }
    }
}

/// A segment of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// A leaf.
    Raw(RawSegment),
    /// An interior node.
    Node(NodeSegment),
}

impl Segment {
    /// The segment type.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Raw(raw) => &raw.type_tag,
            Self::Node(node) => &node.type_tag,
        }
    }

    /// Returns true if the segment has the given type.
    #[must_use]
    pub fn is_type(&self, type_tag: &str) -> bool {
        self.type_tag() == type_tag
    }

    /// The span covered by this segment.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Raw(raw) => raw.span,
            Self::Node(node) => node.span(),
        }
    }

    /// Children of a node; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Raw(_) => &[],
            Self::Node(node) => &node.children,
        }
    }

    /// Returns the leaf, if this is one.
    #[must_use]
    pub const fn as_raw(&self) -> Option<&RawSegment> {
        match self {
            Self::Raw(raw) => Some(raw),
            Self::Node(_) => None,
        }
    }

    /// Returns the node, if this is one.
    #[must_use]
    pub const fn as_node(&self) -> Option<&NodeSegment> {
        match self {
            Self::Raw(_) => None,
            Self::Node(node) => Some(node),
        }
    }

    /// Returns true for whitespace and comment leaves.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        match self {
            Self::Raw(raw) => raw.is_trivia(),
            Self::Node(_) => false,
        }
    }

    /// Returns true if the segment contains any non-trivia leaf.
    #[must_use]
    pub fn is_code(&self) -> bool {
        self.raw_segments().any(|leaf| !leaf.is_trivia())
    }

    /// The bracket kind of a `bracketed` node.
    #[must_use]
    pub fn bracket_kind(&self) -> Option<&str> {
        self.as_node().and_then(|node| node.bracket_kind.as_deref())
    }

    /// Iterates over all leaves in document order.
    pub fn raw_segments(&self) -> impl Iterator<Item = &RawSegment> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(segment) = stack.pop() {
                match segment {
                    Self::Raw(raw) => return Some(raw),
                    Self::Node(node) => stack.extend(node.children.iter().rev()),
                }
            }
            None
        })
    }

    /// The verbatim source text under this segment.
    #[must_use]
    pub fn raw(&self) -> String {
        self.raw_segments().map(|leaf| leaf.raw.as_str()).collect()
    }

    /// The source text with trivia dropped and words joined by single
    /// spaces. Handy for assertions.
    #[must_use]
    pub fn code(&self) -> String {
        self.raw_segments()
            .filter(|leaf| !leaf.is_trivia())
            .map(|leaf| leaf.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All segments of the given type at any depth, including this one,
    /// in document order.
    #[must_use]
    pub fn recursive_crawl(&self, type_tag: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.crawl_into(type_tag, &mut found);
        found
    }

    fn crawl_into<'a>(&'a self, type_tag: &str, found: &mut Vec<&'a Self>) {
        if self.is_type(type_tag) {
            found.push(self);
        }
        for child in self.children() {
            child.crawl_into(type_tag, found);
        }
    }

    /// The first segment of the given type, depth first.
    #[must_use]
    pub fn find_first(&self, type_tag: &str) -> Option<&Self> {
        if self.is_type(type_tag) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_first(type_tag))
    }

    /// Direct children that are not trivia.
    pub fn code_children(&self) -> impl Iterator<Item = &Self> {
        self.children().iter().filter(|c| !c.is_trivia())
    }

    /// Renders the tree as indented text, one segment per line.
    ///
    /// ```text
    /// file:
    ///   statement:
    ///     use_statement:
    ///       keyword: "USE"
    ///       whitespace: " "
    ///       database_reference:
    ///         naked_identifier: "db"
    /// ```
    #[must_use]
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(0, &mut out);
        out
    }

    fn write_tree(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Raw(raw) => {
                let _ = writeln!(out, "{indent}{}: {:?}", raw.type_tag, raw.raw);
            }
            Self::Node(node) => {
                match &node.bracket_kind {
                    Some(kind) => {
                        let _ = writeln!(out, "{indent}{} ({kind}):", node.type_tag);
                    }
                    None => {
                        let _ = writeln!(out, "{indent}{}:", node.type_tag);
                    }
                }
                for child in &node.children {
                    child.write_tree(depth + 1, out);
                }
            }
        }
    }
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        Self::Raw(raw)
    }
}

impl From<NodeSegment> for Segment {
    fn from(node: NodeSegment) -> Self {
        Self::Node(node)
    }
}
