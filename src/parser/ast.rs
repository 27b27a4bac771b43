// AST (Abstract Syntax Tree) definitions for the mini-language front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Every kind of node the parser can build.
///
/// Leaf kinds carry their payload directly, so a structural node can never
/// hold a value and a leaf can never lose one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // Sequencing
    Sequence,
    Separator, // ; between statements
    Empty,     // no-op statement

    // Leaves
    Identifier(String),
    Integer(String),
    String(String),

    // Statements
    Assign,
    If,
    While,
    Prti,
    Prts,
    Prtc,

    // Arithmetic
    Multiply,
    Divide,
    Mod,
    Add,
    Subtract,

    // Comparison
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,

    // Logical
    And,
    Or,

    // Unary
    Negate,
    Not,
}

impl NodeKind {
    /// Label used in the printed AST
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Sequence => "Sequence",
            NodeKind::Separator | NodeKind::Empty => ";",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Integer(_) => "Integer",
            NodeKind::String(_) => "String",
            NodeKind::Assign => "Assign",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::Prti => "Prti",
            NodeKind::Prts => "Prts",
            NodeKind::Prtc => "Prtc",
            NodeKind::Multiply => "Multiply",
            NodeKind::Divide => "Divide",
            NodeKind::Mod => "Mod",
            NodeKind::Add => "Add",
            NodeKind::Subtract => "Subtract",
            NodeKind::Less => "Less",
            NodeKind::LessEqual => "LessEqual",
            NodeKind::Greater => "Greater",
            NodeKind::GreaterEqual => "GreaterEqual",
            NodeKind::Equal => "Equal",
            NodeKind::NotEqual => "NotEqual",
            NodeKind::And => "And",
            NodeKind::Or => "Or",
            NodeKind::Negate => "Negate",
            NodeKind::Not => "Not",
        }
    }

    /// Payload of a leaf kind, `None` for structural kinds
    pub fn value(&self) -> Option<&str> {
        match self {
            NodeKind::Identifier(v) | NodeKind::Integer(v) | NodeKind::String(v) => Some(v),
            _ => None,
        }
    }
}

/// A node of the syntax tree.
///
/// Each node owns its children outright. Unary nodes only use `left`,
/// leaves use neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn new(kind: NodeKind, left: Option<Node>, right: Option<Node>) -> Self {
        Node {
            kind,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn leaf(kind: NodeKind) -> Self {
        Node::new(kind, None, None)
    }

    pub fn unary(kind: NodeKind, operand: Node) -> Self {
        Node::new(kind, Some(operand), None)
    }

    pub fn binary(kind: NodeKind, left: Node, right: Node) -> Self {
        Node::new(kind, Some(left), Some(right))
    }

    pub fn empty() -> Self {
        Node::leaf(NodeKind::Empty)
    }

    /// Wrap a statement list in a `Sequence` node
    pub fn sequence(list: Node) -> Self {
        Node::unary(NodeKind::Sequence, list)
    }

    /// Chain statements into a right-leaning list of `;` separators.
    ///
    /// An empty list becomes a single `Empty` leaf.
    pub fn statement_list(statements: Vec<Node>) -> Self {
        if statements.is_empty() {
            return Node::empty();
        }

        let mut list: Option<Node> = None;
        for stmt in statements.into_iter().rev() {
            list = Some(Node::new(NodeKind::Separator, Some(stmt), list));
        }
        list.unwrap_or_else(Node::empty)
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.left().map_or(0, Node::size) + self.right().map_or(0, Node::size)
    }

    fn write_preorder(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.value() {
            Some(value) => writeln!(f, "{} {}", self.kind.label(), value)?,
            None => writeln!(f, "{}", self.kind.label())?,
        }
        if let Some(left) = self.left() {
            left.write_preorder(f)?;
        }
        if let Some(right) = self.right() {
            right.write_preorder(f)?;
        }
        Ok(())
    }
}

/// Canonical dump: depth-first pre-order, one label per line.
/// Absent children print nothing.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_preorder(f)
    }
}

/// Render the canonical AST dump for `root`
pub fn print_ast(root: &Node) -> String {
    root.to_string()
}
