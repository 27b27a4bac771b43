//! # Introduction
//!
//! `minic` is the front end of a small imperative teaching language: integer
//! arithmetic, string and character literals, `if`/`while`, `print`/`putc`
//! output and blocks.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → printed AST
//! ```
//!
//! 1. [`parser::lexer`]: scans characters into [`parser::token::Token`]s,
//!    tracking line and column for diagnostics.
//! 2. [`parser::token`]: the fixed-width textual token format, rendered by
//!    `Display` and read back by [`parser::token::read_tokens`].
//! 3. [`parser::parse`]: recursive descent with precedence climbing,
//!    producing a [`parser::ast::Node`] tree rooted at a `Sequence`.
//! 4. [`parser::ast`]: the tree and its canonical pre-order dump.
//!
//! Lexical and syntax errors are fatal: the first one stops processing and
//! carries the line and column where it happened.
//!
//! ```
//! let root = minic::parse_source("Count = 3 * 4 + 6;").unwrap();
//! assert_eq!(
//!     minic::print_ast(&root),
//!     "Sequence\n;\nAssign\nIdentifier Count\nAdd\nMultiply\nInteger 3\nInteger 4\nInteger 6\n"
//! );
//! ```

pub mod parser;

pub use parser::{
    lex_to_text, parse, parse_lex_output, parse_source, print_ast, read_tokens, Error, LexError,
    LexErrorKind, Lexer, Node, NodeKind, ParseError, Parser, SourceLocation, Token, TokenKind,
};
