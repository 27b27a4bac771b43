//! Mini-language front end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`token`]: Token kinds and the fixed-width token interchange format
//! - [`parse`]: Parsing (tokens → AST), errors and entry points
//! - [`ast`]: AST node definitions and the canonical printed form
//!
//! # Language
//!
//! - One numeric type (integers); character literals lex as integers
//! - String literals only as `print` arguments
//! - Statements: assignment, `if`/`else`, `while`, `print`, `putc`, blocks
//! - Expressions: arithmetic, comparison, logical, unary `-` and `!`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod token;

mod expressions;
mod statements;

#[cfg(test)]
mod parser_property_tests;

pub use ast::{print_ast, Node, NodeKind, SourceLocation};
pub use lexer::{lex_to_text, LexError, LexErrorKind, Lexer};
pub use parse::{parse, parse_lex_output, parse_source, Error, ParseError, Parser};
pub use token::{read_tokens, Token, TokenKind};
