//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (assignment, if, while, print, putc, blocks)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! Parser methods are split across files using `impl Parser` blocks, so each
//! module extends the Parser with related functionality while sharing the
//! token cursor.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{read_tokens, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

/// Any failure of the lex + parse pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn location(&self) -> SourceLocation {
        match self {
            Error::Lex(e) => e.location,
            Error::Parse(e) => e.location,
        }
    }
}

/// Recursive descent parser for the mini language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Create a parser over an already lexed token list.
    ///
    /// A list that does not end in `End_of_input` gets one appended at the
    /// position of its last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_end_of_input) {
            let loc = tokens.last().map(|t| t.location).unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::EndOfInput, loc));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Lex `source` and create a parser over its tokens
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse the whole token list into a `Sequence` rooted tree
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        tracing::debug!(tokens = self.tokens.len(), "parsing program");

        let list = self.parse_statement_list()?;
        if !self.is_at_end() {
            return Err(self.unexpected("Expected statement or end of input"));
        }

        let root = Node::sequence(list);
        tracing::debug!(nodes = root.size(), "parsed program");
        Ok(root)
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_end_of_input()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    /// Syntax error at the current token
    pub(crate) fn unexpected(&self, message: &str) -> ParseError {
        let token = self.peek();
        let err = ParseError {
            message: format!("{}, found {}", message, token.kind),
            location: token.location,
        };
        tracing::debug!(error = %err, "syntax error");
        err
    }

    pub(crate) fn expect_token(&mut self, kind: &TokenKind, message: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::LeftParen, &format!("Expected '(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::RightParen, &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::Semicolon, &format!("Expected ';' {ctx}"))
    }
}

/// Parse a token list into an AST
pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Lex and parse `source` in one step
pub fn parse_source(source: &str) -> Result<Node, Error> {
    let mut parser = Parser::from_source(source)?;
    Ok(parser.parse_program()?)
}

/// Read tokens in interchange format, parse them and return the printed AST
pub fn parse_lex_output(text: &str) -> Result<String, ParseError> {
    let tokens = read_tokens(text)?;
    let root = parse(tokens)?;
    Ok(print_ast(&root))
}
