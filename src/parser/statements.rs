//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! stmt_sequence ::= { statement }
//! statement     ::= ';'
//!                 | Identifier '=' expr ';'
//!                 | 'if' '(' expr ')' statement [ 'else' statement ]
//!                 | 'while' '(' expr ')' statement
//!                 | 'print' '(' print_item { ',' print_item } ')' ';'
//!                 | 'putc' '(' expr ')' ';'
//!                 | '{' stmt_sequence '}'
//! print_item    ::= expr | String
//! ```
//!
//! # Tree shapes
//!
//! A statement list is a right-leaning chain of `;` separators, wrapped in a
//! `Sequence` at program level and for every block. The body of an `if` or
//! `while` becomes `Sequence(body, Empty)`, and `if` nests its two arms in a
//! second `If` node:
//!
//! ```text
//! If(cond, If(Sequence(then, Empty), Sequence(else, Empty) | Empty))
//! ```
//!
//! A multi-item `print` is desugared into a `Sequence` of `Prti`/`Prts`
//! statements, one per item.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse statements until `}` or end of input into a separator chain
    pub(crate) fn parse_statement_list(&mut self) -> Result<Node, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Node::statement_list(statements))
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Node, ParseError> {
        match self.peek().kind.clone() {
            TokenKind::Semicolon => {
                self.advance();
                Ok(Node::empty())
            }
            TokenKind::Identifier(name) => {
                self.advance();
                self.parse_assignment(name)
            }
            TokenKind::KeywordIf => {
                self.advance();
                self.parse_if_statement()
            }
            TokenKind::KeywordWhile => {
                self.advance();
                self.parse_while_statement()
            }
            TokenKind::KeywordPrint => {
                self.advance();
                self.parse_print_statement()
            }
            TokenKind::KeywordPutc => {
                self.advance();
                self.parse_putc_statement()
            }
            TokenKind::LeftBrace => {
                self.advance();
                self.parse_block()
            }
            _ => Err(self.unexpected("Expected statement")),
        }
    }

    /// Parse assignment after its target identifier: `= expr ;`
    fn parse_assignment(&mut self, name: String) -> Result<Node, ParseError> {
        self.expect_token(&TokenKind::OpAssign, "Expected '=' after identifier")?;
        let value = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(Node::binary(
            NodeKind::Assign,
            Node::leaf(NodeKind::Identifier(name)),
            value,
        ))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Node, ParseError> {
        let condition = self.parse_condition("'if'")?;
        let then_branch = self.parse_branch()?;

        let else_branch = if self.match_token(&TokenKind::KeywordElse) {
            self.parse_branch()?
        } else {
            Node::empty()
        };

        Ok(Node::binary(
            NodeKind::If,
            condition,
            Node::binary(NodeKind::If, then_branch, else_branch),
        ))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Node, ParseError> {
        let condition = self.parse_condition("'while'")?;
        let body = self.parse_branch()?;

        Ok(Node::binary(NodeKind::While, condition, body))
    }

    /// Parse `print(item, ...);` into a sequence of single-item prints
    fn parse_print_statement(&mut self) -> Result<Node, ParseError> {
        self.expect_lparen("after 'print'")?;

        let mut items = Vec::new();
        loop {
            items.push(self.parse_print_item()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect_rparen("after print arguments")?;
        self.expect_semicolon("after print statement")?;

        Ok(Node::sequence(Node::statement_list(items)))
    }

    /// A string literal prints with `Prts`, anything else is an integer
    /// expression printed with `Prti`
    fn parse_print_item(&mut self) -> Result<Node, ParseError> {
        if let TokenKind::String(text) = &self.peek().kind {
            let text = text.clone();
            self.advance();
            return Ok(Node::unary(NodeKind::Prts, Node::leaf(NodeKind::String(text))));
        }

        let expr = self.parse_expression()?;
        Ok(Node::unary(NodeKind::Prti, expr))
    }

    /// Parse putc statement
    fn parse_putc_statement(&mut self) -> Result<Node, ParseError> {
        self.expect_lparen("after 'putc'")?;
        let expr = self.parse_expression()?;
        self.expect_rparen("after putc argument")?;
        self.expect_semicolon("after putc statement")?;

        Ok(Node::unary(NodeKind::Prtc, expr))
    }

    /// Parse the rest of a `{ ... }` block after the opening brace
    fn parse_block(&mut self) -> Result<Node, ParseError> {
        let list = self.parse_statement_list()?;
        self.expect_token(&TokenKind::RightBrace, "Expected '}' after block")?;

        Ok(Node::sequence(list))
    }

    /// `( expr )` following `if` or `while`
    fn parse_condition(&mut self, keyword: &str) -> Result<Node, ParseError> {
        self.expect_lparen(&format!("after {keyword}"))?;
        let condition = self.parse_expression()?;
        self.expect_rparen(&format!("after {keyword} condition"))?;
        Ok(condition)
    }

    /// Body of an `if` arm or `while` loop
    fn parse_branch(&mut self) -> Result<Node, ParseError> {
        let body = self.parse_statement()?;
        Ok(Node::binary(NodeKind::Sequence, body, Node::empty()))
    }
}
