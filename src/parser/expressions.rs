//! Expression parsing implementation
//!
//! Binary operators are parsed by precedence climbing, one method per level,
//! lowest precedence first:
//!
//! ```text
//! expr     ::= and_expr { '||' and_expr }
//! and_expr ::= rel_expr { '&&' rel_expr }
//! rel_expr ::= add_expr [ ('<' | '<=' | '>' | '>=' | '==' | '!=') add_expr ]
//! add_expr ::= mul_expr { ('+' | '-') mul_expr }
//! mul_expr ::= unary { ('*' | '/' | '%') unary }
//! unary    ::= '-' unary | '!' unary | primary
//! primary  ::= Identifier | Integer | '(' expr ')'
//! ```
//!
//! Every looping level is left-associative. Comparisons do not chain.
//!
//! The lexer only emits `Op_subtract` after an integer or identifier, so a
//! minus after `)` arrives as `Op_negate`. In infix position either minus
//! token means subtraction, in prefix position either means negation.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(&TokenKind::OpOr) {
            let right = self.parse_logical_and()?;
            left = Node::binary(NodeKind::Or, left, right);
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_relational()?;

        while self.match_token(&TokenKind::OpAnd) {
            let right = self.parse_relational()?;
            left = Node::binary(NodeKind::And, left, right);
        }

        Ok(left)
    }

    /// Parse a single, non-chaining comparison
    fn parse_relational(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_additive()?;

        let op = match self.peek().kind {
            TokenKind::OpLess => NodeKind::Less,
            TokenKind::OpLessEqual => NodeKind::LessEqual,
            TokenKind::OpGreater => NodeKind::Greater,
            TokenKind::OpGreaterEqual => NodeKind::GreaterEqual,
            TokenKind::OpEqual => NodeKind::Equal,
            TokenKind::OpNotEqual => NodeKind::NotEqual,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_additive()?;
        Ok(Node::binary(op, left, right))
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::OpAdd => NodeKind::Add,
                TokenKind::OpSubtract | TokenKind::OpNegate => NodeKind::Subtract,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplicative()?;
            left = Node::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::OpMultiply => NodeKind::Multiply,
                TokenKind::OpDivide => NodeKind::Divide,
                TokenKind::OpMod => NodeKind::Mod,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary()?;
            left = Node::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse unary operators (right-recursive)
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let op = match self.peek().kind {
            TokenKind::OpNegate | TokenKind::OpSubtract => NodeKind::Negate,
            TokenKind::OpNot => NodeKind::Not,
            _ => return self.parse_primary(),
        };
        self.advance();

        let operand = self.parse_unary()?;
        Ok(Node::unary(op, operand))
    }

    /// Parse primary expressions
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let node = match &self.peek().kind {
            TokenKind::Identifier(name) => Node::leaf(NodeKind::Identifier(name.clone())),
            TokenKind::Integer(digits) => Node::leaf(NodeKind::Integer(digits.clone())),
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                return Ok(expr);
            }
            _ => return Err(self.unexpected("Expected expression")),
        };
        self.advance();
        Ok(node)
    }
}
