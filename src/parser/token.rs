//! Token definitions and the textual token interchange format
//!
//! Each token renders as one fixed-width line:
//!
//! ```text
//! <line:5>  <column:5> <kind:-15>[payload]
//! ```
//!
//! Integers append `  %4s` of their digits, identifiers append ` name` and
//! strings append ` "content"`. The layout is read back by [`read_tokens`],
//! so widths and payload formatting are part of the contract.

use super::ast::SourceLocation;
use super::lexer::{is_keyword, is_word_char};
use super::parse::ParseError;
use std::fmt;

const LINE_WIDTH: usize = 5;
const COLUMN_WIDTH: usize = 5;
const KIND_WIDTH: usize = 15;
const INTEGER_WIDTH: usize = 4;

/// The closed set of token kinds.
///
/// Literal and identifier kinds carry their text; all others are pure syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    EndOfInput,

    // Arithmetic
    OpMultiply,
    OpDivide,
    OpMod,
    OpAdd,
    OpSubtract,
    OpNegate,

    // Logical / comparison
    OpNot,
    OpLess,
    OpLessEqual,
    OpGreater,
    OpGreaterEqual,
    OpEqual,
    OpNotEqual,
    OpAssign,
    OpAnd,
    OpOr,

    // Keywords
    KeywordIf,
    KeywordElse,
    KeywordWhile,
    KeywordPrint,
    KeywordPutc,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Comma,

    // Literals
    Identifier(String),
    Integer(String),
    String(String),
}

impl TokenKind {
    /// Name used in the interchange format and in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "End_of_input",
            TokenKind::OpMultiply => "Op_multiply",
            TokenKind::OpDivide => "Op_divide",
            TokenKind::OpMod => "Op_mod",
            TokenKind::OpAdd => "Op_add",
            TokenKind::OpSubtract => "Op_subtract",
            TokenKind::OpNegate => "Op_negate",
            TokenKind::OpNot => "Op_not",
            TokenKind::OpLess => "Op_less",
            TokenKind::OpLessEqual => "Op_lessequal",
            TokenKind::OpGreater => "Op_greater",
            TokenKind::OpGreaterEqual => "Op_greaterequal",
            TokenKind::OpEqual => "Op_equal",
            TokenKind::OpNotEqual => "Op_notequal",
            TokenKind::OpAssign => "Op_assign",
            TokenKind::OpAnd => "Op_and",
            TokenKind::OpOr => "Op_or",
            TokenKind::KeywordIf => "Keyword_if",
            TokenKind::KeywordElse => "Keyword_else",
            TokenKind::KeywordWhile => "Keyword_while",
            TokenKind::KeywordPrint => "Keyword_print",
            TokenKind::KeywordPutc => "Keyword_putc",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comma => "Comma",
            TokenKind::Identifier(_) => "Identifier",
            TokenKind::Integer(_) => "Integer",
            TokenKind::String(_) => "String",
        }
    }

    /// Build a kind from its interchange name and payload text.
    ///
    /// The payload is ignored for pure-syntax kinds.
    pub fn from_name(name: &str, payload: &str) -> Option<TokenKind> {
        let kind = match name {
            "End_of_input" => TokenKind::EndOfInput,
            "Op_multiply" => TokenKind::OpMultiply,
            "Op_divide" => TokenKind::OpDivide,
            "Op_mod" => TokenKind::OpMod,
            "Op_add" => TokenKind::OpAdd,
            "Op_subtract" => TokenKind::OpSubtract,
            "Op_negate" => TokenKind::OpNegate,
            "Op_not" => TokenKind::OpNot,
            "Op_less" => TokenKind::OpLess,
            "Op_lessequal" => TokenKind::OpLessEqual,
            "Op_greater" => TokenKind::OpGreater,
            "Op_greaterequal" => TokenKind::OpGreaterEqual,
            "Op_equal" => TokenKind::OpEqual,
            "Op_notequal" => TokenKind::OpNotEqual,
            "Op_assign" => TokenKind::OpAssign,
            "Op_and" => TokenKind::OpAnd,
            "Op_or" => TokenKind::OpOr,
            "Keyword_if" => TokenKind::KeywordIf,
            "Keyword_else" => TokenKind::KeywordElse,
            "Keyword_while" => TokenKind::KeywordWhile,
            "Keyword_print" => TokenKind::KeywordPrint,
            "Keyword_putc" => TokenKind::KeywordPutc,
            "LeftParen" => TokenKind::LeftParen,
            "RightParen" => TokenKind::RightParen,
            "LeftBrace" => TokenKind::LeftBrace,
            "RightBrace" => TokenKind::RightBrace,
            "Semicolon" => TokenKind::Semicolon,
            "Comma" => TokenKind::Comma,
            "Identifier" => TokenKind::Identifier(payload.to_string()),
            "Integer" => TokenKind::Integer(payload.to_string()),
            "String" => TokenKind::String(payload.to_string()),
            _ => return None,
        };
        Some(kind)
    }

    /// True for the kinds after which `-` is binary subtraction
    pub fn ends_operand(&self) -> bool {
        matches!(self, TokenKind::Integer(_) | TokenKind::Identifier(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with the 1-based position of its first character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// Renders the interchange line for this token
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>lw$}  {:>cw$} {:<kw$}",
            self.location.line,
            self.location.column,
            self.kind.name(),
            lw = LINE_WIDTH,
            cw = COLUMN_WIDTH,
            kw = KIND_WIDTH,
        )?;
        match &self.kind {
            TokenKind::Integer(digits) => write!(f, "  {:>w$}", digits, w = INTEGER_WIDTH),
            TokenKind::Identifier(name) => write!(f, " {}", name),
            TokenKind::String(text) => write!(f, " \"{}\"", text),
            _ => Ok(()),
        }
    }
}

/// Reconstruct a token list from interchange text.
///
/// Blank lines are skipped. A string token whose content spans several
/// lines is joined back together with `\n`. Lines are split on `\n` only, so
/// a `\r` inside a string payload survives.
///
/// Payloads must look like something the lexer could have produced: integer
/// digits, a single non-reserved identifier word, and nothing after a
/// pure-syntax kind.
pub fn read_tokens(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lines = text.split('\n').enumerate();

    while let Some((index, raw)) = lines.next() {
        if raw.trim().is_empty() {
            continue;
        }
        let at = SourceLocation::new(index + 1, 1);

        let (line, rest) = take_field(raw);
        let (column, rest) = take_field(rest);
        let (name, rest) = take_field(rest);

        let line = line.parse::<usize>().map_err(|_| ParseError {
            message: format!("Malformed token line number '{}'", line),
            location: at,
        })?;
        let column = column.parse::<usize>().map_err(|_| ParseError {
            message: format!("Malformed token column '{}'", column),
            location: at,
        })?;

        let payload = if name == "String" {
            let mut content = rest.trim_start().to_string();
            if !content.starts_with('"') {
                return Err(ParseError {
                    message: "Expected '\"' before string token payload".to_string(),
                    location: at,
                });
            }
            while !closes_string(&content) {
                let Some((_, next)) = lines.next() else {
                    return Err(ParseError {
                        message: "Unterminated string token payload".to_string(),
                        location: at,
                    });
                };
                content.push('\n');
                content.push_str(next);
            }
            let content = content.trim_end();
            content[1..content.len() - 1].to_string()
        } else {
            rest.trim().to_string()
        };

        let kind = TokenKind::from_name(name, &payload).ok_or_else(|| ParseError {
            message: format!("Unknown token kind '{}'", name),
            location: at,
        })?;
        check_payload(&kind, &payload, at)?;
        tokens.push(Token::new(kind, SourceLocation::new(line, column)));
    }

    tracing::debug!(tokens = tokens.len(), "read token list");
    Ok(tokens)
}

fn check_payload(kind: &TokenKind, payload: &str, at: SourceLocation) -> Result<(), ParseError> {
    let message = match kind {
        TokenKind::String(_) => return Ok(()),
        TokenKind::Integer(digits) => {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Ok(());
            }
            format!("Malformed integer token payload '{}'", digits)
        }
        TokenKind::Identifier(name) => {
            if is_identifier(name) {
                return Ok(());
            }
            format!("Malformed identifier token payload '{}'", name)
        }
        _ if payload.is_empty() => return Ok(()),
        _ => format!("Unexpected text '{}' after {}", payload, kind.name()),
    };
    Err(ParseError {
        message,
        location: at,
    })
}

/// A single word the lexer would emit as an identifier
fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(is_word_char)
        && !is_keyword(word)
}

/// Split off the next whitespace-delimited field
fn take_field(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], &s[end..]),
        None => (s, ""),
    }
}

/// True once `content` (starting at the opening quote) ends in an
/// unescaped closing quote
fn closes_string(content: &str) -> bool {
    let body = content.trim_end();
    if body.len() < 2 || !body.ends_with('"') {
        return false;
    }
    let backslashes = body[1..body.len() - 1]
        .chars()
        .rev()
        .take_while(|&c| c == '\\')
        .count();
    backslashes % 2 == 0
}
