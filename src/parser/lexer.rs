//! Lexer (tokenizer) for the mini language
//!
//! Produces [`Token`]s one at a time from a source string. Line comments,
//! block comments and whitespace are skipped between tokens. The lexer
//! remembers the kind of the last token it emitted: a `-` directly after an
//! integer or identifier is binary subtraction, anywhere else it is negation.

use super::ast::SourceLocation;
use super::token::{Token, TokenKind};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Reserved words. Built once and only ever read.
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    map.insert("if", TokenKind::KeywordIf);
    map.insert("else", TokenKind::KeywordElse);
    map.insert("while", TokenKind::KeywordWhile);
    map.insert("print", TokenKind::KeywordPrint);
    map.insert("putc", TokenKind::KeywordPutc);
    map
});

/// First character of an identifier or integer: any letter, ASCII digit or `_`
pub(crate) fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '_'
}

/// Letters and digits of any script, and `_`
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub(crate) fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains_key(word)
}

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unexpected character: '{0}'")]
    UnexpectedCharacter(char),

    #[error("Expected '{0}{0}'")]
    IncompleteOperator(char),

    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Unterminated block comment")]
    UnterminatedComment,

    #[error("Unterminated character literal")]
    UnterminatedCharLiteral,

    #[error("Empty character literal")]
    EmptyCharLiteral,

    #[error("Unknown escape sequence: \\{0}")]
    InvalidEscape(char),

    #[error("Invalid integer literal: {0}")]
    InvalidNumber(String),
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at line {}, column {}: {kind}", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Lexer for mini-language source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    last_kind: Option<TokenKind>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            last_kind: None,
        }
    }

    /// Tokenize the entire input, terminal `End_of_input` token included
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_end_of_input();
            tokens.push(token);
            if done {
                break;
            }
        }

        tracing::debug!(tokens = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Scan the next token.
    ///
    /// Once the input is exhausted every call returns `End_of_input` at the
    /// same position.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let kind = match self.advance() {
            None => TokenKind::EndOfInput,
            Some(ch) => self.scan(ch, loc)?,
        };

        tracing::trace!(line = loc.line, column = loc.column, kind = kind.name(), "token");
        self.last_kind = Some(kind.clone());
        Ok(Token::new(kind, loc))
    }

    /// Dispatch on the first character of a token (already consumed)
    fn scan(&mut self, ch: char, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let kind = match ch {
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '+' => TokenKind::OpAdd,
            '*' => TokenKind::OpMultiply,
            '%' => TokenKind::OpMod,
            // Comments were skipped already, so this is division
            '/' => TokenKind::OpDivide,

            '=' => self.follow('=', TokenKind::OpEqual, TokenKind::OpAssign),
            '<' => self.follow('=', TokenKind::OpLessEqual, TokenKind::OpLess),
            '>' => self.follow('=', TokenKind::OpGreaterEqual, TokenKind::OpGreater),
            '!' => self.follow('=', TokenKind::OpNotEqual, TokenKind::OpNot),

            '-' => {
                if self.last_kind.as_ref().is_some_and(TokenKind::ends_operand) {
                    TokenKind::OpSubtract
                } else {
                    TokenKind::OpNegate
                }
            }

            '&' => self.doubled('&', TokenKind::OpAnd, loc)?,
            '|' => self.doubled('|', TokenKind::OpOr, loc)?,

            '\'' => self.char_literal(loc)?,
            '"' => self.string_literal(loc)?,

            c if is_word_start(c) => self.identifier_or_integer(c, loc)?,

            _ => {
                return Err(LexError::new(LexErrorKind::UnexpectedCharacter(ch), loc));
            }
        };

        Ok(kind)
    }

    /// Two-character operator if the next character is `expect`, otherwise
    /// the single-character form
    fn follow(&mut self, expect: char, if_yes: TokenKind, if_no: TokenKind) -> TokenKind {
        if self.peek() == Some(expect) {
            self.advance();
            if_yes
        } else {
            if_no
        }
    }

    /// `&&` and `||`: the character must repeat
    fn doubled(
        &mut self,
        ch: char,
        kind: TokenKind,
        loc: SourceLocation,
    ) -> Result<TokenKind, LexError> {
        if self.peek() == Some(ch) {
            self.advance();
            Ok(kind)
        } else {
            Err(LexError::new(LexErrorKind::IncompleteOperator(ch), loc))
        }
    }

    /// Character literal: yields an integer token holding the character code
    fn char_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let ch = match self.advance() {
            None => {
                return Err(LexError::new(LexErrorKind::UnterminatedCharLiteral, loc));
            }
            Some('\'') => {
                return Err(LexError::new(LexErrorKind::EmptyCharLiteral, loc));
            }
            Some(ch) => ch,
        };

        let code = if ch == '\\' {
            match self.advance() {
                Some('n') => 10,
                Some('\\') => 92,
                Some(other) => {
                    return Err(LexError::new(LexErrorKind::InvalidEscape(other), loc));
                }
                None => {
                    return Err(LexError::new(LexErrorKind::UnterminatedCharLiteral, loc));
                }
            }
        } else {
            u32::from(ch)
        };

        if self.advance() != Some('\'') {
            return Err(LexError::new(LexErrorKind::UnterminatedCharLiteral, loc));
        }

        Ok(TokenKind::Integer(code.to_string()))
    }

    /// String literal: content is kept verbatim, newlines included.
    ///
    /// A backslash keeps the next character as-is, so `\"` does not close
    /// the string.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(TokenKind::String(string)),
                '\\' => {
                    string.push(ch);
                    match self.advance() {
                        Some(escaped) => string.push(escaped),
                        None => break,
                    }
                }
                _ => string.push(ch),
            }
        }

        Err(LexError::new(LexErrorKind::UnterminatedString, loc))
    }

    /// Maximal run of letters, digits and `_`, classified afterwards
    fn identifier_or_integer(
        &mut self,
        first_char: char,
        loc: SourceLocation,
    ) -> Result<TokenKind, LexError> {
        let mut text = String::new();
        text.push(first_char);

        while let Some(ch) = self.peek() {
            if is_word_char(ch) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if text.chars().all(|c| c.is_ascii_digit()) {
            return Ok(TokenKind::Integer(text));
        }

        if first_char.is_ascii_digit() {
            return Err(LexError::new(LexErrorKind::InvalidNumber(text), loc));
        }

        Ok(KEYWORDS
            .get(text.as_str())
            .cloned()
            .unwrap_or(TokenKind::Identifier(text)))
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new(LexErrorKind::UnterminatedComment, start_loc))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Lex `source` completely and render every token in the interchange format
pub fn lex_to_text(source: &str) -> Result<String, LexError> {
    let tokens = Lexer::new(source).tokenize()?;
    Ok(tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_err(source: &str) -> LexError {
        Lexer::new(source).tokenize().unwrap_err()
    }

    #[test]
    fn test_simple_statement() {
        assert_eq!(
            kinds("count = 1;"),
            vec![
                TokenKind::Identifier("count".into()),
                TokenKind::OpAssign,
                TokenKind::Integer("1".into()),
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("< <= > >= == != = ! && || * / % +"),
            vec![
                TokenKind::OpLess,
                TokenKind::OpLessEqual,
                TokenKind::OpGreater,
                TokenKind::OpGreaterEqual,
                TokenKind::OpEqual,
                TokenKind::OpNotEqual,
                TokenKind::OpAssign,
                TokenKind::OpNot,
                TokenKind::OpAnd,
                TokenKind::OpOr,
                TokenKind::OpMultiply,
                TokenKind::OpDivide,
                TokenKind::OpMod,
                TokenKind::OpAdd,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_minus_depends_on_previous_token() {
        let infix = kinds("x - 1");
        assert_eq!(infix[1], TokenKind::OpSubtract);

        let after_int = kinds("3 - 1");
        assert_eq!(after_int[1], TokenKind::OpSubtract);

        let prefix = kinds("-x");
        assert_eq!(prefix[0], TokenKind::OpNegate);

        let after_op = kinds("a = b * -c");
        assert_eq!(after_op[4], TokenKind::OpNegate);

        let double = kinds("a - -b");
        assert_eq!(double[1], TokenKind::OpSubtract);
        assert_eq!(double[2], TokenKind::OpNegate);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if else while print putc iffy"),
            vec![
                TokenKind::KeywordIf,
                TokenKind::KeywordElse,
                TokenKind::KeywordWhile,
                TokenKind::KeywordPrint,
                TokenKind::KeywordPutc,
                TokenKind::Identifier("iffy".into()),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(kinds(r"'\n'")[0], TokenKind::Integer("10".into()));
        assert_eq!(kinds(r"'\\'")[0], TokenKind::Integer("92".into()));
        assert_eq!(kinds("'b'")[0], TokenKind::Integer("98".into()));
        assert_eq!(kinds("' '")[0], TokenKind::Integer("32".into()));
    }

    #[test]
    fn test_char_literal_errors() {
        assert_eq!(lex_err(r"'\t'").kind, LexErrorKind::InvalidEscape('t'));
        assert_eq!(lex_err("''").kind, LexErrorKind::EmptyCharLiteral);
        assert_eq!(lex_err("'ab'").kind, LexErrorKind::UnterminatedCharLiteral);
        assert_eq!(lex_err("'a").kind, LexErrorKind::UnterminatedCharLiteral);
    }

    #[test]
    fn test_string_literal_is_verbatim() {
        assert_eq!(
            kinds("\"Anime Rocks\n\"")[0],
            TokenKind::String("Anime Rocks\n".into())
        );
        assert_eq!(
            kinds(r#""is a prime\n""#)[0],
            TokenKind::String(r"is a prime\n".into())
        );
        assert_eq!(
            kinds(r#""say \"hi\"""#)[0],
            TokenKind::String(r#"say \"hi\""#.into())
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex_err("x = \"oops");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_comments_are_transparent() {
        let plain = kinds("a = 1; b = 2;");
        let commented = kinds("a = 1; // set a\n/* and\n b */ b = 2;");
        assert_eq!(plain, commented);
    }

    #[test]
    fn test_block_comment_advances_lines() {
        let tokens = Lexer::new("/* one\ntwo\n*/ x").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(3, 4));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex_err("x /* never closed");
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("while (n)\n  k = 10;\n").tokenize().unwrap();
        let locs: Vec<_> = tokens.iter().map(|t| (t.location.line, t.location.column)).collect();
        assert_eq!(
            locs,
            vec![(1, 1), (1, 7), (1, 8), (1, 9), (2, 3), (2, 5), (2, 7), (2, 9), (3, 1)]
        );
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut lexer = Lexer::new("x\n");
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(_)));

        let first = lexer.next_token().unwrap();
        assert!(first.is_end_of_input());
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap(), first);
        }
        assert_eq!(first.location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_digit_led_identifier_rejected() {
        let err = lex_err("x = 1a;");
        assert_eq!(err.kind, LexErrorKind::InvalidNumber("1a".into()));
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_unicode_letters_in_identifiers() {
        assert_eq!(
            kinds("café = 1;"),
            vec![
                TokenKind::Identifier("café".into()),
                TokenKind::OpAssign,
                TokenKind::Integer("1".into()),
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(kinds("_ñ2")[0], TokenKind::Identifier("_ñ2".into()));
    }

    #[test]
    fn test_form_feed_is_whitespace() {
        let tokens = Lexer::new("x\u{c}=\u{a0}1;").tokenize().unwrap();
        assert_eq!(tokens[1].kind, TokenKind::OpAssign);
        assert_eq!(tokens[1].location, SourceLocation::new(1, 3));
        assert_eq!(tokens[2].location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_single_ampersand_rejected() {
        assert_eq!(lex_err("a & b").kind, LexErrorKind::IncompleteOperator('&'));
        assert_eq!(lex_err("a | b").kind, LexErrorKind::IncompleteOperator('|'));
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex_err("x = 1;\n  y = #;");
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('#'));
        assert_eq!(err.location, SourceLocation::new(2, 7));
        assert_eq!(
            err.to_string(),
            "Lexer error at line 2, column 7: Unexpected character: '#'"
        );
    }

    #[test]
    fn test_lex_to_text() {
        let text = lex_to_text("putc(65);").unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "    1      1 Keyword_putc   ");
        assert_eq!(lines[2], "    1      6 Integer            65");
        assert!(lines[5].starts_with("    1     10 End_of_input"));
    }
}
