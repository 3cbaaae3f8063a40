//! Token definitions for the Lox lexer

use crate::common::Span;
use logos::{Lexer, Logos};
use std::fmt;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text; empty only for [`TokenKind::Eof`]
    pub lexeme: String,
    pub literal: Option<Literal>,
    /// 1-based line the token starts on
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn eof(line: usize, offset: usize) -> Self {
        Self::new(TokenKind::Eof, String::new(), line, Span::new(offset, offset))
    }
}

/// Renders as `<KIND> <LEXEME> <LITERAL-OR-null>`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

/// Decoded value carried by literal tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Contents between the quotes
    Str(String),
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(s),
            // Integral values keep one decimal place: 42 -> 42.0
            Literal::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.1}"),
            Literal::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Failure reported by the generated lexer for the bytes it just consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenError {
    /// No token starts with this byte
    #[default]
    UnexpectedCharacter,
    /// A `"` with no closing quote before end of input
    UnterminatedString,
}

/// Consume a string body after the opening quote, newlines included
fn string_body(lex: &mut Lexer<'_, TokenKind>) -> Result<(), TokenError> {
    let rest = lex.remainder();
    match rest.iter().position(|&b| b == b'"') {
        Some(close) => {
            lex.bump(close + 1);
            Ok(())
        }
        None => {
            lex.bump(rest.len());
            Err(TokenError::UnterminatedString)
        }
    }
}

/// All token kinds in Lox
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(source = [u8])]
#[logos(error = TokenError)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip line comments
pub enum TokenKind {
    // === Single-character punctuation ===
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,

    // === One or two character operators ===
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // === Literals ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[token("\"", string_body)]
    String,
    #[regex(r"[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]+")]
    Number,

    // === Keywords ===
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    // Special
    Eof,
}

impl TokenKind {
    /// Canonical upper-case name used in token rendering
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
