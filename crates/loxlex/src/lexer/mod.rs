//! Lexer module for tokenizing Lox source

mod scanner;
mod token;

pub use scanner::{scan, ScanOutput, Scanner};
pub use token::{Literal, Token, TokenKind};
