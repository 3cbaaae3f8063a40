//! Error types

use super::Span;
use thiserror::Error;

/// Lexical anomaly found while scanning
///
/// These never abort a scan. The `Display` form is the plain
/// diagnostic line written by [`PlainEmitter`](crate::PlainEmitter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("[line {line}] Error: Unexpected character: {character}")]
    UnexpectedCharacter {
        line: usize,
        character: char,
        span: Span,
    },

    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize, span: Span },
}

impl LexError {
    pub fn unexpected_character(line: usize, character: char, span: Span) -> Self {
        Self::UnexpectedCharacter {
            line,
            character,
            span,
        }
    }

    pub fn unterminated_string(line: usize, span: Span) -> Self {
        Self::UnterminatedString { line, span }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. } | Self::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { span, .. } | Self::UnterminatedString { span, .. } => *span,
        }
    }

    /// Short label used by the annotated renderer
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter { .. } => "unexpected character",
            Self::UnterminatedString { .. } => "string is never closed",
        }
    }
}

/// Failure of the machinery around a scan (not of the scan itself)
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scanner thread panicked")]
    ScannerPanicked,
}

pub type DriverResult<T> = Result<T, DriverError>;
