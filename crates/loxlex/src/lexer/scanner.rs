//! Scanner wrapping the generated lexer
//!
//! [`TokenKind`]'s `Logos` derive does the maximal-munch matching. This
//! layer adds what the token stream needs on top: line numbers, decoded
//! literals, one error per unexpected character and a single trailing
//! `Eof`. Errors never stop the scan.

use super::token::{Literal, Token, TokenError, TokenKind};
use crate::common::{LexError, Span};
use logos::Logos;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Scanner for Lox source
///
/// Yields tokens and errors interleaved in source order. The final item is
/// always `Ok` of an [`TokenKind::Eof`] token, after which the iterator is
/// exhausted.
pub struct Scanner<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    /// 1-based line at byte `line_offset`
    line: usize,
    line_offset: usize,
    at_eof: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source bytes
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            line: 1,
            line_offset: 0,
            at_eof: false,
        }
    }

    /// Produce the next token or error, `None` once `Eof` has been returned
    pub fn next_item(&mut self) -> Option<Result<Token, LexError>> {
        if self.at_eof {
            return None;
        }

        let item = match self.inner.next() {
            Some(Ok(kind)) => Ok(self.token(kind)),
            Some(Err(TokenError::UnexpectedCharacter)) => Err(self.unexpected_character()),
            Some(Err(TokenError::UnterminatedString)) => {
                let span = self.span();
                // Reported where input ran out, not where the quote opened
                let line = self.line_at(span.end);
                Err(LexError::unterminated_string(line, span))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                let line = self.line_at(len);
                trace!(line, "end of input");
                return Some(Ok(Token::eof(line, len)));
            }
        };

        match &item {
            Ok(token) => trace!(kind = %token.kind, line = token.line, "token"),
            Err(err) => debug!(%err, "lexical error"),
        }
        Some(item)
    }

    fn span(&self) -> Span {
        let range = self.inner.span();
        Span::new(range.start, range.end)
    }

    /// Line number of `offset`; offsets must be requested in increasing order
    fn line_at(&mut self, offset: usize) -> usize {
        let skipped = &self.inner.source()[self.line_offset..offset];
        self.line += skipped.iter().filter(|&&b| b == b'\n').count();
        self.line_offset = offset;
        self.line
    }

    fn token(&mut self, kind: TokenKind) -> Token {
        let span = self.span();
        let line = self.line_at(span.start);
        let slice = self.inner.slice();
        let token = Token::new(kind, String::from_utf8_lossy(slice), line, span);

        match kind {
            TokenKind::String => {
                let contents = String::from_utf8_lossy(&slice[1..slice.len() - 1]);
                token.with_literal(Literal::Str(contents.into_owned()))
            }
            TokenKind::Number => {
                // Digit runs always parse; overly long ones saturate to infinity
                let value = token.lexeme.parse::<f64>().unwrap_or(f64::INFINITY);
                token.with_literal(Literal::Number(value))
            }
            _ => token,
        }
    }

    /// Error for the byte the lexer rejected, widened to the whole UTF-8
    /// scalar it starts so that `£` is one error rather than two
    fn unexpected_character(&mut self) -> LexError {
        let span = self.span();
        let character = leading_char(&self.inner.source()[span.start..]);
        let width = character.map_or(1, char::len_utf8);
        let end = span.end.max(span.start + width);
        if end > span.end {
            self.inner.bump(end - span.end);
        }

        let line = self.line_at(span.start);
        LexError::unexpected_character(
            line,
            character.unwrap_or(char::REPLACEMENT_CHARACTER),
            Span::new(span.start, end),
        )
    }
}

/// First scalar of `bytes`, if they start with valid UTF-8
fn leading_char(bytes: &[u8]) -> Option<char> {
    let prefix = &bytes[..bytes.len().min(4)];
    let valid = match std::str::from_utf8(prefix) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&prefix[..err.valid_up_to()]).ok()?,
    };
    valid.chars().next()
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item()
    }
}

impl FusedIterator for Scanner<'_> {}

/// Tokens and errors from a complete scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

/// Scan the whole buffer at once
///
/// Total: every input produces at least the `Eof` token, and anomalies are
/// reported in `errors` rather than as a failure of the call.
pub fn scan(source: &[u8]) -> ScanOutput {
    let mut output = ScanOutput::default();
    for item in Scanner::new(source) {
        match item {
            Ok(token) => output.tokens.push(token),
            Err(err) => output.errors.push(err),
        }
    }
    debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "scan finished"
    );
    output
}
