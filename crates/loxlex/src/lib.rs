//! loxlex - streaming lexical scanner for Lox source text
//!
//! This library turns a raw byte buffer into an ordered stream of typed
//! tokens, reporting unrecognized input as non-fatal diagnostics.
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **Lexer** (`lexer/`): Logos-derived token kinds and the scanner that adds lines, literals and `Eof`
//! - **Stream** (`stream/`): Producer thread + channel hand-off of tokens, one-shot outcome
//! - **Diagnostics** (`diagnostics/`): Sinks that render lexical errors (plain or annotated)
//! - **Driver** (`driver/`): Wires a source buffer, a token writer and a sink together
//! - **Common** (`common/`): Shared infrastructure (errors, spans)

pub mod common;
pub mod lexer;
pub mod diagnostics;
pub mod stream;
pub mod driver;

// Re-exports for convenience
pub use common::{DriverError, DriverResult, LexError, Span};
pub use diagnostics::{DiagnosticSink, PlainEmitter, PrettyEmitter};
pub use driver::tokenize;
pub use lexer::{scan, Literal, ScanOutput, Scanner, Token, TokenKind};
pub use stream::{run, run_with_config, Completion, ScanOutcome, StreamConfig, TokenStream};
