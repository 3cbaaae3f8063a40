//! Streaming scan on a producer thread
//!
//! [`run`] starts the scanner on its own thread and returns the two halves
//! the consumer needs:
//! - a [`TokenStream`] yielding tokens in source order as they are produced
//! - a [`Completion`] that resolves exactly once, after the stream closes,
//!   to the aggregate [`ScanOutcome`]
//!
//! Errors never travel on the token stream; they are handed to the
//! [`DiagnosticSink`] on the producer thread as they are found.
//!
//! The default channel is a rendezvous: the producer blocks on every token
//! until the consumer takes it. Drain the stream (through `Eof`) before
//! calling [`Completion::wait`].

use crate::common::{DriverError, DriverResult};
use crate::diagnostics::DiagnosticSink;
use crate::lexer::{Scanner, Token};
use crossbeam::channel::{self, Receiver, Sender};
use std::iter::FusedIterator;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Exit status conventionally used for lexical errors
pub const LEXICAL_ERROR_EXIT_CODE: u8 = 65;

/// Aggregate result of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Success,
    Failure { errors: usize },
}

impl ScanOutcome {
    fn from_error_count(errors: usize) -> Self {
        if errors == 0 {
            Self::Success
        } else {
            Self::Failure { errors }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// `0` on success, [`LEXICAL_ERROR_EXIT_CODE`] on failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure { .. } => LEXICAL_ERROR_EXIT_CODE,
        }
    }
}

/// Configuration for the token channel
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Tokens the producer may run ahead of the consumer; `0` is a rendezvous
    pub capacity: usize,
}

/// Consumer half: tokens in scan order, ending with `Eof`
pub struct TokenStream {
    tokens: Receiver<Token>,
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokens.recv().ok()
    }
}

impl FusedIterator for TokenStream {}

/// One-shot completion signal, carrying the outcome and the sink back
pub struct Completion<S> {
    outcome: Receiver<ScanOutcome>,
    handle: JoinHandle<S>,
}

impl<S> Completion<S> {
    /// Whether the outcome has been published
    ///
    /// Never true while undelivered tokens remain on a live stream.
    pub fn is_ready(&self) -> bool {
        !self.outcome.is_empty()
    }

    /// Block until the producer finishes
    ///
    /// Blocks forever if the consumer still holds an undrained
    /// [`TokenStream`] that the producer is waiting to hand a token to.
    pub fn wait(self) -> DriverResult<(ScanOutcome, S)> {
        let outcome = self.outcome.recv();
        let sink = self
            .handle
            .join()
            .map_err(|_| DriverError::ScannerPanicked)?;
        let outcome = outcome.map_err(|_| DriverError::ScannerPanicked)?;
        Ok((outcome, sink))
    }
}

/// Start scanning `source` with a rendezvous token channel
pub fn run<S>(source: impl Into<Arc<[u8]>>, sink: S) -> (TokenStream, Completion<S>)
where
    S: DiagnosticSink + Send + 'static,
{
    run_with_config(source, sink, &StreamConfig::default())
}

/// Start scanning `source` with an explicit channel configuration
pub fn run_with_config<S>(
    source: impl Into<Arc<[u8]>>,
    sink: S,
    config: &StreamConfig,
) -> (TokenStream, Completion<S>)
where
    S: DiagnosticSink + Send + 'static,
{
    let source: Arc<[u8]> = source.into();
    let (token_tx, token_rx) = channel::bounded(config.capacity);
    let (outcome_tx, outcome_rx) = channel::bounded(1);

    debug!(bytes = source.len(), capacity = config.capacity, "starting scanner thread");
    let handle = thread::spawn(move || produce(&source, sink, token_tx, outcome_tx));

    (
        TokenStream { tokens: token_rx },
        Completion {
            outcome: outcome_rx,
            handle,
        },
    )
}

/// Producer body: scan to the end, then close the stream, then publish
fn produce<S: DiagnosticSink>(
    source: &[u8],
    mut sink: S,
    tokens: Sender<Token>,
    outcome: Sender<ScanOutcome>,
) -> S {
    let mut errors = 0;
    let mut delivering = true;

    for item in Scanner::new(source) {
        match item {
            Ok(token) => {
                if delivering && tokens.send(token).is_err() {
                    // Consumer hung up; finish the scan so diagnostics and
                    // the outcome stay complete
                    debug!("token stream dropped by consumer");
                    delivering = false;
                }
            }
            Err(err) => {
                errors += 1;
                sink.report(&err);
            }
        }
    }

    drop(tokens);
    let result = ScanOutcome::from_error_count(errors);
    debug!(?result, "scanner thread finished");
    // Fails only if the Completion was dropped; nobody is left to tell
    let _ = outcome.send(result);
    sink
}
