//! Tokenize driver: stream tokens to a writer, diagnostics to a sink

use crate::common::DriverResult;
use crate::diagnostics::DiagnosticSink;
use crate::stream::{self, ScanOutcome, StreamConfig};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// Scan `source`, writing one rendered token per line to `out` as each
/// token arrives
///
/// Diagnostics go to `sink` on the scanner thread. Returns the outcome and
/// the sink once the stream has been fully written.
pub fn tokenize<W, S>(
    source: impl Into<Arc<[u8]>>,
    out: &mut W,
    sink: S,
    config: &StreamConfig,
) -> DriverResult<(ScanOutcome, S)>
where
    W: Write,
    S: DiagnosticSink + Send + 'static,
{
    let (tokens, completion) = stream::run_with_config(source, sink, config);

    let mut written = 0usize;
    for token in tokens {
        writeln!(out, "{token}")?;
        written += 1;
    }
    out.flush()?;

    debug!(tokens = written, "token stream drained");
    completion.wait()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::LexError;
    use crate::diagnostics::PlainEmitter;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_writes_tokens_and_diagnostics() {
        let mut out = Vec::new();
        let sink = PlainEmitter::new(Vec::new());
        let (outcome, sink) =
            tokenize(&b"({*\t%})"[..], &mut out, sink, &StreamConfig::default()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LEFT_PAREN ( null\nLEFT_BRACE { null\nSTAR * null\nRIGHT_BRACE } null\nRIGHT_PAREN ) null\nEOF  null\n"
        );
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "[line 1] Error: Unexpected character: %\n"
        );
        assert_eq!(outcome, ScanOutcome::Failure { errors: 1 });
    }

    #[test]
    fn test_tokenize_propagates_write_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = tokenize(&b"+-"[..], &mut Broken, Vec::<LexError>::new(), &StreamConfig::default());
        assert!(matches!(result, Err(crate::DriverError::Io(_))));
    }
}
