//! Diagnostic sinks for lexical errors
//!
//! The scanner never prints. Every [`LexError`] is handed to a
//! [`DiagnosticSink`] supplied by the caller, in source order.

use crate::common::LexError;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use std::io::{self, Write};

/// Receiver of lexical diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, error: &LexError);
}

/// Collects errors in memory
impl DiagnosticSink for Vec<LexError> {
    fn report(&mut self, error: &LexError) {
        self.push(error.clone());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&mut self, error: &LexError) {
        (**self).report(error);
    }
}

/// Writes one `[line N] Error: ...` line per error
pub struct PlainEmitter<W: Write> {
    writer: W,
}

impl<W: Write> PlainEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PlainEmitter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> DiagnosticSink for PlainEmitter<W> {
    fn report(&mut self, error: &LexError) {
        // A broken diagnostics stream must not stop the scan
        let _ = writeln!(self.writer, "{error}");
    }
}

/// Renders each error with an annotated source snippet
pub struct PrettyEmitter<W: WriteColor> {
    files: SimpleFiles<String, String>,
    file_id: usize,
    /// Spans are byte offsets into the raw input; they only line up with
    /// the stored text when the input was valid UTF-8
    spans_valid: bool,
    writer: W,
    config: term::Config,
}

impl<W: WriteColor> PrettyEmitter<W> {
    pub fn new(name: impl Into<String>, source: &[u8], writer: W) -> Self {
        let (text, spans_valid) = match std::str::from_utf8(source) {
            Ok(text) => (text.to_owned(), true),
            Err(_) => (String::from_utf8_lossy(source).into_owned(), false),
        };
        let mut files = SimpleFiles::new();
        let file_id = files.add(name.into(), text);
        Self {
            files,
            file_id,
            spans_valid,
            writer,
            config: term::Config::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PrettyEmitter<StandardStream> {
    pub fn stderr(name: impl Into<String>, source: &[u8], color: ColorChoice) -> Self {
        Self::new(name, source, StandardStream::stderr(color))
    }
}

impl<W: WriteColor> DiagnosticSink for PrettyEmitter<W> {
    fn report(&mut self, error: &LexError) {
        let mut diagnostic = Diagnostic::error().with_message(error.to_string());
        if self.spans_valid {
            diagnostic = diagnostic.with_labels(vec![
                Label::primary(self.file_id, error.span()).with_message(error.label()),
            ]);
        } else {
            diagnostic = diagnostic.with_notes(vec![format!(
                "source is not valid UTF-8; byte offset {}",
                error.span().start
            )]);
        }

        let _ = term::emit(&mut self.writer, &self.config, &self.files, &diagnostic);
    }
}
