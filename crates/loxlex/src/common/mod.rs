//! Common infrastructure shared across the lexer, stream and driver

mod error;
mod span;

pub use error::{DriverError, DriverResult, LexError};
pub use span::Span;
