//! Access path text codec

mod error;
mod parser;

pub use error::{ParseError, ParseErrorReason};
pub use parser::{canonicalize, parse};
