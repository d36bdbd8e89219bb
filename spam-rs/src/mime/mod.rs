//! MIME message parsing and body extraction
//!
//! This module locates the textual body of a raw email and undoes its
//! transfer encoding so the tokenizer sees readable text.

pub mod parser;
pub mod types;

pub use parser::{decode_quoted_printable, MimeParser};
pub use types::{MimePart, ParsedEmail};
