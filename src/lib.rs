//! # md2html
//!
//! A Markdown to HTML converter.
//!
//! The pipeline has two stages: an ordered, longest-match lexer turns the
//! source into a positioned token stream, and an LR(1) parser reduces that
//! stream bottom-up, rendering HTML fragments directly in its reduction
//! actions. [`markdown::convert`] wraps the rendered body in the document
//! skeleton; [`markdown::convert_file`] drives the same pipeline over a
//! `.md` file on disk.

pub mod markdown;

pub use markdown::{convert, convert_file, ConvertError, ProcessingError};
