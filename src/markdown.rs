//! Main module for the Markdown conversion pipeline.

pub mod error;
pub mod grammar;
pub mod html;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod token;

pub use error::{ConvertError, LexError, ParseError};
pub use processor::{convert, convert_file, ProcessingError};
