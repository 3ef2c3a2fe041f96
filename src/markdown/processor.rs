//! Conversion entry points.
//!
//!     `convert` is the pure core: Markdown text in, complete HTML document
//!     out, no I/O and no logging. `convert_file` is the file-level wrapper
//!     the binary drives: it validates the extension, reads the source,
//!     converts, and writes the sibling `.html` file.

use crate::markdown::error::ConvertError;
use crate::markdown::html;
use crate::markdown::lexer::Lexer;
use crate::markdown::parser;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Convert a Markdown document to a complete HTML document.
pub fn convert(markdown: &str) -> Result<String, ConvertError> {
    let body = parser::parse(Lexer::new(markdown))?;
    Ok(html::assemble(&body))
}

/// Failures of the file-level wrapper.
#[derive(Debug)]
pub enum ProcessingError {
    /// The input path does not end in `.md`.
    NotMarkdown(PathBuf),
    /// Reading the input or writing the output failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The content itself failed to convert.
    Convert(ConvertError),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::NotMarkdown(path) => {
                write!(f, "{} is not a markdown (.md) file", path.display())
            }
            ProcessingError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            ProcessingError::Convert(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessingError::NotMarkdown(_) => None,
            ProcessingError::Io { source, .. } => Some(source),
            ProcessingError::Convert(e) => Some(e),
        }
    }
}

impl From<ConvertError> for ProcessingError {
    fn from(e: ConvertError) -> Self {
        ProcessingError::Convert(e)
    }
}

/// Convert a `.md` file on disk, writing the sibling `.html` file.
/// Returns the path written.
pub fn convert_file(input: &Path) -> Result<PathBuf, ProcessingError> {
    if input.extension().and_then(|e| e.to_str()) != Some("md") {
        return Err(ProcessingError::NotMarkdown(input.to_path_buf()));
    }
    let source = fs::read_to_string(input).map_err(|source| ProcessingError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let rendered = convert(&source)?;
    let output = input.with_extension("html");
    fs::write(&output, rendered).map_err(|source| ProcessingError::Io {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_wraps_body_in_skeleton() {
        assert_eq!(
            convert("# Title\n").unwrap(),
            "<!DOCTYPE html><html><body><h1>Title </h1></body></html>"
        );
    }

    #[test]
    fn test_convert_propagates_parse_errors() {
        assert!(matches!(
            convert("*oops"),
            Err(ConvertError::Parse(_))
        ));
    }

    #[test]
    fn test_convert_file_rejects_non_markdown_extension() {
        let err = convert_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, ProcessingError::NotMarkdown(_)));
    }

    #[test]
    fn test_convert_file_reports_missing_input() {
        let err = convert_file(Path::new("definitely-missing.md")).unwrap_err();
        assert!(matches!(err, ProcessingError::Io { .. }));
    }

    #[test]
    fn test_convert_file_writes_sibling_html() {
        let dir = std::env::temp_dir().join("md2html-processor-test");
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("doc.md");
        fs::write(&input, "**bold**").unwrap();
        let output = convert_file(&input).unwrap();
        assert_eq!(output, dir.join("doc.html"));
        let rendered = fs::read_to_string(&output).unwrap();
        assert_eq!(
            rendered,
            "<!DOCTYPE html><html><body><strong>bold</strong> </body></html>"
        );
        fs::remove_dir_all(&dir).unwrap();
    }
}
