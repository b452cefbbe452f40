//! Per-file error taxonomy for SVG normalization.

use thiserror::Error;

/// Errors that abort normalization of a single file.
///
/// Every variant is fatal for its file only: the batch runner records the
/// message in the failure list and moves on to the next file.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Input is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax inside a start tag.
    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid entity or character reference in an attribute value.
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// A `d` attribute could not be decoded into path segments.
    #[error("invalid path data: {0}")]
    PathData(#[from] svgtypes::Error),

    /// Reading the input or writing the output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_data_error_message() {
        let err = svgtypes::PathParser::from("Q")
            .next()
            .unwrap()
            .unwrap_err();
        let display = format!("{}", NormalizeError::PathData(err));
        assert!(display.starts_with("invalid path data:"));
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.svg");
        let display = format!("{}", NormalizeError::Io(io));
        assert!(display.contains("missing.svg"));
    }
}
