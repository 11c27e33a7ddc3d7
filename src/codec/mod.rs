//! # Persistence codecs
//!
//! Encodings of a tabulated function's sample sequence:
//!
//! - [`text`]: a count line followed by one `x y` line per sample
//! - [`binary`]: big-endian `i32` count followed by `f64` pairs, byte-exact
//! - [`xml`]: `<tabulated-function>` documents (feature `xml`)
//! - [`json`]: `{"x_values": [...], "y_values": [...]}`
//! - [`snapshot`]: versioned JSON carrying the backend kind and decorator chain
//!
//! Readers of the first four formats build their result through a caller
//! supplied [`TabulatedFunctionFactory`](crate::TabulatedFunctionFactory) and
//! only restore the samples. The snapshot format restores the concrete
//! backend and its policies as well.
//!
//! ```rust
//! use tabfn::{codec, ArrayTabulatedFunction, LinkedListTabulatedFunctionFactory, TabulatedFunction};
//!
//! let f = ArrayTabulatedFunction::new(vec![0.0, 0.5], vec![1.0, -2.0]).unwrap();
//!
//! let mut buf = Vec::new();
//! codec::text::write_text(&f, &mut buf).unwrap();
//! assert_eq!(String::from_utf8(buf.clone()).unwrap(), "2\n0 1\n0.5 -2\n");
//!
//! let g = codec::text::read_text(buf.as_slice(), &LinkedListTabulatedFunctionFactory).unwrap();
//! assert_eq!(g.to_points(), f.to_points());
//! ```

pub mod binary;
pub mod json;
pub mod snapshot;
pub mod text;
#[cfg(feature = "xml")]
pub mod xml;

use std::fmt;

use thiserror::Error;

use crate::tabulated::{TabulatedFunction, TabulatedFunctionFactory};

/// Errors raised while encoding or decoding tabulated functions.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying reader or writer failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that does not follow the format, or decodes to an invalid function.
    #[error("Format error{context}: {message}")]
    Format {
        message: String,
        context: ErrorContext,
    },

    /// Malformed XML structure.
    #[cfg(feature = "xml")]
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed or mistyped JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot names a backend or policy this build does not know.
    #[error("Cannot resolve '{0}' to a known backend or policy")]
    ClassResolution(String),

    /// A snapshot written by an incompatible format version.
    #[error("Unsupported snapshot version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },
}

impl CodecError {
    pub fn format(message: impl Into<String>, context: ErrorContext) -> Self {
        CodecError::Format {
            message: message.into(),
            context,
        }
    }
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Where in the input a format error was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// Name of the format being decoded.
    pub format: Option<&'static str>,
    /// 1-based line number (line oriented formats).
    pub line: Option<usize>,
    /// Byte offset into the input.
    pub offset: Option<usize>,
    /// What was being decoded.
    pub parsing: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_format(format: &'static str) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_parsing<S: Into<String>>(mut self, parsing: S) -> Self {
        self.parsing = Some(parsing.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(format) = self.format {
            parts.push(format!(" in {} input", format));
        }
        if let Some(line) = self.line {
            parts.push(format!(" at line {}", line));
        }
        if let Some(offset) = self.offset {
            parts.push(format!(" at byte {}", offset));
        }
        if let Some(ref parsing) = self.parsing {
            parts.push(format!(" while parsing {}", parsing));
        }

        write!(f, "{}", parts.join(","))
    }
}

/// Restores a decoded function, reporting rejected samples as a format error.
pub(crate) fn build(
    factory: &dyn TabulatedFunctionFactory,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    context: ErrorContext,
) -> Result<Box<dyn TabulatedFunction>> {
    factory
        .restore(x_values, y_values)
        .map_err(|e| CodecError::format(e.to_string(), context))
}
