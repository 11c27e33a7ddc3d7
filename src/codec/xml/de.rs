//! Reading helpers for quick-xml.
//!
//! - `Attrs`: decoded attribute map with a typed getter
//! - `XmlCursor`: event reader with path tracking for error context

use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::codec::{CodecError, ErrorContext, Result};

const FORMAT: &str = "xml";

/// A parsed attribute map that owns decoded string values.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    map: HashMap<String, String>,
    element_name: String,
}

impl Attrs {
    /// Decodes and unescapes every attribute of `start` once.
    pub fn from_start<R: BufRead>(start: &BytesStart<'_>, reader: &Reader<R>) -> Result<Self> {
        let element_name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut map = HashMap::new();

        for attr_result in start.attributes() {
            let attr = attr_result.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.decode_and_unescape_value(reader)?.to_string();
            map.insert(key, value);
        }

        Ok(Self { map, element_name })
    }

    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    /// A required attribute parsed with `FromStr`.
    pub fn get_req_parsed<T: FromStr>(&self, key: &str, context: ErrorContext) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        let Some(s) = self.get_opt(key) else {
            return Err(CodecError::format(
                format!("missing attribute {}@{}", self.element_name, key),
                context,
            ));
        };
        s.parse::<T>().map_err(|e| {
            CodecError::format(
                format!("invalid value for {}@{}: {} (got '{}')", self.element_name, key, e, s),
                context,
            )
        })
    }
}

/// A quick-xml reader that tracks the element path for error messages.
pub struct XmlCursor<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    path: Vec<String>,
}

impl<R: BufRead> XmlCursor<R> {
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn push_path(&mut self, element: &str) {
        self.path.push(element.to_string());
    }

    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    fn path_str(&self) -> String {
        self.path.join("/")
    }

    /// Context pointing at the current reader position and path.
    pub fn context(&self) -> ErrorContext {
        let context = ErrorContext::for_format(FORMAT).with_offset(self.reader.buffer_position());
        if self.path.is_empty() {
            context
        } else {
            context.with_parsing(self.path_str())
        }
    }

    pub fn error(&self, message: impl Into<String>) -> CodecError {
        CodecError::format(message, self.context())
    }

    /// Reads the next event that carries structure.
    ///
    /// Declarations, comments, processing instructions and doctypes are
    /// skipped.
    pub fn next_event(&mut self) -> Result<Event<'static>> {
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            match event {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                other => return Ok(other.into_owned()),
            }
        }
    }

    pub fn parse_attrs(&self, start: &BytesStart<'_>) -> Result<Attrs> {
        Attrs::from_start(start, &self.reader)
    }
}
