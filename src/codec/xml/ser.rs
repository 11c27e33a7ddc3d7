//! Writing helpers for quick-xml.
//!
//! - `AttrList`: attribute builder that owns formatted values
//! - `XmlEmitter`: element writing helpers over a quick-xml `Writer`

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::codec::Result;

/// A list of attributes with owned values.
///
/// Owning the formatted strings keeps them alive until the element is
/// written.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Adds an `f64` attribute in shortest round-trip form.
    pub fn add_f64(&mut self, key: &str, value: f64) -> &mut Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn add_usize(&mut self, key: &str, value: usize) -> &mut Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn apply_to(&self, start: &mut BytesStart<'_>) {
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
    }
}

/// Element writing helpers over a borrowed quick-xml writer.
pub struct XmlEmitter<'a, W: Write> {
    writer: &'a mut Writer<W>,
}

impl<'a, W: Write> XmlEmitter<'a, W> {
    pub fn new(writer: &'a mut Writer<W>) -> Self {
        Self { writer }
    }

    /// Writes `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn xml_decl(&mut self) -> Result<()> {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        self.writer.write_event(Event::Decl(decl))?;
        Ok(())
    }

    /// Writes `<name attr="value">`.
    pub fn start_elem(&mut self, name: &str, attrs: &AttrList) -> Result<()> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Writes `</name>`.
    pub fn end_elem(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes `<name attr="value"/>`.
    pub fn empty_elem_with_attrs(&mut self, name: &str, attrs: &AttrList) -> Result<()> {
        let mut start = BytesStart::new(name);
        attrs.apply_to(&mut start);
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }
}
