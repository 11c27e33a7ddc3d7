//! XML format.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <tabulated-function count="2">
//!   <point x="0" y="1"/>
//!   <point x="0.5" y="-2"/>
//! </tabulated-function>
//! ```

pub mod de;
pub mod ser;

use std::io::{BufRead, BufWriter, Write};

use log::debug;
use quick_xml::Writer;
use quick_xml::events::Event;

use self::de::XmlCursor;
use self::ser::{AttrList, XmlEmitter};
use super::{ErrorContext, Result, build};
use crate::tabulated::{TabulatedFunction, TabulatedFunctionFactory};

const ROOT: &str = "tabulated-function";
const POINT: &str = "point";

pub fn write_xml<W: Write>(function: &dyn TabulatedFunction, writer: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(BufWriter::new(writer), b' ', 2);
    let mut emit = XmlEmitter::new(&mut writer);

    let mut root = AttrList::new();
    root.add_usize("count", function.count());

    emit.xml_decl()?;
    emit.start_elem(ROOT, &root)?;
    for point in function.points() {
        let mut attrs = AttrList::new();
        attrs.add_f64("x", point.x).add_f64("y", point.y);
        emit.empty_elem_with_attrs(POINT, &attrs)?;
    }
    emit.end_elem(ROOT)?;

    writer.into_inner().flush()?;
    debug!("Wrote {} samples as XML", function.count());
    Ok(())
}

pub fn read_xml<R: BufRead>(reader: R, factory: &dyn TabulatedFunctionFactory) -> Result<Box<dyn TabulatedFunction>> {
    let mut cursor = XmlCursor::new(reader);

    let count: usize = match cursor.next_event()? {
        Event::Start(e) if e.name().as_ref() == ROOT.as_bytes() => {
            let attrs = cursor.parse_attrs(&e)?;
            attrs.get_req_parsed("count", cursor.context())?
        }
        Event::Empty(e) if e.name().as_ref() == ROOT.as_bytes() => {
            return Err(cursor.error("function has no samples"));
        }
        _ => return Err(cursor.error(format!("expected <{}>", ROOT))),
    };
    cursor.push_path(ROOT);

    let mut x_values = Vec::new();
    let mut y_values = Vec::new();
    loop {
        match cursor.next_event()? {
            Event::Empty(e) if e.name().as_ref() == POINT.as_bytes() => {
                let attrs = cursor.parse_attrs(&e)?;
                x_values.push(attrs.get_req_parsed("x", cursor.context())?);
                y_values.push(attrs.get_req_parsed("y", cursor.context())?);
            }
            Event::End(e) if e.name().as_ref() == ROOT.as_bytes() => break,
            Event::Eof => return Err(cursor.error(format!("unclosed <{}>", ROOT))),
            Event::Start(e) | Event::Empty(e) => {
                return Err(cursor.error(format!(
                    "unexpected element <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                )));
            }
            _ => return Err(cursor.error("unexpected content")),
        }
    }
    cursor.pop_path();

    if x_values.len() != count {
        return Err(cursor.error(format!(
            "declared {} samples, found {}",
            count,
            x_values.len()
        )));
    }

    debug!("Read {} samples from XML", count);
    build(factory, x_values, y_values, ErrorContext::for_format("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::tabulated::{ArrayTabulatedFunction, ArrayTabulatedFunctionFactory, BackendKind, LinkedListTabulatedFunctionFactory};

    fn read(xml: &str) -> Result<Box<dyn TabulatedFunction>> {
        read_xml(xml.as_bytes(), &ArrayTabulatedFunctionFactory)
    }

    #[test]
    fn test_write_layout() {
        let f = ArrayTabulatedFunction::new(vec![0.0, 0.5], vec![1.0, -2.0]).unwrap();
        let mut buf = Vec::new();
        write_xml(&f, &mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<tabulated-function count=\"2\">"));
        assert!(xml.contains("<point x=\"0\" y=\"1\"/>"));
        assert!(xml.contains("<point x=\"0.5\" y=\"-2\"/>"));
        assert!(xml.trim_end().ends_with("</tabulated-function>"));
    }

    #[test]
    fn test_round_trip_into_other_backend() {
        let f = ArrayTabulatedFunction::new(vec![-1.25, 1.0 / 3.0, 8.0], vec![1e-12, 2.0, -7.5]).unwrap();
        let mut buf = Vec::new();
        write_xml(&f, &mut buf).unwrap();

        let g = read_xml(buf.as_slice(), &LinkedListTabulatedFunctionFactory).unwrap();
        assert_eq!(g.kind(), BackendKind::LinkedList);
        assert_eq!(g.to_points(), f.to_points());
    }

    #[test]
    fn test_rejects_malformed_documents() {
        let cases = [
            r#"<function count="2"/>"#,
            r#"<tabulated-function count="2"><point x="0" y="0"/></tabulated-function>"#,
            r#"<tabulated-function count="1"><point x="0" y="0"/><point x="1" y="0"/></tabulated-function>"#,
            r#"<tabulated-function><point x="0" y="0"/><point x="1" y="0"/></tabulated-function>"#,
            r#"<tabulated-function count="2"><point x="0"/><point x="1" y="0"/></tabulated-function>"#,
            r#"<tabulated-function count="2"><point x="0" y="0"/><bogus/></tabulated-function>"#,
            r#"<tabulated-function count="2"><point x="1" y="0"/><point x="0" y="0"/></tabulated-function>"#,
            r#"<tabulated-function count="18446744073709551615"><point x="0" y="0"/></tabulated-function>"#,
            r#"<tabulated-function count="-1"><point x="0" y="0"/></tabulated-function>"#,
        ];
        for xml in cases {
            let result = read(xml);
            assert!(
                matches!(result, Err(CodecError::Format { .. })),
                "expected format error for {}, got {:?}",
                xml,
                result
            );
        }
    }

    #[test]
    fn test_one_sample_round_trip() {
        let mut f = ArrayTabulatedFunction::new(vec![0.0, 0.5], vec![1.0, -2.0]).unwrap();
        f.remove(1).unwrap();
        let mut buf = Vec::new();
        write_xml(&f, &mut buf).unwrap();

        let g = read(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(g.to_points(), f.to_points());
    }

    #[test]
    fn test_rejects_broken_xml() {
        let result = read(r#"<tabulated-function count="1"><point x="0" y="0"/></function>"#);
        assert!(matches!(result, Err(CodecError::Xml(_))));

        assert!(read(r#"<tabulated-function count="2"><point x="0" y="0"/>"#).is_err());
    }
}
