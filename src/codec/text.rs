//! Line oriented text format.
//!
//! ```text
//! 3
//! 1 10
//! 1.5 15
//! 2 20
//! ```
//!
//! The first non-blank line holds the sample count; every following
//! non-blank line holds one `x y` pair separated by whitespace. Values are
//! written in the shortest form that parses back to the same `f64`.

use std::io::{BufRead, BufWriter, Write};

use log::debug;

use super::{CodecError, ErrorContext, Result, build};
use crate::tabulated::{TabulatedFunction, TabulatedFunctionFactory};

const FORMAT: &str = "text";

pub fn write_text<W: Write>(function: &dyn TabulatedFunction, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", function.count())?;
    for point in function.points() {
        writeln!(writer, "{} {}", point.x, point.y)?;
    }
    writer.flush()?;
    debug!("Wrote {} samples as text", function.count());
    Ok(())
}

pub fn read_text<R: BufRead>(
    reader: R,
    factory: &dyn TabulatedFunctionFactory,
) -> Result<Box<dyn TabulatedFunction>> {
    let mut expected: Option<usize> = None;
    let mut x_values = Vec::new();
    let mut y_values = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        let context = || ErrorContext::for_format(FORMAT).with_line(line_number);
        match expected {
            None => {
                let count = content.parse::<usize>().map_err(|e| {
                    CodecError::format(
                        format!("invalid sample count '{}': {}", content, e),
                        context().with_parsing("count"),
                    )
                })?;
                expected = Some(count);
            }
            Some(count) => {
                if x_values.len() == count {
                    return Err(CodecError::format(
                        format!("more samples than the declared {}", count),
                        context(),
                    ));
                }
                let (x, y) = parse_pair(content).map_err(|message| {
                    CodecError::format(message, context().with_parsing("sample"))
                })?;
                x_values.push(x);
                y_values.push(y);
            }
        }
    }

    let count = expected
        .ok_or_else(|| CodecError::format("missing sample count", ErrorContext::for_format(FORMAT)))?;
    if x_values.len() != count {
        return Err(CodecError::format(
            format!("declared {} samples, found {}", count, x_values.len()),
            ErrorContext::for_format(FORMAT),
        ));
    }

    debug!("Read {} samples from text", count);
    build(factory, x_values, y_values, ErrorContext::for_format(FORMAT))
}

fn parse_pair(content: &str) -> std::result::Result<(f64, f64), String> {
    let mut fields = content.split_whitespace();
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected 'x y', got '{}'", content));
    };
    let parse = |field: &str| {
        field
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{}': {}", field, e))
    };
    Ok((parse(x)?, parse(y)?))
}
