//! Fixed layout binary format.
//!
//! | Bytes | Content |
//! |-------|---------|
//! | 4 | sample count, signed big-endian |
//! | 16 per sample | `x` then `y`, big-endian IEEE-754 doubles |
//!
//! The encoding depends only on the sample sequence, so equal functions
//! always produce identical bytes.

use std::io::{self, BufReader, BufWriter, Read, Write};

use log::debug;

use super::{CodecError, ErrorContext, Result, build};
use crate::tabulated::{TabulatedFunction, TabulatedFunctionFactory};

const FORMAT: &str = "binary";
const HEADER_LEN: usize = 4;
const SAMPLE_LEN: usize = 16;

pub fn write_binary<W: Write>(function: &dyn TabulatedFunction, writer: W) -> Result<()> {
    let count = i32::try_from(function.count()).map_err(|_| {
        CodecError::format(
            format!("{} samples do not fit the count field", function.count()),
            ErrorContext::for_format(FORMAT),
        )
    })?;

    let mut writer = BufWriter::new(writer);
    writer.write_all(&count.to_be_bytes())?;
    for point in function.points() {
        writer.write_all(&point.x.to_be_bytes())?;
        writer.write_all(&point.y.to_be_bytes())?;
    }
    writer.flush()?;
    debug!("Wrote {} samples as binary", count);
    Ok(())
}

/// Encodes `function` into a fresh byte vector.
pub fn to_bytes(function: &dyn TabulatedFunction) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + SAMPLE_LEN * function.count());
    write_binary(function, &mut bytes)?;
    Ok(bytes)
}

pub fn read_binary<R: Read>(reader: R, factory: &dyn TabulatedFunctionFactory) -> Result<Box<dyn TabulatedFunction>> {
    let mut reader = BufReader::new(reader);

    let count = i32::from_be_bytes(read_array(&mut reader, 0, "count")?);
    let count = usize::try_from(count).map_err(|_| {
        CodecError::format(
            format!("negative sample count {}", count),
            ErrorContext::for_format(FORMAT).with_offset(0),
        )
    })?;

    let mut x_values = Vec::new();
    let mut y_values = Vec::new();
    for index in 0..count {
        let offset = HEADER_LEN + index * SAMPLE_LEN;
        x_values.push(f64::from_be_bytes(read_array(&mut reader, offset, "x")?));
        y_values.push(f64::from_be_bytes(read_array(&mut reader, offset + 8, "y")?));
    }

    debug!("Read {} samples from binary", count);
    build(factory, x_values, y_values, ErrorContext::for_format(FORMAT))
}

fn read_array<R: Read, const N: usize>(reader: &mut R, offset: usize, field: &str) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    match reader.read_exact(&mut bytes) {
        Ok(()) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(CodecError::format(
            "truncated input",
            ErrorContext::for_format(FORMAT)
                .with_offset(offset)
                .with_parsing(field),
        )),
        Err(e) => Err(e.into()),
    }
}
