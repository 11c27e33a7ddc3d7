//! JSON format: `{"x_values": [...], "y_values": [...]}`.
//!
//! JSON has no representation for NaN or the infinities, so functions
//! holding such values cannot be read back.

use std::io::{BufWriter, Read, Write};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{ErrorContext, Result, build};
use crate::tabulated::{TabulatedFunction, TabulatedFunctionFactory};

/// The serialized form of a function's samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
}

impl JsonDocument {
    pub fn from_function(function: &dyn TabulatedFunction) -> Self {
        let (x_values, y_values) = function.points().map(|p| (p.x, p.y)).unzip();
        JsonDocument { x_values, y_values }
    }
}

pub fn write_json<W: Write>(function: &dyn TabulatedFunction, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, &JsonDocument::from_function(function))?;
    writer.flush()?;
    debug!("Wrote {} samples as JSON", function.count());
    Ok(())
}

pub fn read_json<R: Read>(reader: R, factory: &dyn TabulatedFunctionFactory) -> Result<Box<dyn TabulatedFunction>> {
    let document: JsonDocument = serde_json::from_reader(reader)?;
    debug!("Read {} samples from JSON", document.x_values.len());
    build(
        factory,
        document.x_values,
        document.y_values,
        ErrorContext::for_format("json"),
    )
}
