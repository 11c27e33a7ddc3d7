//! Whole-object snapshots.
//!
//! A snapshot records the backend kind and the decorator chain next to the
//! samples, so reading it back reproduces the same concrete structure:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "backend": "linked_list",
//!   "policies": ["unmodifiable", "strict"],
//!   "points": [{"x": 0.0, "y": 1.0}, {"x": 1.0, "y": 3.0}]
//! }
//! ```
//!
//! Policies are listed outermost first. Snapshots from another format
//! version are rejected rather than migrated.

use std::io::{BufWriter, Read, Write};

use log::debug;
use serde::{Deserialize, Serialize};

use super::{CodecError, ErrorContext, Result};
use crate::{
    decorators::{StrictTabulatedFunction, UnmodifiableTabulatedFunction},
    tabulated::{BackendKind, Point, Policy, TabulatedFunction},
};

/// Version written into every snapshot and required when reading.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub backend: String,
    pub policies: Vec<String>,
    pub points: Vec<Point>,
}

impl Snapshot {
    pub fn capture(function: &dyn TabulatedFunction) -> Self {
        Snapshot {
            format_version: SNAPSHOT_VERSION,
            backend: function.kind().name().to_string(),
            policies: function
                .policies()
                .into_iter()
                .map(|policy| policy.name().to_string())
                .collect(),
            points: function.to_points(),
        }
    }

    /// Rebuilds the function this snapshot was captured from.
    pub fn restore(self) -> Result<Box<dyn TabulatedFunction>> {
        if self.format_version != SNAPSHOT_VERSION {
            return Err(CodecError::Version {
                found: self.format_version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let kind = BackendKind::from_name(&self.backend)
            .ok_or_else(|| CodecError::ClassResolution(self.backend.clone()))?;
        let policies = self
            .policies
            .iter()
            .map(|name| Policy::from_name(name).ok_or_else(|| CodecError::ClassResolution(name.clone())))
            .collect::<Result<Vec<_>>>()?;

        let (x_values, y_values) = self.points.iter().map(|p| (p.x, p.y)).unzip();
        let mut function = kind.factory().restore(x_values, y_values).map_err(|e| {
            CodecError::format(e.to_string(), ErrorContext::for_format("snapshot"))
        })?;

        for policy in policies.into_iter().rev() {
            function = match policy {
                Policy::Strict => StrictTabulatedFunction::wrap(function),
                Policy::Unmodifiable => UnmodifiableTabulatedFunction::wrap(function),
            };
        }
        Ok(function)
    }
}

pub fn write_snapshot<W: Write>(function: &dyn TabulatedFunction, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, &Snapshot::capture(function))?;
    writer.flush()?;
    debug!(
        "Wrote snapshot of a {} function with policies {:?}",
        function.kind(),
        function.policies()
    );
    Ok(())
}

pub fn read_snapshot<R: Read>(reader: R) -> Result<Box<dyn TabulatedFunction>> {
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    debug!(
        "Read snapshot version {} of a {} function",
        snapshot.format_version, snapshot.backend
    );
    snapshot.restore()
}
