//! Unit-cell parameters from CRYST1 records.
//!
//! Standalone helper; the distance-difference path never calls it.

use std::path::Path;

use ddm_core::{DdmError, Result, Summarizable};

/// Crystallographic unit cell: edge lengths in Angstroms, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Summarizable for UnitCell {
    fn summary(&self) -> String {
        format!(
            "a={:.3} b={:.3} c={:.3} alpha={:.2} beta={:.2} gamma={:.2}",
            self.a, self.b, self.c, self.alpha, self.beta, self.gamma
        )
    }
}

/// Extract the unit cell from coordinate text. When several CRYST1 records
/// are present the last one wins.
///
/// # Errors
///
/// [`DdmError::Parse`] if there is no CRYST1 record or one of its six
/// parameters is missing or malformed.
pub fn unit_cell(text: &str) -> Result<UnitCell> {
    let mut cell = None;
    for (idx, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("CRYST1") {
            continue;
        }
        let mut params = [0.0f64; 6];
        for (slot, name) in params
            .iter_mut()
            .zip(["a", "b", "c", "alpha", "beta", "gamma"])
        {
            let token = tokens.next().ok_or_else(|| {
                DdmError::Parse(format!("line {}: CRYST1 record lacks {name}", idx + 1))
            })?;
            *slot = token.parse::<f64>().map_err(|e| {
                DdmError::Parse(format!("line {}: bad CRYST1 {name} {token:?}: {e}", idx + 1))
            })?;
        }
        let [a, b, c, alpha, beta, gamma] = params;
        cell = Some(UnitCell {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        });
    }
    cell.ok_or_else(|| DdmError::Parse("no CRYST1 record found".into()))
}

/// Read the unit cell of a coordinate file from disk.
pub fn read_unit_cell(path: impl AsRef<Path>) -> Result<UnitCell> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| DdmError::file_access(path, e))?;
    unit_cell(&contents).map_err(|e| match e {
        DdmError::Parse(msg) => DdmError::Parse(format!("{}: {msg}", path.display())),
        other => other,
    })
}
