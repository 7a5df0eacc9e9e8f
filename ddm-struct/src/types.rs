//! Core types for residue-indexed CA coordinate tables.

use ddm_core::{Annotated, DdmError, Result, Summarizable};

/// A point in 3D Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Component along one Cartesian axis.
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// A Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// One selected CA line of a coordinate file.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Residue sequence number (always >= 1).
    pub residue: usize,
    /// Position in Angstroms.
    pub position: Point3D,
    /// Chain identifier.
    pub chain: char,
    /// Chain + residue number columns, verbatim.
    pub label: String,
    /// 1-based line number in the source text.
    pub line_number: usize,
}

/// CA positions indexed by residue number.
///
/// Slot 0 is a sentinel and never holds a residue. Residue numbers that were
/// not observed are `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateTable {
    positions: Vec<Option<Point3D>>,
}

impl CoordinateTable {
    /// Table with `max_residue + 1` empty slots.
    pub fn with_max_residue(max_residue: usize) -> Self {
        Self {
            positions: vec![None; max_residue + 1],
        }
    }

    /// Build from `(residue, position)` pairs; later pairs overwrite earlier
    /// ones with the same residue number.
    ///
    /// Residue 0 is rejected because slot 0 is the sentinel.
    pub fn from_residues(residues: &[(usize, Point3D)]) -> Result<Self> {
        let max = residues.iter().map(|(r, _)| *r).max().ok_or_else(|| {
            DdmError::InvalidInput("coordinate table needs at least one residue".into())
        })?;
        let mut table = Self::with_max_residue(max);
        for &(residue, position) in residues {
            if residue == 0 {
                return Err(DdmError::InvalidInput(
                    "residue 0 is reserved for the sentinel slot".into(),
                ));
            }
            table.set(residue, position);
        }
        Ok(table)
    }

    /// Store a position, returning the one it replaced.
    pub(crate) fn set(&mut self, residue: usize, position: Point3D) -> Option<Point3D> {
        self.positions[residue].replace(position)
    }

    /// Number of slots, sentinel included (max residue number + 1).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the table has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest residue number the table can hold.
    pub fn max_residue(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// Position of a residue, `None` when missing or out of range.
    pub fn get(&self, residue: usize) -> Option<Point3D> {
        self.positions.get(residue).copied().flatten()
    }

    /// Whether a residue has a position.
    pub fn contains(&self, residue: usize) -> bool {
        self.get(residue).is_some()
    }

    /// Number of residues with a position.
    pub fn observed_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// Slots in residue order, sentinel first.
    pub fn iter(&self) -> impl Iterator<Item = Option<Point3D>> + '_ {
        self.positions.iter().copied()
    }

    /// One axis as a dense column, missing residues as NaN.
    pub fn axis_values(&self, axis: Axis) -> Vec<f64> {
        self.positions
            .iter()
            .map(|p| p.map_or(f64::NAN, |p| p.component(axis)))
            .collect()
    }
}

impl Summarizable for CoordinateTable {
    fn summary(&self) -> String {
        format!(
            "CoordinateTable: {} CA positions over residues 1..={}",
            self.observed_count(),
            self.max_residue(),
        )
    }
}

/// Residue labels in lockstep with a [`CoordinateTable`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelTable {
    labels: Vec<Option<String>>,
}

impl LabelTable {
    /// Table with `max_residue + 1` empty slots.
    pub fn with_max_residue(max_residue: usize) -> Self {
        Self {
            labels: vec![None; max_residue + 1],
        }
    }

    pub(crate) fn set(&mut self, residue: usize, label: String) {
        self.labels[residue] = Some(label);
    }

    /// Number of slots, sentinel included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of a residue, `None` when missing or out of range.
    pub fn get(&self, residue: usize) -> Option<&str> {
        self.labels.get(residue).and_then(|l| l.as_deref())
    }

    /// Residue numbers labelled in exactly one of the two tables.
    pub fn unmatched(&self, other: &LabelTable) -> Vec<usize> {
        let n = self.len().max(other.len());
        (1..n)
            .filter(|&i| self.get(i).is_some() != other.get(i).is_some())
            .collect()
    }
}

/// The CA trace of one chain as read from a coordinate file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainStructure {
    /// File path or `<memory>`.
    pub origin: String,
    /// Chain identifier that was selected.
    pub chain: char,
    /// CA positions by residue number.
    pub coords: CoordinateTable,
    /// Residue labels by residue number.
    pub labels: LabelTable,
}

impl ChainStructure {
    /// Split into the coordinate and label tables.
    pub fn into_parts(self) -> (CoordinateTable, LabelTable) {
        (self.coords, self.labels)
    }
}

impl Annotated for ChainStructure {
    fn name(&self) -> &str {
        &self.origin
    }
}

impl Summarizable for ChainStructure {
    fn summary(&self) -> String {
        format!(
            "{} chain {}: {} CA atoms, max residue {}",
            self.origin,
            self.chain,
            self.coords.observed_count(),
            self.coords.max_residue(),
        )
    }
}
