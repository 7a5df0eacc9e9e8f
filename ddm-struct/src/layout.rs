//! Fixed-column layout of ATOM/HETATM records.
//!
//! Every column offset the reader uses lives here. Ranges are 0-indexed and
//! half-open over the raw line bytes.

use core::ops::Range;

/// A named fixed-width field of an atom record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name used in parse error messages.
    pub name: &'static str,
    /// Byte range within the line.
    pub columns: Range<usize>,
}

impl Field {
    const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self {
            name,
            columns: start..end,
        }
    }

    /// Slice this field out of `line`.
    ///
    /// Returns `None` when the line is too short or the range does not fall
    /// on character boundaries.
    pub fn slice<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.get(self.columns.clone())
    }
}

/// Record-type prefixes that mark an atom entry.
pub const ATOM_RECORDS: [&str; 2] = ["ATOM", "HETATM"];

/// Atom name, compared against [`ALPHA_CARBON`].
pub const ATOM_NAME: Field = Field::new("atom name", 13, 16);
/// Alternate location indicator.
pub const ALT_LOC: Field = Field::new("alt-loc", 16, 17);
/// Chain identifier.
pub const CHAIN_ID: Field = Field::new("chain id", 21, 22);
/// Residue sequence number.
pub const RESIDUE_NUMBER: Field = Field::new("residue number", 22, 26);
/// Chain + residue number, kept verbatim as the residue label.
pub const LABEL: Field = Field::new("label", 21, 26);
/// Orthogonal x coordinate.
pub const X: Field = Field::new("x coordinate", 28, 38);
/// Orthogonal y coordinate.
pub const Y: Field = Field::new("y coordinate", 38, 46);
/// Orthogonal z coordinate.
pub const Z: Field = Field::new("z coordinate", 46, 54);

/// Value of [`ATOM_NAME`] on alpha-carbon lines (trailing space included).
pub const ALPHA_CARBON: &str = "CA ";
/// Alt-loc flag of the rejected conformer.
pub const REJECTED_ALT_LOC: char = 'B';

/// Shortest line that carries all coordinate columns.
pub const MIN_COORDINATE_LINE: usize = 54;
