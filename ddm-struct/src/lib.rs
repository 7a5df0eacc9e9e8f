//! CA distance-difference matrices for pairs of protein conformations.
//!
//! - **Coordinate reading** — CA traces by residue number with [`reader::read_structure`]
//! - **Distance matrices** — All-pairs CA distances in [`distance`]
//! - **Differences** — Target minus reference with [`distance::difference`]
//! - **Masking** — Sentinel neutralization and triangular display masks in [`mask`]
//! - **Comparison** — Reference-vs-targets orchestration in [`pipeline`]
//! - **Unit cell** — Standalone CRYST1 helper in [`cell`]
//!
//! # Quick start
//!
//! ```
//! use ddm_struct::{compare, CompareOptions, StructureReader};
//!
//! let apo = "\
//! ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
//! ATOM      2  CA  GLY A   2       1.000   0.000   0.000  1.00  0.00           C
//! ";
//! let holo = "\
//! ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
//! ATOM      2  CA  GLY A   2       3.000   0.000   0.000  1.00  0.00           C
//! ";
//!
//! let reader = StructureReader::new('A');
//! let a = reader.parse_str(apo).unwrap();
//! let b = reader.parse_str(holo).unwrap();
//! let ddm = compare(&a, &b, &CompareOptions::default()).unwrap();
//! assert_eq!(ddm.value(2, 1), Some(2.0));
//! ```

pub mod cell;
pub mod distance;
pub mod layout;
pub mod mask;
pub mod pipeline;
pub mod reader;
pub mod types;

pub use cell::{read_unit_cell, unit_cell, UnitCell};
pub use distance::{difference, pairwise_distances, DifferenceMatrix, DistanceMatrix};
pub use mask::{
    mask, Cell, DifferenceStats, MaskedDifference, ResiduePairChange, Triangle, TriangleMask,
};
pub use pipeline::{compare, compare_batch, BatchOutcome, CompareOptions, Renderer, Target};
pub use reader::{parse_structure, read_structure, DuplicatePolicy, StructureReader};
pub use types::{AtomRecord, ChainStructure, CoordinateTable, LabelTable, Point3D};
