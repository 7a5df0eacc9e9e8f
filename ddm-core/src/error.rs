//! Structured error types for the ddm tools.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for all ddm operations.
#[derive(Debug, Error)]
pub enum DdmError {
    /// An input coordinate file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse error (malformed fixed-column field, missing record)
    #[error("parse error: {0}")]
    Parse(String),

    /// No CA atom matched the chain / atom-name / alt-loc filter.
    #[error("no CA atoms selected for chain '{chain}' in {origin}")]
    EmptyStructure { origin: String, chain: char },

    /// Two distance matrices cannot be differenced element-wise.
    #[error(
        "shape mismatch: reference matrix is {reference}x{reference}, \
         target matrix is {target}x{target}"
    )]
    ShapeMismatch { reference: usize, target: usize },

    /// A residue number was seen twice while duplicates are rejected.
    #[error("duplicate residue {residue} on chain '{chain}' in {origin}")]
    DuplicateResidue {
        origin: String,
        chain: char,
        residue: usize,
    },

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error while writing an output artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing backend failure
    #[error("render error: {0}")]
    Render(String),
}

impl DdmError {
    /// Wrap an I/O error raised while accessing an input file.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DdmError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the ddm crates.
pub type Result<T> = std::result::Result<T, DdmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_access_names_path() {
        let err = DdmError::file_access(
            "/data/missing.pdb",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/missing.pdb"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn shape_mismatch_message() {
        let err = DdmError::ShapeMismatch {
            reference: 10,
            target: 12,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch: reference matrix is 10x10, target matrix is 12x12"
        );
    }

    #[test]
    fn empty_structure_names_chain() {
        let err = DdmError::EmptyStructure {
            origin: "a.pdb".into(),
            chain: 'B',
        };
        assert_eq!(err.to_string(), "no CA atoms selected for chain 'B' in a.pdb");
    }
}
