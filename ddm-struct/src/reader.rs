//! CA coordinate reader for fixed-column ATOM/HETATM records.
//!
//! Selects alpha-carbon lines of one chain (skipping the `B` alternate
//! conformer) and folds them into a [`CoordinateTable`] and [`LabelTable`]
//! indexed by residue number.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use ddm_core::{DdmError, Result, Summarizable};
use log::{debug, warn};

use crate::layout::{self, Field};
use crate::types::{AtomRecord, ChainStructure, CoordinateTable, LabelTable, Point3D};

/// What to do when the same residue number is selected twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Overwrite the earlier position and label.
    #[default]
    LastWriteWins,
    /// Fail with [`DdmError::DuplicateResidue`].
    Reject,
}

/// Reads the CA trace of a single chain.
#[derive(Debug, Clone)]
pub struct StructureReader {
    chain: char,
    duplicates: DuplicatePolicy,
}

impl StructureReader {
    /// Reader for `chain` with last-write-wins duplicate handling.
    pub fn new(chain: char) -> Self {
        Self {
            chain,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Set the duplicate residue policy.
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// The chain this reader selects.
    pub fn chain(&self) -> char {
        self.chain
    }

    /// Read a coordinate file from disk.
    ///
    /// # Errors
    ///
    /// [`DdmError::FileAccess`] if the file cannot be opened or read,
    /// [`DdmError::Parse`] for a malformed selected line, and
    /// [`DdmError::EmptyStructure`] if no line was selected.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<ChainStructure> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DdmError::file_access(path, e))?;
        let origin = path.display().to_string();
        self.read(BufReader::new(file), &origin)
            .map_err(|e| match e {
                DdmError::Io(source) => DdmError::file_access(path, source),
                other => other,
            })
    }

    /// Parse coordinate text held in memory.
    pub fn parse_str(&self, text: &str) -> Result<ChainStructure> {
        self.read(text.as_bytes(), "<memory>")
    }

    /// Parse coordinate text from any buffered reader. `origin` names the
    /// source in error messages.
    pub fn read<R: BufRead>(&self, reader: R, origin: &str) -> Result<ChainStructure> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let line = line.map_err(|e| {
                if e.kind() == ErrorKind::InvalidData {
                    DdmError::Parse(format!("{origin}:{line_number}: line is not valid UTF-8"))
                } else {
                    DdmError::Io(e)
                }
            })?;
            if let Some(record) = self.select(&line, line_number, origin)? {
                records.push(record);
            }
        }
        let structure = self.assemble(records, origin)?;
        debug!("{}", structure.summary());
        Ok(structure)
    }

    /// Decide whether a line is a CA atom of this chain and extract it.
    fn select(&self, line: &str, line_number: usize, origin: &str) -> Result<Option<AtomRecord>> {
        if !layout::ATOM_RECORDS.iter().any(|r| line.starts_with(r)) {
            return Ok(None);
        }
        if layout::ATOM_NAME.slice(line) != Some(layout::ALPHA_CARBON) {
            return Ok(None);
        }
        if first_char(&layout::ALT_LOC, line) == Some(layout::REJECTED_ALT_LOC) {
            return Ok(None);
        }
        if first_char(&layout::CHAIN_ID, line) != Some(self.chain) {
            return Ok(None);
        }

        // A selected record must carry every coordinate column.
        if line.len() < layout::MIN_COORDINATE_LINE {
            return Err(DdmError::Parse(format!(
                "{origin}:{line_number}: CA record too short ({} chars): {line:?}",
                line.len()
            )));
        }

        let residue_field = slice_field(&layout::RESIDUE_NUMBER, line, line_number, origin)?;
        let residue = residue_field
            .trim()
            .parse::<i64>()
            .map_err(|e| bad_field(&layout::RESIDUE_NUMBER, e, line, line_number, origin))?;
        // Slot 0 is the sentinel; tag residues numbered 0 or below are dropped.
        if residue < 1 {
            warn!(
                "{origin}:{line_number}: skipping CA of residue {residue} on chain {}",
                self.chain
            );
            return Ok(None);
        }

        let x = coordinate(&layout::X, line, line_number, origin)?;
        let y = coordinate(&layout::Y, line, line_number, origin)?;
        let z = coordinate(&layout::Z, line, line_number, origin)?;
        let label = slice_field(&layout::LABEL, line, line_number, origin)?.to_string();

        Ok(Some(AtomRecord {
            residue: residue as usize,
            position: Point3D::new(x, y, z),
            chain: self.chain,
            label,
            line_number,
        }))
    }

    /// Fold selected records into residue-indexed tables.
    fn assemble(&self, records: Vec<AtomRecord>, origin: &str) -> Result<ChainStructure> {
        let max_residue = records
            .iter()
            .map(|r| r.residue)
            .max()
            .ok_or_else(|| DdmError::EmptyStructure {
                origin: origin.to_string(),
                chain: self.chain,
            })?;

        let mut coords = CoordinateTable::with_max_residue(max_residue);
        let mut labels = LabelTable::with_max_residue(max_residue);

        for record in records {
            if coords.set(record.residue, record.position).is_some() {
                match self.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(DdmError::DuplicateResidue {
                            origin: origin.to_string(),
                            chain: self.chain,
                            residue: record.residue,
                        });
                    }
                    DuplicatePolicy::LastWriteWins => warn!(
                        "{origin}:{}: residue {} of chain {} seen again, keeping the later CA",
                        record.line_number, record.residue, record.chain
                    ),
                }
            }
            labels.set(record.residue, record.label);
        }

        Ok(ChainStructure {
            origin: origin.to_string(),
            chain: self.chain,
            coords,
            labels,
        })
    }
}

/// Read the CA trace of `chain` from a coordinate file.
pub fn read_structure(
    path: impl AsRef<Path>,
    chain: char,
) -> Result<(CoordinateTable, LabelTable)> {
    StructureReader::new(chain)
        .read_path(path)
        .map(ChainStructure::into_parts)
}

/// Parse the CA trace of `chain` from coordinate text.
pub fn parse_structure(text: &str, chain: char) -> Result<(CoordinateTable, LabelTable)> {
    StructureReader::new(chain)
        .parse_str(text)
        .map(ChainStructure::into_parts)
}

fn first_char(field: &Field, line: &str) -> Option<char> {
    field.slice(line).and_then(|s| s.chars().next())
}

fn slice_field<'a>(
    field: &Field,
    line: &'a str,
    line_number: usize,
    origin: &str,
) -> Result<&'a str> {
    field
        .slice(line)
        .ok_or_else(|| bad_field(field, "columns not addressable", line, line_number, origin))
}

fn coordinate(field: &Field, line: &str, line_number: usize, origin: &str) -> Result<f64> {
    slice_field(field, line, line_number, origin)?
        .trim()
        .parse::<f64>()
        .map_err(|e| bad_field(field, e, line, line_number, origin))
}

fn bad_field(
    field: &Field,
    detail: impl Display,
    line: &str,
    line_number: usize,
    origin: &str,
) -> DdmError {
    DdmError::Parse(format!(
        "{origin}:{line_number}: bad {} ({detail}): {line:?}",
        field.name
    ))
}
