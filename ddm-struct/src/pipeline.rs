//! Reference-vs-target comparison and the renderer seam.

use std::path::{Path, PathBuf};

use ddm_core::{Annotated, Result, Summarizable};
use log::{debug, info, warn};

use crate::distance::{difference, pairwise_distances};
use crate::mask::{mask, MaskedDifference, Triangle};
use crate::reader::{DuplicatePolicy, StructureReader};
use crate::types::ChainStructure;

/// Anything that turns a masked difference matrix into an output artifact.
pub trait Renderer {
    /// Write `masked` to `output`.
    fn render(&self, masked: &MaskedDifference, output: &Path) -> Result<()>;
}

/// Parameters of a single comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Visible triangle of the output matrix.
    pub triangle: Triangle,
    /// Color-scale bound, symmetric around zero.
    pub max_difference: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            triangle: Triangle::Lower,
            max_difference: 1.0,
        }
    }
}

/// Compute the masked distance-difference matrix `target - reference`.
///
/// # Errors
///
/// [`ddm_core::DdmError::ShapeMismatch`] if the two structures span
/// different residue ranges, [`ddm_core::DdmError::InvalidInput`] for a bad
/// color-scale bound.
pub fn compare(
    reference: &ChainStructure,
    target: &ChainStructure,
    options: &CompareOptions,
) -> Result<MaskedDifference> {
    let unmatched = reference.labels.unmatched(&target.labels);
    if !unmatched.is_empty() {
        warn!("{}", unmatched_message(reference, target, &unmatched));
    }

    let reference_distances = pairwise_distances(&reference.coords);
    let target_distances = pairwise_distances(&target.coords);
    debug!("reference: {}", reference_distances.summary());
    debug!("target: {}", target_distances.summary());

    let diff = difference(&reference_distances, &target_distances)?;
    mask(
        diff,
        options.triangle,
        options.max_difference,
        reference.labels.clone(),
    )
}

fn unmatched_message(
    reference: &ChainStructure,
    target: &ChainStructure,
    unmatched: &[usize],
) -> String {
    format!(
        "{} residue(s) observed in only one of {} (chain {}) and {} (chain {}): {:?}",
        unmatched.len(),
        reference.name(),
        reference.chain,
        target.name(),
        target.chain,
        unmatched
    )
}

/// One structure to compare against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Coordinate file.
    pub path: PathBuf,
    /// Chain to select.
    pub chain: char,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, chain: char) -> Self {
        Self {
            path: path.into(),
            chain,
        }
    }
}

/// Result of comparing one target.
#[derive(Debug)]
pub struct BatchOutcome {
    pub target: Target,
    pub result: Result<MaskedDifference>,
}

/// Compare every target against `reference`, in order.
///
/// Each target is read and compared independently; a failing target is
/// reported in its outcome and does not stop the rest of the batch.
pub fn compare_batch(
    reference: &ChainStructure,
    targets: &[Target],
    duplicates: DuplicatePolicy,
    options: &CompareOptions,
) -> Vec<BatchOutcome> {
    targets
        .iter()
        .map(|target| {
            let result = StructureReader::new(target.chain)
                .with_duplicates(duplicates)
                .read_path(&target.path)
                .and_then(|structure| {
                    info!("{}", structure.summary());
                    compare(reference, &structure, options)
                });
            BatchOutcome {
                target: target.clone(),
                result,
            }
        })
        .collect()
}
