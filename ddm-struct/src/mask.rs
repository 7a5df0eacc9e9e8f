//! Triangular masking of difference matrices.
//!
//! A distance-difference matrix is symmetric, so only one strict triangle is
//! shown. [`MaskedDifference`] is what renderers consume.

use ddm_core::{DdmError, Result, Summarizable};

use crate::distance::DifferenceMatrix;
use crate::types::LabelTable;

/// Which strict triangle stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Triangle {
    /// Cells below the diagonal (row > column).
    #[default]
    Lower,
    /// Cells above the diagonal (row < column).
    Upper,
}

impl Triangle {
    /// Whether cell (i, j) lies in this strict triangle.
    pub fn contains(self, i: usize, j: usize) -> bool {
        match self {
            Triangle::Lower => i > j,
            Triangle::Upper => i < j,
        }
    }
}

/// Boolean mask over an n×n matrix; `true` hides a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangleMask {
    size: usize,
    triangle: Triangle,
    hidden: Vec<bool>,
}

impl TriangleMask {
    /// Mask that hides the diagonal and the triangle opposite `triangle`.
    pub fn new(size: usize, triangle: Triangle) -> Self {
        let hidden = (0..size * size)
            .map(|k| !triangle.contains(k / size, k % size))
            .collect();
        Self {
            size,
            triangle,
            hidden,
        }
    }

    /// Whether cell (i, j) is hidden.
    pub fn is_hidden(&self, i: usize, j: usize) -> bool {
        self.hidden[i * self.size + j]
    }

    /// The visible triangle.
    pub fn triangle(&self) -> Triangle {
        self.triangle
    }

    /// Number of visible cells.
    pub fn visible_count(&self) -> usize {
        self.hidden.iter().filter(|h| !**h).count()
    }
}

/// One visible cell of a masked difference matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub delta: f64,
}

/// A sentinel-neutralized difference matrix with its display mask, ready to
/// be handed to a renderer.
#[derive(Debug, Clone)]
pub struct MaskedDifference {
    matrix: DifferenceMatrix,
    mask: TriangleMask,
    max_difference: f64,
    labels: LabelTable,
}

impl MaskedDifference {
    /// Number of rows (= columns), sentinel included.
    pub fn size(&self) -> usize {
        self.matrix.size
    }

    /// The full (unmasked) matrix.
    pub fn matrix(&self) -> &DifferenceMatrix {
        &self.matrix
    }

    /// The display mask.
    pub fn mask(&self) -> &TriangleMask {
        &self.mask
    }

    /// Color-scale bound; the scale runs from `-max` to `+max`.
    pub fn max_difference(&self) -> f64 {
        self.max_difference
    }

    /// Residue labels of the reference structure.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Value at (i, j), or `None` if the cell is masked out.
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        if self.mask.is_hidden(i, j) {
            None
        } else {
            Some(self.matrix.get(i, j))
        }
    }

    /// Visible cells in row-major order.
    pub fn visible_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| {
                self.value(row, col).map(|delta| Cell { row, col, delta })
            })
        })
    }

    /// Summary statistics over the visible cells.
    pub fn stats(&self) -> DifferenceStats {
        let mut stats = DifferenceStats {
            visible: 0,
            undefined: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean_abs: 0.0,
        };
        let mut abs_sum = 0.0;
        for cell in self.visible_cells() {
            stats.visible += 1;
            if cell.delta.is_nan() {
                stats.undefined += 1;
                continue;
            }
            stats.min = stats.min.min(cell.delta);
            stats.max = stats.max.max(cell.delta);
            abs_sum += cell.delta.abs();
        }
        let defined = stats.visible - stats.undefined;
        if defined > 0 {
            stats.mean_abs = abs_sum / defined as f64;
        } else {
            stats.min = f64::NAN;
            stats.max = f64::NAN;
        }
        stats
    }

    /// The `k` visible residue pairs with the largest absolute change,
    /// excluding the sentinel and undefined cells.
    pub fn largest_changes(&self, k: usize) -> Vec<ResiduePairChange> {
        let mut cells: Vec<Cell> = self
            .visible_cells()
            .filter(|c| c.row != 0 && c.col != 0 && !c.delta.is_nan())
            .collect();
        cells.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));
        cells
            .into_iter()
            .take(k)
            .map(|c| ResiduePairChange {
                first: c.row.min(c.col),
                second: c.row.max(c.col),
                first_label: self.labels.get(c.row.min(c.col)).map(str::to_string),
                second_label: self.labels.get(c.row.max(c.col)).map(str::to_string),
                delta: c.delta,
            })
            .collect()
    }
}

impl Summarizable for MaskedDifference {
    fn summary(&self) -> String {
        let s = self.stats();
        format!(
            "{}x{} difference matrix, {} visible cells ({} undefined), range [{:.3}, {:.3}], mean |Δ| {:.3}",
            self.size(),
            self.size(),
            s.visible,
            s.undefined,
            s.min,
            s.max,
            s.mean_abs,
        )
    }
}

/// Statistics over the visible cells of a [`MaskedDifference`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceStats {
    /// Visible cells.
    pub visible: usize,
    /// Visible cells that are NaN (a residue missing in either structure).
    pub undefined: usize,
    /// Smallest defined change (NaN if none).
    pub min: f64,
    /// Largest defined change (NaN if none).
    pub max: f64,
    /// Mean absolute defined change.
    pub mean_abs: f64,
}

/// A residue pair and its distance change.
#[derive(Debug, Clone, PartialEq)]
pub struct ResiduePairChange {
    pub first: usize,
    pub second: usize,
    pub first_label: Option<String>,
    pub second_label: Option<String>,
    pub delta: f64,
}

/// Neutralize the sentinel row/column of `diff` and attach a triangular mask.
///
/// # Errors
///
/// [`DdmError::InvalidInput`] if `max_difference` is not finite and positive,
/// or if `labels` was built for a different residue range.
pub fn mask(
    mut diff: DifferenceMatrix,
    triangle: Triangle,
    max_difference: f64,
    labels: LabelTable,
) -> Result<MaskedDifference> {
    if !(max_difference.is_finite() && max_difference > 0.0) {
        return Err(DdmError::InvalidInput(format!(
            "max difference must be a positive number, got {max_difference}"
        )));
    }
    if !labels.is_empty() && labels.len() != diff.size {
        return Err(DdmError::InvalidInput(format!(
            "label table has {} slots but the matrix is {}x{}",
            labels.len(),
            diff.size,
            diff.size
        )));
    }

    diff.neutralize_sentinel();
    let mask = TriangleMask::new(diff.size, triangle);

    Ok(MaskedDifference {
        matrix: diff,
        mask,
        max_difference,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{difference, pairwise_distances};
    use crate::types::{CoordinateTable, Point3D};

    fn scenario() -> DifferenceMatrix {
        let a = CoordinateTable::from_residues(&[
            (1, Point3D::new(0.0, 0.0, 0.0)),
            (2, Point3D::new(1.0, 0.0, 0.0)),
            (3, Point3D::new(0.0, 1.0, 0.0)),
        ])
        .unwrap();
        let b = CoordinateTable::from_residues(&[
            (1, Point3D::new(0.0, 0.0, 0.0)),
            (2, Point3D::new(2.0, 0.0, 0.0)),
            (3, Point3D::new(0.0, 2.0, 0.0)),
        ])
        .unwrap();
        difference(&pairwise_distances(&a), &pairwise_distances(&b)).unwrap()
    }

    #[test]
    fn lower_mask_hides_diagonal_and_upper() {
        let m = TriangleMask::new(4, Triangle::Lower);
        for i in 0..4 {
            assert!(m.is_hidden(i, i));
            for j in 0..4 {
                assert_eq!(m.is_hidden(i, j), i <= j);
            }
        }
        assert_eq!(m.visible_count(), 6);
    }

    #[test]
    fn upper_mask_is_transpose() {
        let lower = TriangleMask::new(5, Triangle::Lower);
        let upper = TriangleMask::new(5, Triangle::Upper);
        for i in 0..5 {
            for j in 0..5 {
                if i != j {
                    assert_ne!(lower.is_hidden(i, j), upper.is_hidden(i, j));
                    assert_eq!(lower.is_hidden(i, j), upper.is_hidden(j, i));
                } else {
                    assert!(upper.is_hidden(i, j));
                }
            }
        }
    }

    #[test]
    fn sentinel_is_zero_after_masking() {
        let m = mask(scenario(), Triangle::Lower, 1.0, LabelTable::default()).unwrap();
        for k in 0..m.size() {
            assert_eq!(m.matrix().get(0, k), 0.0);
            assert_eq!(m.matrix().get(k, 0), 0.0);
        }
        assert_eq!(m.value(1, 0), Some(0.0));
        assert_eq!(m.value(0, 1), None);
    }

    #[test]
    fn visible_cells_follow_triangle() {
        let m = mask(scenario(), Triangle::Lower, 1.0, LabelTable::default()).unwrap();
        let cells: Vec<Cell> = m.visible_cells().collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| c.row > c.col));
        let c21 = cells.iter().find(|c| c.row == 2 && c.col == 1).unwrap();
        assert!((c21.delta - 1.0).abs() < 1e-10);
    }

    #[test]
    fn stats_over_visible_cells() {
        let m = mask(scenario(), Triangle::Upper, 2.0, LabelTable::default()).unwrap();
        let s = m.stats();
        assert_eq!(s.visible, 6);
        assert_eq!(s.undefined, 0);
        assert_eq!(s.min, 0.0);
        assert!((s.max - 2f64.sqrt()).abs() < 1e-10);
        let expected_mean = (1.0 + 1.0 + 2f64.sqrt()) / 6.0;
        assert!((s.mean_abs - expected_mean).abs() < 1e-10);
    }

    #[test]
    fn largest_changes_skip_sentinel() {
        let mut labels = LabelTable::with_max_residue(3);
        labels.set(1, "A   1".into());
        labels.set(2, "A   2".into());
        labels.set(3, "A   3".into());
        let m = mask(scenario(), Triangle::Lower, 1.0, labels).unwrap();
        let top = m.largest_changes(2);
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].first, top[0].second), (2, 3));
        assert_eq!(top[0].first_label.as_deref(), Some("A   2"));
        assert_eq!(top[0].second_label.as_deref(), Some("A   3"));
        assert!((top[0].delta - 2f64.sqrt()).abs() < 1e-10);
        assert!((top[1].delta - 1.0).abs() < 1e-10);
    }

    #[test]
    fn rejects_bad_scale() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                mask(scenario(), Triangle::Lower, bad, LabelTable::default()),
                Err(DdmError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn rejects_mismatched_labels() {
        let labels = LabelTable::with_max_residue(7);
        assert!(mask(scenario(), Triangle::Lower, 1.0, labels).is_err());
    }
}
