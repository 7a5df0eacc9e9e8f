//! CA-CA distance matrices and their differences.
//!
//! Distances are computed axis by axis from all-pairs signed differences so
//! that missing residues propagate as NaN through every entry they touch.

use ddm_core::{DdmError, Result, Summarizable};

use crate::types::{Axis, CoordinateTable};

/// A square, symmetric matrix of CA-CA distances indexed by residue number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    /// Number of rows (= columns), sentinel included.
    pub size: usize,
    /// Row-major size×size distances.
    pub values: Vec<f64>,
}

impl DistanceMatrix {
    /// Distance between residues i and j.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// One row of the matrix.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Number of rows (= columns).
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Summarizable for DistanceMatrix {
    fn summary(&self) -> String {
        let finite = self.values.iter().filter(|v| v.is_finite()).count();
        format!(
            "DistanceMatrix {}x{}, {} defined entries",
            self.size, self.size, finite,
        )
    }
}

/// All-pairs signed differences `d[i,j] = values[i] - values[j]`, row-major.
///
/// The result is antisymmetric; NaN inputs yield NaN rows and columns.
pub fn axis_differences(values: &[f64]) -> Vec<f64> {
    let n = values.len();

    #[cfg(feature = "parallel")]
    let d = {
        use rayon::prelude::*;
        let mut d = vec![0.0f64; n * n];
        d.par_chunks_mut(n.max(1))
            .zip(values.par_iter())
            .for_each(|(row, &vi)| {
                for (cell, &vj) in row.iter_mut().zip(values) {
                    *cell = vi - vj;
                }
            });
        d
    };

    #[cfg(not(feature = "parallel"))]
    let d = {
        let mut d = vec![0.0f64; n * n];
        for (row, &vi) in d.chunks_mut(n.max(1)).zip(values) {
            for (cell, &vj) in row.iter_mut().zip(values) {
                *cell = vi - vj;
            }
        }
        d
    };

    d
}

/// Compute the full pairwise CA distance matrix of a coordinate table.
///
/// The matrix has one row per table slot, sentinel included; missing
/// residues are kept as NaN rows and columns so indices stay aligned with
/// residue numbers.
pub fn pairwise_distances(table: &CoordinateTable) -> DistanceMatrix {
    let n = table.len();
    let mut sum_sq = vec![0.0f64; n * n];

    for axis in Axis::ALL {
        let diff = axis_differences(&table.axis_values(axis));
        for (acc, d) in sum_sq.iter_mut().zip(&diff) {
            *acc += d * d;
        }
    }

    DistanceMatrix {
        size: n,
        values: sum_sq.into_iter().map(f64::sqrt).collect(),
    }
}

/// Element-wise change in CA-CA distance between two conformations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifferenceMatrix {
    /// Number of rows (= columns), sentinel included.
    pub size: usize,
    /// Row-major size×size differences (target minus reference).
    pub values: Vec<f64>,
}

impl DifferenceMatrix {
    /// Difference at residues i and j.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Number of rows (= columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Zero row 0 and column 0 so the sentinel renders as "no change".
    pub fn neutralize_sentinel(&mut self) {
        let n = self.size;
        if n == 0 {
            return;
        }
        for j in 0..n {
            self.values[j] = 0.0;
        }
        for i in 0..n {
            self.values[i * n] = 0.0;
        }
    }
}

/// `target - reference`, element-wise.
///
/// Positive entries mean the target's residues are farther apart than the
/// reference's.
///
/// # Errors
///
/// [`DdmError::ShapeMismatch`] unless both matrices have the same size.
pub fn difference(reference: &DistanceMatrix, target: &DistanceMatrix) -> Result<DifferenceMatrix> {
    if reference.size != target.size {
        return Err(DdmError::ShapeMismatch {
            reference: reference.size,
            target: target.size,
        });
    }

    let values = target
        .values
        .iter()
        .zip(&reference.values)
        .map(|(b, a)| b - a)
        .collect();

    Ok(DifferenceMatrix {
        size: reference.size,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3D;

    fn table(points: &[(usize, (f64, f64, f64))]) -> CoordinateTable {
        let residues: Vec<(usize, Point3D)> = points
            .iter()
            .map(|&(r, (x, y, z))| (r, Point3D::new(x, y, z)))
            .collect();
        CoordinateTable::from_residues(&residues).unwrap()
    }

    fn molecule_a() -> CoordinateTable {
        table(&[
            (1, (0.0, 0.0, 0.0)),
            (2, (1.0, 0.0, 0.0)),
            (3, (0.0, 1.0, 0.0)),
        ])
    }

    fn molecule_b() -> CoordinateTable {
        table(&[
            (1, (0.0, 0.0, 0.0)),
            (2, (2.0, 0.0, 0.0)),
            (3, (0.0, 2.0, 0.0)),
        ])
    }

    #[test]
    fn axis_differences_antisymmetric() {
        let d = axis_differences(&[1.0, 4.0, -2.0]);
        assert_eq!(d, vec![0.0, -3.0, 3.0, 3.0, 0.0, 6.0, -3.0, -6.0, 0.0]);
    }

    #[test]
    fn axis_differences_empty() {
        assert!(axis_differences(&[]).is_empty());
    }

    #[test]
    fn single_residue_has_zero_self_distance() {
        let d = pairwise_distances(&table(&[(1, (3.0, -1.0, 2.0))]));
        assert_eq!(d.size, 2);
        assert_eq!(d.get(1, 1), 0.0);
        assert!(d.get(0, 1).is_nan());
        assert!(d.get(1, 0).is_nan());
    }

    #[test]
    fn known_distances() {
        let d = pairwise_distances(&molecule_a());
        assert_eq!(d.size, 4);
        assert!((d.get(1, 2) - 1.0).abs() < 1e-10);
        assert!((d.get(1, 3) - 1.0).abs() < 1e-10);
        assert!((d.get(2, 3) - 2f64.sqrt()).abs() < 1e-10);
        assert_eq!(d.row(2).len(), 4);
    }

    #[test]
    fn missing_residue_propagates_nan() {
        let d = pairwise_distances(&table(&[(1, (0.0, 0.0, 0.0)), (4, (1.0, 1.0, 1.0))]));
        assert_eq!(d.size, 5);
        for k in [0, 2, 3] {
            for j in 0..d.size {
                if j != k {
                    assert!(d.get(k, j).is_nan(), "d[{k},{j}] should be NaN");
                    assert!(d.get(j, k).is_nan(), "d[{j},{k}] should be NaN");
                }
            }
        }
        assert!((d.get(1, 4) - 3f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn concrete_difference_scenario() {
        let da = pairwise_distances(&molecule_a());
        let db = pairwise_distances(&molecule_b());
        assert!((da.get(1, 2) - 1.0).abs() < 1e-10);
        assert!((db.get(1, 2) - 2.0).abs() < 1e-10);

        let mut r = difference(&da, &db).unwrap();
        assert!((r.get(1, 2) - 1.0).abs() < 1e-10);
        assert!((r.get(2, 1) - 1.0).abs() < 1e-10);
        assert!(r.get(0, 1).is_nan());

        r.neutralize_sentinel();
        for k in 0..r.size {
            assert_eq!(r.get(0, k), 0.0);
            assert_eq!(r.get(k, 0), 0.0);
        }
        assert!((r.get(2, 3) - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn difference_sign_convention() {
        let da = pairwise_distances(&molecule_a());
        let db = pairwise_distances(&molecule_b());
        let ab = difference(&da, &db).unwrap();
        let ba = difference(&db, &da).unwrap();
        for (x, y) in ab.values.iter().zip(&ba.values) {
            if x.is_nan() {
                assert!(y.is_nan());
            } else {
                assert_eq!(*x, -*y);
            }
        }
    }

    #[test]
    fn shape_mismatch() {
        let da = pairwise_distances(&molecule_a());
        let dc = pairwise_distances(&table(&[(1, (0.0, 0.0, 0.0)), (5, (1.0, 0.0, 0.0))]));
        match difference(&da, &dc) {
            Err(DdmError::ShapeMismatch { reference, target }) => {
                assert_eq!(reference, 4);
                assert_eq!(target, 6);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }
}
