//! Tabular export of the visible cells of a difference matrix.

use std::path::Path;

use ddm_core::{DdmError, Result};
use ddm_struct::{MaskedDifference, Renderer};
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    row: usize,
    col: usize,
    row_label: &'a str,
    col_label: &'a str,
    delta: f64,
}

/// Writes one CSV row per visible cell: `row,col,row_label,col_label,delta`.
///
/// Undefined cells are written as `NaN`. The sentinel row/column is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Write to any `io::Write` sink.
    pub fn write<W: std::io::Write>(&self, masked: &MaskedDifference, sink: W) -> Result<usize> {
        let mut writer = csv::Writer::from_writer(sink);
        let labels = masked.labels();
        let mut rows = 0;
        for cell in masked.visible_cells() {
            if cell.row == 0 || cell.col == 0 {
                continue;
            }
            writer
                .serialize(CsvRow {
                    row: cell.row,
                    col: cell.col,
                    row_label: labels.get(cell.row).map_or("", str::trim),
                    col_label: labels.get(cell.col).map_or("", str::trim),
                    delta: cell.delta,
                })
                .map_err(csv_error)?;
            rows += 1;
        }
        writer.flush()?;
        Ok(rows)
    }
}

impl Renderer for CsvExporter {
    fn render(&self, masked: &MaskedDifference, output: &Path) -> Result<()> {
        let file = std::fs::File::create(output).map_err(|e| {
            DdmError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", output.display(), e),
            ))
        })?;
        let rows = self.write(masked, std::io::BufWriter::new(file))?;
        info!("wrote {rows} residue pairs to {}", output.display());
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> DdmError {
    DdmError::Io(std::io::Error::from(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddm_struct::{compare, CompareOptions, StructureReader, Triangle};

    fn masked(triangle: Triangle) -> MaskedDifference {
        let reader = StructureReader::new('A');
        let a = reader
            .parse_str(
                "\
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C\n\
ATOM      2  CA  GLY A   2       1.000   0.000   0.000  1.00  0.00           C\n\
ATOM      3  CA  VAL A   4       0.000   1.000   0.000  1.00  0.00           C\n",
            )
            .unwrap();
        let b = reader
            .parse_str(
                "\
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C\n\
ATOM      2  CA  GLY A   2       2.000   0.000   0.000  1.00  0.00           C\n\
ATOM      3  CA  VAL A   4       0.000   1.000   0.000  1.00  0.00           C\n",
            )
            .unwrap();
        let options = CompareOptions {
            triangle,
            max_difference: 1.0,
        };
        compare(&a, &b, &options).unwrap()
    }

    #[test]
    fn writes_lower_triangle() {
        let mut buf = Vec::new();
        let rows = CsvExporter.write(&masked(Triangle::Lower), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // 5x5 matrix: 6 strict-lower cells off the sentinel
        assert_eq!(rows, 6);
        assert_eq!(lines[0], "row,col,row_label,col_label,delta");
        assert_eq!(lines.len(), 7);
        assert!(lines.contains(&"2,1,A   2,A   1,1.0"));
        assert!(lines.contains(&"3,1,,A   1,NaN"));
        assert!(lines.contains(&"4,1,A   4,A   1,0.0"));
    }

    #[test]
    fn upper_triangle_rows_have_row_below_col() {
        let mut buf = Vec::new();
        CsvExporter.write(&masked(Triangle::Upper), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for line in text.lines().skip(1) {
            let mut fields = line.split(',');
            let row: usize = fields.next().unwrap().parse().unwrap();
            let col: usize = fields.next().unwrap().parse().unwrap();
            assert!(row < col, "{line}");
        }
    }

    #[test]
    fn render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ddm.csv");
        CsvExporter.render(&masked(Triangle::Lower), &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("row,col,row_label,col_label,delta"));
    }

    #[test]
    fn render_into_missing_dir_fails() {
        let out = Path::new("/nonexistent/dir/ddm.csv");
        assert!(matches!(
            CsvExporter.render(&masked(Triangle::Lower), out),
            Err(DdmError::Io(_))
        ));
    }
}
