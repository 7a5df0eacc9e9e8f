//! Triangular heatmap rendering using plotters.
//!
//! PNG goes through the bitmap backend, SVG through the SVG backend. No text
//! is drawn, so neither needs system fonts.

use std::path::Path;

use ddm_core::{DdmError, Result};
use ddm_struct::{MaskedDifference, Renderer};
use log::info;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::prelude::{BitMapBackend, Color, RGBColor, Rectangle, BLACK, WHITE};
use plotters_svg::SVGBackend;

use crate::colormap::{diverging, Rgb};

/// Output image format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Format for `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("svg") => Ok(ImageFormat::Svg),
            _ => Err(DdmError::InvalidInput(format!(
                "unsupported image format for {} (expected .png or .svg)",
                path.display()
            ))),
        }
    }
}

/// Pixel geometry of the heatmap and its color bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Edge of one matrix cell in pixels.
    pub cell: u32,
    /// Number of matrix rows (= columns).
    pub cells: u32,
    /// Blank border around everything.
    pub margin: u32,
    /// Gap between heatmap and color bar.
    pub gap: u32,
    /// Width of the color bar.
    pub bar_width: u32,
}

impl Layout {
    /// Fit `cells` rows into roughly `target_edge` pixels, never below one
    /// pixel per cell.
    pub fn new(cells: usize, target_edge: u32) -> Self {
        let cells = cells as u32;
        Self {
            cell: (target_edge / cells.max(1)).max(1),
            cells,
            margin: 20,
            gap: 20,
            bar_width: 20,
        }
    }

    /// Edge of the heatmap square in pixels.
    pub fn edge(&self) -> u32 {
        self.cell * self.cells
    }

    /// Total image size (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (
            2 * self.margin + self.edge() + self.gap + self.bar_width,
            2 * self.margin + self.edge().max(1),
        )
    }

    /// Upper-left pixel of matrix cell (row, col); rows grow downwards.
    pub fn cell_origin(&self, row: usize, col: usize) -> (i32, i32) {
        (
            (self.margin + col as u32 * self.cell) as i32,
            (self.margin + row as u32 * self.cell) as i32,
        )
    }
}

/// Renders a [`MaskedDifference`] as a heatmap with a color bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapRenderer {
    /// Approximate heatmap edge in pixels.
    pub target_edge: u32,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self { target_edge: 800 }
    }
}

impl Renderer for HeatmapRenderer {
    fn render(&self, masked: &MaskedDifference, output: &Path) -> Result<()> {
        let format = ImageFormat::from_path(output)?;
        let layout = Layout::new(masked.size(), self.target_edge);
        let dims = layout.dimensions();

        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(output, dims).into_drawing_area();
                paint(&root, masked, &layout).map_err(render_error)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(output, dims).into_drawing_area();
                paint(&root, masked, &layout).map_err(render_error)?;
            }
        }

        info!(
            "wrote {}x{} heatmap to {}",
            dims.0,
            dims.1,
            output.display()
        );
        Ok(())
    }
}

fn render_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> DdmError {
    DdmError::Render(e.to_string())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn paint<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    masked: &MaskedDifference,
    layout: &Layout,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let bound = masked.max_difference();
    let cell = layout.cell as i32;

    // Hidden and undefined cells stay background white.
    for c in masked.visible_cells() {
        let Some(color) = diverging(c.delta, bound) else {
            continue;
        };
        if color == Rgb::WHITE {
            continue;
        }
        let (x, y) = layout.cell_origin(c.row, c.col);
        root.draw(&Rectangle::new(
            [(x, y), (x + cell - 1, y + cell - 1)],
            rgb(color).filled(),
        ))?;
    }

    let m = layout.margin as i32;
    let edge = layout.edge() as i32;
    root.draw(&Rectangle::new([(m, m), (m + edge, m + edge)], &BLACK))?;

    // Color bar: +bound at the top, -bound at the bottom.
    let bar_x = m + edge + layout.gap as i32;
    let bar_w = layout.bar_width as i32;
    let bar_h = edge.max(2);
    for step in 0..bar_h {
        let value = bound - 2.0 * bound * f64::from(step) / f64::from(bar_h - 1);
        if let Some(color) = diverging(value, bound) {
            root.draw(&Rectangle::new(
                [(bar_x, m + step), (bar_x + bar_w - 1, m + step)],
                rgb(color).filled(),
            ))?;
        }
    }
    root.draw(&Rectangle::new(
        [(bar_x, m), (bar_x + bar_w - 1, m + bar_h - 1)],
        &BLACK,
    ))?;

    root.present()?;
    Ok(())
}
