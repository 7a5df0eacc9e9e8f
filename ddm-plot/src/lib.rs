//! Output artifacts for distance-difference matrices.
//!
//! - **Heatmaps** — PNG/SVG triangular heatmaps in [`heatmap`]
//! - **Color scale** — Diverging blue-white-red mapping in [`colormap`]
//! - **CSV** — Per-pair export of the visible cells in [`export`]
//!
//! Both [`HeatmapRenderer`] and [`CsvExporter`] implement
//! [`ddm_struct::Renderer`].

pub mod colormap;
pub mod export;
pub mod heatmap;

pub use colormap::{diverging, Rgb};
pub use export::CsvExporter;
pub use heatmap::{HeatmapRenderer, ImageFormat, Layout};
