//! Run configuration: TOML file plus command-line overrides.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ddm_plot::ImageFormat;
use ddm_struct::{CompareOptions, DuplicatePolicy, Target, Triangle};
use serde::{Deserialize, Serialize};

fn default_chain() -> char {
    'A'
}

/// A coordinate file and the chain to read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSource {
    pub path: PathBuf,
    #[serde(default = "default_chain")]
    pub chain: char,
}

impl StructureSource {
    pub fn new(path: impl Into<PathBuf>, chain: char) -> Self {
        Self {
            path: path.into(),
            chain,
        }
    }
}

/// Everything one `ddm compare` run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdmConfig {
    /// Molecule A.
    pub reference: Option<StructureSource>,

    /// Molecule(s) B, each compared against the reference.
    pub targets: Vec<StructureSource>,

    /// Color-scale bound; the heatmap runs from -max to +max Angstrom.
    pub max_difference: f64,

    /// Heatmap image (.png or .svg).
    pub output: PathBuf,

    /// Optional CSV export of the visible cells.
    pub csv: Option<PathBuf>,

    /// Which strict triangle is drawn.
    pub triangle: Triangle,

    /// Handling of repeated residue numbers.
    pub duplicates: DuplicatePolicy,

    /// Number of largest distance changes to log per target (0 disables).
    pub top: usize,
}

impl Default for DdmConfig {
    fn default() -> Self {
        Self {
            reference: None,
            targets: Vec::new(),
            max_difference: 1.0,
            output: PathBuf::from("ddm.png"),
            csv: None,
            triangle: Triangle::Lower,
            duplicates: DuplicatePolicy::LastWriteWins,
            top: 10,
        }
    }
}

impl DdmConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check the configuration before any file is read.
    pub fn validate(&self) -> Result<()> {
        if self.reference.is_none() {
            bail!("no reference structure given (use --reference or `reference` in the config)");
        }
        if self.targets.is_empty() {
            bail!("no target structure given (use --target or `targets` in the config)");
        }
        if !(self.max_difference.is_finite() && self.max_difference > 0.0) {
            bail!(
                "max_difference must be a positive number, got {}",
                self.max_difference
            );
        }
        ImageFormat::from_path(&self.output)?;

        let mut images = HashSet::new();
        for i in 0..self.targets.len() {
            let image = self.image_path(i);
            if !images.insert(image.clone()) {
                bail!(
                    "two targets would both be written to {}; give them distinct file names",
                    image.display()
                );
            }
        }
        Ok(())
    }

    /// Comparison parameters.
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            triangle: self.triangle,
            max_difference: self.max_difference,
        }
    }

    /// Targets in batch order.
    pub fn batch_targets(&self) -> Vec<Target> {
        self.targets
            .iter()
            .map(|t| Target::new(&t.path, t.chain))
            .collect()
    }

    /// Heatmap path for target `index`.
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.per_target(&self.output, index)
    }

    /// CSV path for target `index`, if CSV export is enabled.
    pub fn csv_path(&self, index: usize) -> Option<PathBuf> {
        self.csv.as_ref().map(|csv| self.per_target(csv, index))
    }

    /// With a single target the path is used as given; otherwise the
    /// target's file stem is appended to the path's stem.
    fn per_target(&self, path: &Path, index: usize) -> PathBuf {
        if self.targets.len() <= 1 {
            return path.to_path_buf();
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target_stem = self.targets[index]
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| index.to_string());
        let mut name = format!("{stem}_{target_stem}");
        if let Some(ext) = path.extension() {
            name.push('.');
            name.push_str(&ext.to_string_lossy());
        }
        path.with_file_name(name)
    }
}
