//! Batch driver: one reference against every configured target.

use anyhow::{Context, Result};
use ddm_core::Summarizable;
use ddm_plot::{CsvExporter, HeatmapRenderer};
use ddm_struct::{compare_batch, MaskedDifference, Renderer, StructureReader};
use log::{error, info};

use crate::config::DdmConfig;

/// How many targets went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Compare every target of `config` against its reference and write the
/// outputs. A failing target is logged and counted; the others still run.
///
/// # Errors
///
/// Only if the configuration is invalid or the reference cannot be read.
pub fn run_compare(config: &DdmConfig) -> Result<RunSummary> {
    config.validate()?;
    let reference = config
        .reference
        .as_ref()
        .context("no reference structure configured")?;

    let reference = StructureReader::new(reference.chain)
        .with_duplicates(config.duplicates)
        .read_path(&reference.path)
        .with_context(|| {
            format!(
                "failed to read reference {} (chain {})",
                reference.path.display(),
                reference.chain
            )
        })?;
    info!("reference {}", reference.summary());

    let targets = config.batch_targets();
    let outcomes = compare_batch(
        &reference,
        &targets,
        config.duplicates,
        &config.compare_options(),
    );

    let mut summary = RunSummary {
        succeeded: 0,
        failed: 0,
    };
    for (index, outcome) in outcomes.into_iter().enumerate() {
        let target = &outcome.target;
        let written = outcome
            .result
            .and_then(|masked| write_outputs(config, index, &masked));
        match written {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                error!(
                    "{} (chain {}): {e}",
                    target.path.display(),
                    target.chain
                );
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

fn write_outputs(
    config: &DdmConfig,
    index: usize,
    masked: &MaskedDifference,
) -> ddm_core::Result<()> {
    info!("{}", masked.summary());
    for change in masked.largest_changes(config.top) {
        info!(
            "  {} - {}: {:+.3} A",
            change.first_label.as_deref().unwrap_or("?").trim(),
            change.second_label.as_deref().unwrap_or("?").trim(),
            change.delta
        );
    }

    HeatmapRenderer::default().render(masked, &config.image_path(index))?;
    if let Some(csv) = config.csv_path(index) {
        CsvExporter.render(masked, &csv)?;
    }
    Ok(())
}
