use std::path::{Path, PathBuf};

use anyhow::Result;
use br_core::config::{AppConfig, AssetConfig, RenderParams};
use br_export::render::{RenderRequest, render};
use br_source::frames::load_frame;

/// Résultat d'un lot : assets générés et assets en échec.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// (nom, fichier écrit, dimensions finales)
    pub generated: Vec<(String, PathBuf, (u32, u32))>,
    /// (nom, erreur)
    pub failed: Vec<(String, anyhow::Error)>,
}

impl BatchReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generate one asset: extract the frame, render it, write the PNG.
///
/// Relative `source` and `output` paths are resolved against `root`.
///
/// # Errors
/// Returns an error if the source cannot be read, holds no frame, or the PNG
/// cannot be rendered or written.
pub fn generate_asset(
    asset: &AssetConfig,
    params: RenderParams,
    root: &Path,
) -> Result<(PathBuf, (u32, u32))> {
    let source = root.join(&asset.source);
    let output = root.join(&asset.output);

    let lines = load_frame(&source, &asset.extract)?;
    let req = RenderRequest::for_asset(&lines, asset, params);
    let size = render(&req, &output)?;
    Ok((output, size))
}

/// Batch entry point: every asset is isolated from the others.
///
/// An empty `only` selects every asset. A failing asset is logged and
/// recorded, and the remaining assets are still generated. Names in `only`
/// that match no asset are logged as warnings.
pub fn run_batch(config: &AppConfig, root: &Path, only: &[String]) -> BatchReport {
    for name in only {
        if config.asset(name).is_none() {
            log::warn!("Asset inconnu '{name}', ignoré.");
        }
    }

    let selected = config
        .assets
        .iter()
        .filter(|a| only.is_empty() || only.contains(&a.name));

    let mut report = BatchReport::default();
    for asset in selected {
        log::debug!("Génération de '{}'", asset.name);
        match generate_asset(asset, config.render, root) {
            Ok((path, size)) => report.generated.push((asset.name.clone(), path, size)),
            Err(e) => {
                log::error!("Erreur {}: {e:#}", asset.name);
                report.failed.push((asset.name.clone(), e));
            }
        }
    }
    report
}
