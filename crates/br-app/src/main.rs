use anyhow::Result;
use clap::Parser;

pub mod batch;
pub mod cli;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.level_filter())
        .init();

    // 3. Charger la config (assets intégrés si aucun fichier)
    let config = match cli.config.as_deref() {
        Some(path) => br_core::config::load_config(path)?,
        None => br_core::config::AppConfig::default(),
    };

    log::info!("Génération Braille manuelle ({} asset(s))...", config.assets.len());

    // 4. Lot isolé par asset
    let report = batch::run_batch(&config, &cli.root, &cli.assets);

    for (name, path, (w, h)) in &report.generated {
        log::debug!("{name} -> {} ({w}x{h})", path.display());
    }
    if !report.is_success() {
        let names: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
        anyhow::bail!(
            "{} asset(s) en échec : {}",
            report.failed.len(),
            names.join(", ")
        );
    }
    Ok(())
}
