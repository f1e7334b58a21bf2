use std::path::PathBuf;

use clap::Parser;

/// brailliant — génère les icônes PNG à partir des frames Braille.
///
/// Sans argument, génère les assets intégrés (favicon et curseur).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Remplace les assets intégrés.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ne générer que les assets nommés (répétable).
    #[arg(short, long = "asset", value_name = "NAME")]
    pub assets: Vec<String>,

    /// Dossier de base des chemins source/sortie relatifs.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parsed log level, `Info` when the string is not a level name.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
