use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::Rgba;
use crate::error::CoreError;

/// Nombre de lignes gardées par défaut en mode `LineBlock`.
pub const DEFAULT_LINE_BLOCK: usize = 40;

/// Taille maximale par défaut des icônes générées.
pub const DEFAULT_MAX_SIZE: (u32, u32) = (64, 64);

/// Upper bound for `dot_radius`.
pub const MAX_DOT_RADIUS: u32 = 128;
/// Upper bound for `dot_spacing`.
pub const MAX_DOT_SPACING: u32 = 256;
/// Upper bound for `cell_padding`.
pub const MAX_CELL_PADDING: u32 = 1024;
/// Upper bound for `margin`.
pub const MAX_MARGIN: u32 = 4096;

/// Géométrie du rendu Braille, en pixels.
///
/// # Example
/// ```
/// use br_core::config::RenderParams;
/// let p = RenderParams::default();
/// assert_eq!((p.cell_width(), p.cell_height()), (14, 24));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderParams {
    /// Rayon de chaque point.
    pub dot_radius: u32,
    /// Distance entre centres de points adjacents.
    pub dot_spacing: u32,
    /// Espace ajouté à chaque cellule, en plus des points.
    pub cell_padding: u32,
    /// Marge transparente autour de la grille.
    pub margin: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            dot_radius: 2,
            dot_spacing: 5,
            cell_padding: 4,
            margin: 10,
        }
    }
}

impl RenderParams {
    /// Horizontal advance per glyph: two dot columns plus padding.
    #[inline(always)]
    #[must_use]
    pub const fn cell_width(&self) -> u32 {
        self.dot_spacing
            .saturating_mul(2)
            .saturating_add(self.cell_padding)
    }

    /// Vertical advance per line: four dot rows plus padding.
    #[inline(always)]
    #[must_use]
    pub const fn cell_height(&self) -> u32 {
        self.dot_spacing
            .saturating_mul(4)
            .saturating_add(self.cell_padding)
    }

    /// Check every field against its bounds.
    ///
    /// # Errors
    /// Returns `CoreError::Config` naming the first field out of range.
    ///
    /// # Example
    /// ```
    /// use br_core::config::RenderParams;
    /// assert!(RenderParams::default().validate().is_ok());
    /// let p = RenderParams { dot_spacing: 0, ..RenderParams::default() };
    /// assert!(p.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("dot_radius", self.dot_radius, 0, MAX_DOT_RADIUS),
            ("dot_spacing", self.dot_spacing, 1, MAX_DOT_SPACING),
            ("cell_padding", self.cell_padding, 0, MAX_CELL_PADDING),
            ("margin", self.margin, 0, MAX_MARGIN),
        ];
        for (name, value, min, max) in fields {
            if !(min..=max).contains(&value) {
                return Err(CoreError::Config(format!(
                    "{name} = {value} hors de [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

/// How the glyph frame is pulled out of a source file.
///
/// # Example
/// ```
/// use br_core::config::ExtractMode;
/// assert_eq!(ExtractMode::default(), ExtractMode::Template);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMode {
    /// First backtick-delimited literal.
    #[default]
    Template,
    /// Raw lines minus lone `[` / `]`, capped at the given count.
    LineBlock(usize),
}

/// Un asset nommé : source, extraction, couleur, sortie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetConfig {
    pub name: String,
    pub source: PathBuf,
    pub extract: ExtractMode,
    pub color: Rgba,
    pub output: PathBuf,
    /// `None` = pas de limite.
    pub max_size: Option<(u32, u32)>,
    pub crop: bool,
}

impl AssetConfig {
    /// Favicon rendered from the first fairy frame.
    #[must_use]
    pub fn fairy() -> Self {
        Self {
            name: "fairy".into(),
            source: PathBuf::from("docs/assets/fairy-frames.js"),
            extract: ExtractMode::Template,
            color: Rgba::CHARTREUSE,
            output: PathBuf::from("favicon.png"),
            max_size: Some(DEFAULT_MAX_SIZE),
            crop: true,
        }
    }

    /// Cursor rendered from the maggot frame array.
    #[must_use]
    pub fn maggot() -> Self {
        Self {
            name: "maggot".into(),
            source: PathBuf::from("docs/assets/maggot-frame.js"),
            extract: ExtractMode::LineBlock(DEFAULT_LINE_BLOCK),
            color: Rgba::BLACK,
            output: PathBuf::from("cursor.png"),
            max_size: Some(DEFAULT_MAX_SIZE),
            crop: true,
        }
    }
}

/// Configuration complète : géométrie + liste d'assets.
///
/// # Example
/// ```
/// use br_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.assets.len(), 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub render: RenderParams,
    pub assets: Vec<AssetConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            render: RenderParams::default(),
            assets: vec![AssetConfig::fairy(), AssetConfig::maggot()],
        }
    }
}

impl AppConfig {
    /// Check the values the renderer cannot work with.
    ///
    /// # Errors
    /// Returns `CoreError::Config` describing the first offending value.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.render.validate()?;
        if self.assets.is_empty() {
            return Err(CoreError::Config("aucun asset défini".into()));
        }

        let mut seen = HashSet::new();
        for asset in &self.assets {
            if asset.name.trim().is_empty() {
                return Err(CoreError::Config("asset sans nom".into()));
            }
            if !seen.insert(asset.name.as_str()) {
                return Err(CoreError::Config(format!(
                    "asset '{}' défini deux fois",
                    asset.name
                )));
            }
            if let Some((w, h)) = asset.max_size
                && (w == 0 || h == 0)
            {
                return Err(CoreError::Config(format!(
                    "max_size de '{}' doit être > 0 ({w}×{h})",
                    asset.name
                )));
            }
            if asset.extract == ExtractMode::LineBlock(0) {
                return Err(CoreError::Config(format!(
                    "line_block de '{}' doit être > 0",
                    asset.name
                )));
            }
        }
        Ok(())
    }

    /// Find an asset by name.
    #[must_use]
    pub fn asset(&self, name: &str) -> Option<&AssetConfig> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    #[serde(default, rename = "asset")]
    assets: Vec<AssetSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    dot_radius: Option<u32>,
    dot_spacing: Option<u32>,
    cell_padding: Option<u32>,
    margin: Option<u32>,
}

/// One `[[asset]]` entry. Only identity and paths are mandatory.
#[derive(Deserialize)]
struct AssetSection {
    name: String,
    source: PathBuf,
    output: PathBuf,
    extract: Option<ExtractMode>,
    color: Option<Rgba>,
    max_size: Option<[u32; 2]>,
    crop: Option<bool>,
}

impl From<AssetSection> for AssetConfig {
    fn from(s: AssetSection) -> Self {
        Self {
            name: s.name,
            source: s.source,
            extract: s.extract.unwrap_or_default(),
            color: s.color.unwrap_or(Rgba::BLACK),
            output: s.output,
            max_size: s.max_size.map(|[w, h]| (w, h)),
            crop: s.crop.unwrap_or(true),
        }
    }
}

/// Parse TOML text and merge it over the defaults.
///
/// A file with no `[[asset]]` entry keeps the built-in assets.
///
/// # Errors
/// Returns an error if the TOML is malformed or fails validation.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = AppConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.dot_radius {
            config.render.dot_radius = v;
        }
        if let Some(v) = r.dot_spacing {
            config.render.dot_spacing = v;
        }
        if let Some(v) = r.cell_padding {
            config.render.cell_padding = v;
        }
        if let Some(v) = r.margin {
            config.render.margin = v;
        }
    }

    if !file.assets.is_empty() {
        config.assets = file.assets.into_iter().map(AssetConfig::from).collect();
    }

    config.validate()?;
    log::debug!(
        "Config chargée : {} asset(s), {:?}",
        config.assets.len(),
        config.render
    );
    Ok(config)
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
/// ```no_run
/// use br_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("assets.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}
