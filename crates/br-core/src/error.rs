use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// A frame with no lines cannot be laid out on a canvas.
    #[error("Frame vide : aucune ligne à rendre")]
    EmptyFrame,

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Color string that is neither `#RRGGBB` nor `#RRGGBBAA`.
    #[error("Couleur invalide : {value}")]
    InvalidColor {
        /// The rejected input.
        value: String,
    },
}
