//! Toolbar error types

use thiserror::Error;

/// Errors raised while building or configuring a collapsing toolbar.
///
/// Scroll and fling handling never fails; these only surface at construction.
#[derive(Error, Debug)]
pub enum ToolbarError {
    /// Height bounds are negative or inverted
    #[error("Invalid toolbar bounds: min {min}, max {max}")]
    InvalidBounds { min: i32, max: i32 },

    /// Initial height outside the bounds
    #[error("Initial height {height} outside {min}..={max}")]
    InvalidHeight { height: i32, min: i32, max: i32 },

    /// Snap threshold outside 0.0..=1.0
    #[error("Snap threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f32),

    /// Snap animation with no duration
    #[error("Snap duration must be positive")]
    InvalidDuration,

    /// Decay friction or velocity threshold not positive
    #[error("Fling decay parameters must be positive, got {0}")]
    InvalidFriction(f32),

    /// Frame rate of zero
    #[error("Frame rate must be positive, got {0}")]
    InvalidFrameRate(u32),

    /// Strategy name not recognised
    #[error("Unknown scroll strategy '{0}'")]
    UnknownStrategy(String),

    /// Failed to parse a config file
    #[error("Failed to parse toolbar config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize a config
    #[error("Failed to serialize toolbar config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Failed to read a config file
    #[error("Failed to read toolbar config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for toolbar construction
pub type Result<T> = std::result::Result<T, ToolbarError>;
