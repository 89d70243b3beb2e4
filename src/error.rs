//! Error types
//!
//! The tick loop itself never fails. Errors only surface when something is
//! constructed from bad numbers: bodies, screen bounds or a tuning file.

/// Construction and configuration errors
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    /// Mass must be finite and strictly positive (it is a divisor)
    #[error("invalid mass {0}: must be finite and positive")]
    InvalidMass(f32),

    /// Collision radius must be finite and strictly positive
    #[error("invalid radius {0}: must be finite and positive")]
    InvalidRadius(f32),

    /// Screen rectangle is empty, inverted or not finite
    #[error("invalid screen bounds: {0}")]
    InvalidBounds(String),

    /// A tuning value is out of range
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// IO error while reading a tuning file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning file is not valid JSON for [`crate::Tuning`]
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
