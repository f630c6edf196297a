//! Geometry result and error types.

use arcstr::ArcStr;

/// The [`Error`] result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error in constructing or combining geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter was non-finite, non-positive, or otherwise unusable.
    #[error("invalid geometry parameter: {0}")]
    Configuration(ArcStr),
    /// An operation produced degenerate geometry where a non-empty result was required.
    #[error("degenerate geometry: {0}")]
    Degenerate(ArcStr),
}

/// Checks that `value` is finite.
pub fn check_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Configuration(arcstr::format!(
            "`{name}` must be finite, got {value}"
        )))
    }
}

/// Checks that `value` is finite and strictly positive.
pub fn check_positive(name: &str, value: f64) -> Result<f64> {
    check_finite(name, value)?;
    if value > 0. {
        Ok(value)
    } else {
        Err(Error::Configuration(arcstr::format!(
            "`{name}` must be positive, got {value}"
        )))
    }
}

/// Checks that `value` is finite and not negative.
pub fn check_non_negative(name: &str, value: f64) -> Result<f64> {
    check_finite(name, value)?;
    if value >= 0. {
        Ok(value)
    } else {
        Err(Error::Configuration(arcstr::format!(
            "`{name}` must not be negative, got {value}"
        )))
    }
}
