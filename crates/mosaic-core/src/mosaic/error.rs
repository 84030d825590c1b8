//! Error and warning types for mosaic builds.

use std::fmt;

use thiserror::Error;

/// A build that could not produce a grid.
///
/// No partial grid is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Requested grid size is not a supported baseplate size
    #[error("unsupported mosaic size: {0} (supported: 16, 32, 48, 64, 96, 128)")]
    UnsupportedSize(u32),

    /// The source image has no pixels
    #[error("source image is empty")]
    EmptyImage,

    /// The source bytes could not be decoded as an image
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Resampling did not produce the requested grid
    #[error("failed to resample image: {0}")]
    Resample(String),
}

impl From<image::ImageError> for BuildError {
    fn from(e: image::ImageError) -> Self {
        BuildError::Decode(e.to_string())
    }
}

/// A tolerated problem during a build. The grid is still complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// The requested palette was empty; the built-in fallback palette was used
    FallbackPalette {
        /// Id of the empty palette
        requested: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::FallbackPalette { requested } => write!(
                f,
                "palette '{requested}' has no colors, the fallback palette was used"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        assert_eq!(
            BuildError::UnsupportedSize(999).to_string(),
            "unsupported mosaic size: 999 (supported: 16, 32, 48, 64, 96, 128)"
        );
        assert_eq!(BuildError::EmptyImage.to_string(), "source image is empty");
        assert_eq!(
            BuildError::Decode("bad magic".to_string()).to_string(),
            "failed to decode image: bad magic"
        );
    }

    #[test]
    fn test_build_warning_display() {
        let warning = BuildWarning::FallbackPalette {
            requested: "round".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "palette 'round' has no colors, the fallback palette was used"
        );
    }
}
