//! Media asset dimension probing.
//!
//! The engine never decodes pixels — it only needs width and height, read
//! from the image header. The probe sits behind a trait so tests can supply
//! fixed dimensions without touching real image files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::schema::ASPECT_EPSILON;

/// Failure to read an image's dimensions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProbeError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl ProbeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reads `(width, height)` for a media asset path.
pub trait ImageProbe: Send + Sync {
    /// Probe the dimensions of the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if the file is missing, unreadable, or not a
    /// recognized image format.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError>;
}

/// Probe backed by the `image` crate's header-only dimension reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageProbe;

impl ImageProbe for FsImageProbe {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        image::image_dimensions(path)
            .map_err(|e| ProbeError::new(format!("could not read image {}: {e}", path.display())))
    }
}

/// Test probe returning fixed dimensions keyed by file name.
///
/// Paths not in the map fail with a missing-image error, which exercises the
/// unreadable-asset reporting path.
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    dimensions: HashMap<PathBuf, (u32, u32)>,
}

impl FixedProbe {
    /// Register dimensions for a file name (e.g. `hero.png`).
    #[must_use]
    pub fn with(mut self, file_name: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.dimensions.insert(file_name.into(), (width, height));
        self
    }
}

impl ImageProbe for FixedProbe {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        path.file_name()
            .map(PathBuf::from)
            .and_then(|name| self.dimensions.get(&name).copied())
            .ok_or_else(|| ProbeError::new(format!("could not read image {}", path.display())))
    }
}

/// Whether `width / height` is within [`ASPECT_EPSILON`] of the target ratio.
///
/// Zero-height images never match (and will have failed the minimum-height
/// check already).
#[must_use]
pub fn ratio_matches(width: u32, height: u32, target: f64) -> bool {
    if height == 0 {
        return false;
    }
    (f64::from(width) / f64::from(height) - target).abs() <= ASPECT_EPSILON
}
