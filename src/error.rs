//! Error type shared by the art pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures raised while generating, rendering, or managing art.
#[derive(Debug, Error)]
pub enum ArtError {
    /// A formula evaluated to NaN or infinity at the given sweep point.
    #[error("formula produced a non-finite value at ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    /// `plot` was called before `generate` produced any points.
    #[error("point cloud is empty; generate over a non-empty sweep first")]
    EmptyPointCloud,

    /// `save_png` was called before `plot` laid the points out.
    #[error("nothing plotted; call plot before saving")]
    MissingPlot,

    /// A configured color name is not in the palette.
    #[error("unknown color name {0:?}")]
    UnknownColor(String),

    /// The images folder holds nothing to feature in the README.
    #[error("no images found under {}", .0.display())]
    EmptyGallery(PathBuf),

    #[error("image codec failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("sidecar encoding failure: {0}")]
    Sidecar(#[from] serde_json::Error),

    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtError {
    /// Wraps an i/o error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
