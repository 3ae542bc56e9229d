use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, walking or plotting an octree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A node is missing a required field, has a field of the wrong type,
    /// or is divided without all eight children.
    #[error("malformed node at {path}: {reason}")]
    MalformedNode { path: String, reason: String },

    #[error("cannot read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid plot settings: {0}")]
    InvalidSettings(String),

    #[error("cannot write image {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("cannot display image: {0}")]
    Display(String),

    #[error("interrupted by user")]
    Interrupted,
}

impl RenderError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        RenderError::MalformedNode {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
