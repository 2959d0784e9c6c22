use std::path::{Path, PathBuf};

/// Convenience result type used across the crate.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Error taxonomy for composition and its surrounding pipeline.
///
/// Only [`ComposeError::NoBackgrounds`] aborts a whole batch; every other variant is scoped to a
/// single composition (or a single overlay inside it).
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    /// The background set is empty, so no item can be composed.
    #[error("no background images found in '{}'", dir.display())]
    NoBackgrounds {
        /// Directory (or description of the source) that produced the empty set.
        dir: PathBuf,
    },

    /// A background or overlay file is missing, unreadable, or undecodable.
    #[error("asset load error for '{}': {reason}", path.display())]
    AssetLoad {
        /// Offending file.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// An overlay could not be applied; logged and skipped by the compositor.
    #[error("overlay apply error for '{}': {reason}", path.display())]
    OverlayApply {
        /// Offending overlay file.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// Rasterization or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// JSON or CSV (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    /// [`ComposeError::NoBackgrounds`] for `dir`.
    pub fn no_backgrounds(dir: impl Into<PathBuf>) -> Self {
        Self::NoBackgrounds { dir: dir.into() }
    }

    /// [`ComposeError::AssetLoad`] for `path`.
    pub fn asset_load(path: &Path, reason: impl ToString) -> Self {
        Self::AssetLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// [`ComposeError::OverlayApply`] for `path`.
    pub fn overlay_apply(path: &Path, reason: impl ToString) -> Self {
        Self::OverlayApply {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// [`ComposeError::Render`] with `msg`.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// [`ComposeError::Config`] with `msg`.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// [`ComposeError::Serde`] with `msg`.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True when the error must abort the whole batch rather than a single item.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, Self::NoBackgrounds { .. })
    }
}

impl From<serde_json::Error> for ComposeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
