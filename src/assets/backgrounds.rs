use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{ComposeError, ComposeResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// A background image identified by its file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundAsset {
    /// Location of the encoded image.
    pub path: PathBuf,
}

impl BackgroundAsset {
    fn sort_key(&self) -> (&std::ffi::OsStr, &Path) {
        (self.path.file_name().unwrap_or_default(), &self.path)
    }
}

/// Background images in stable file-name order.
#[derive(Clone, Debug, Default)]
pub struct BackgroundSet {
    source: PathBuf,
    assets: Vec<BackgroundAsset>,
}

impl BackgroundSet {
    /// Scan `dir` (non-recursively) for image files.
    ///
    /// Hidden files and files without a raster image extension are ignored. A missing directory
    /// yields an empty set; selection then reports [`ComposeError::NoBackgrounds`].
    pub fn discover(dir: &Path) -> ComposeResult<Self> {
        let mut paths = Vec::new();
        if dir.is_dir() {
            let rd = std::fs::read_dir(dir)
                .with_context(|| format!("list backgrounds in '{}'", dir.display()))?;
            for entry in rd.flatten() {
                let path = entry.path();
                if path.is_file() && is_background_file(&path) {
                    paths.push(path);
                }
            }
        }
        let mut set = Self::from_paths(paths);
        set.source = dir.to_path_buf();
        Ok(set)
    }

    /// Build a set from explicit paths, applying the same ordering as [`Self::discover`].
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut assets: Vec<BackgroundAsset> = paths
            .into_iter()
            .map(|path| BackgroundAsset { path })
            .collect();
        assets.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self {
            source: PathBuf::new(),
            assets,
        }
    }

    /// Number of usable backgrounds.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True when no background was found; composing against this set fails.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Backgrounds in selection order (sorted by file name).
    pub fn assets(&self) -> &[BackgroundAsset] {
        &self.assets
    }

    /// Directory the set was discovered from (empty for explicit lists).
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Background for caption `index`, cycling through the set.
    pub fn select(&self, index: usize) -> ComposeResult<&BackgroundAsset> {
        select(index, &self.assets).ok_or_else(|| ComposeError::no_backgrounds(&self.source))
    }
}

/// `backgrounds[index mod len]`, or `None` for an empty slice.
pub fn select(index: usize, backgrounds: &[BackgroundAsset]) -> Option<&BackgroundAsset> {
    if backgrounds.is_empty() {
        return None;
    }
    backgrounds.get(index % backgrounds.len())
}

fn is_background_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/backgrounds.rs"]
mod tests;
