//! Static overlay composition.
//!
//! The engine copies the theme's built-in static files first, then each
//! configured overlay directory in order. A file in a later layer replaces
//! the same relative path from any earlier layer:
//!
//! ```text
//! theme/static/css/basic.css   ─┐
//! theme/static/css/theme.css   ─┼─►  css/basic.css   ← theme
//! _static/css/theme.css        ─┤    css/theme.css   ← branding/_static
//! branding/_static/css/theme.css┘    img/logo.png    ← _static
//! _static/img/logo.png
//! ```
//!
//! [`compose`] computes that mapping without copying anything, which is
//! what the engine (and the tests) need to reason about the result.
//! [`OverlayPlan::apply`] performs the copy.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Static overlay directory not found: {}", .0.display())]
    MissingLayer(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Which layer supplies each output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayPlan {
    /// Relative output path → (layer index, source file).
    files: BTreeMap<PathBuf, (usize, PathBuf)>,
    /// Layers in composition order.
    layers: Vec<PathBuf>,
}

impl OverlayPlan {
    /// The file that ends up at `rel` in the output, if any.
    pub fn source_for(&self, rel: impl AsRef<Path>) -> Option<&Path> {
        self.files.get(rel.as_ref()).map(|(_, source)| source.as_path())
    }

    /// `(relative output path, source file)` pairs, sorted by output path.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.files
            .iter()
            .map(|(rel, (_, source))| (rel.as_path(), source.as_path()))
    }

    pub fn layers(&self) -> &[PathBuf] {
        &self.layers
    }

    /// Index into [`Self::layers`] of the layer supplying `rel`.
    pub fn layer_of(&self, rel: impl AsRef<Path>) -> Option<usize> {
        self.files.get(rel.as_ref()).map(|(layer, _)| *layer)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Copy every planned file into `dest`, creating directories as needed.
    ///
    /// Returns the number of files written.
    pub fn apply(&self, dest: &Path) -> Result<usize, OverlayError> {
        for (rel, (_, source)) in &self.files {
            let target = dest.join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, &target)?;
        }
        tracing::info!(dest = %dest.display(), files = self.files.len(), "applied static overlays");
        Ok(self.files.len())
    }
}

/// Compose the theme's static directory (if any) with the overlays.
///
/// Every layer must exist. Later layers win on relative-path clashes.
pub fn compose(theme_static: Option<&Path>, overlays: &[PathBuf]) -> Result<OverlayPlan, OverlayError> {
    let mut plan = OverlayPlan::default();
    let layers = theme_static.into_iter().chain(overlays.iter().map(PathBuf::as_path));

    for (index, layer) in layers.enumerate() {
        if !layer.is_dir() {
            return Err(OverlayError::MissingLayer(layer.to_path_buf()));
        }
        plan.layers.push(layer.to_path_buf());

        for entry in WalkDir::new(layer).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(layer) else {
                continue;
            };
            let previous = plan
                .files
                .insert(rel.to_path_buf(), (index, entry.path().to_path_buf()));
            if let Some((_, previous)) = previous {
                tracing::debug!(
                    replaced = %previous.display(),
                    by = %entry.path().display(),
                    "static file overridden"
                );
            }
        }
    }

    Ok(plan)
}
