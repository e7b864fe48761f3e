//! Source tree scanning.
//!
//! Walks the docs directory, turns every source file into a page id and
//! resolves it, so a whole site can be checked without running the engine.
//!
//! ```text
//! docs/
//! ├── conf.toml
//! ├── _static/            # skipped (static overlay)
//! ├── _templates/         # skipped (templates)
//! ├── .cache/             # skipped (hidden)
//! ├── index.rst           → index
//! ├── faq.rst             → faq
//! └── tutorial/
//!     └── intro.rst       → tutorial/intro
//! ```
//!
//! Files without the configured `source_suffix` are ignored.

use crate::resolver::{Resolution, SiteConfigResolver};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A resolved source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub page_id: String,
    /// Path relative to the scanned directory.
    pub source: PathBuf,
    /// Exclude pattern that removed the page from the build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<String>,
    /// Sidebar rule pattern that matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub widgets: Vec<String>,
}

impl PageEntry {
    pub fn is_excluded(&self) -> bool {
        self.excluded_by.is_some()
    }
}

/// Scan `source_dir` and resolve every page, sorted by page id.
pub fn scan(resolver: &SiteConfigResolver, source_dir: &Path) -> Result<Vec<PageEntry>, ScanError> {
    let config = resolver.config();
    let skipped: HashSet<PathBuf> = config
        .templates_path
        .iter()
        .chain(&config.static_paths)
        .map(|p| source_dir.join(p))
        .collect();

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
            !hidden && !skipped.contains(e.path())
        });

    let mut pages = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let Some(page_id) = resolver.page_id(rel) else {
            continue;
        };

        let page = match resolver.resolve(&page_id) {
            Resolution::Excluded { pattern } => PageEntry {
                page_id,
                source: rel.to_path_buf(),
                excluded_by: Some(pattern.to_string()),
                rule: None,
                widgets: Vec::new(),
            },
            Resolution::Rendered { rule, widgets } => PageEntry {
                page_id,
                source: rel.to_path_buf(),
                excluded_by: None,
                rule: rule.map(|r| r.pattern.clone()),
                widgets: widgets.to_vec(),
            },
        };
        pages.push(page);
    }

    pages.sort_by(|a, b| a.page_id.cmp(&b.page_id));
    tracing::debug!(dir = %source_dir.display(), pages = pages.len(), "scanned sources");
    Ok(pages)
}
