//! The seam to the external documentation-build engine.
//!
//! Theme and widget identifiers are opaque to this crate. Only the engine
//! knows which ones exist, so validation goes through the [`Engine`] trait.
//! [`BuiltinCatalog`] knows the stock themes and sidebar widgets and can be
//! extended with whatever a project installs on top.

use std::collections::BTreeSet;

/// What the configuration layer needs to ask the build engine.
pub trait Engine: Send + Sync {
    /// Engine name, used in error messages.
    fn name(&self) -> &str;
    /// Whether `theme` names a theme the engine can render with.
    fn has_theme(&self, theme: &str) -> bool;
    /// Whether `widget` names a sidebar template the engine can draw.
    fn has_widget(&self, widget: &str) -> bool;
}

const STOCK_THEMES: &[&str] = &[
    "alabaster",
    "classic",
    "sphinxdoc",
    "scrolls",
    "agogo",
    "traditional",
    "nature",
    "haiku",
    "pyramid",
    "bizstyle",
    "bootstrap",
    "sphinx_rtd_theme",
];

const STOCK_WIDGETS: &[&str] = &[
    "localtoc.html",
    "globaltoc.html",
    "relations.html",
    "sourcelink.html",
    "searchbox.html",
    "about.html",
    "navigation.html",
    "donate.html",
];

/// An [`Engine`] backed by fixed name sets.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    themes: BTreeSet<String>,
    widgets: BTreeSet<String>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self {
            themes: STOCK_THEMES.iter().map(|s| s.to_string()).collect(),
            widgets: STOCK_WIDGETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BuiltinCatalog {
    /// Stock themes and widgets plus the given extras.
    pub fn with_extras<T, W>(themes: T, widgets: W) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        let mut catalog = Self::default();
        catalog.themes.extend(themes.into_iter().map(Into::into));
        catalog.widgets.extend(widgets.into_iter().map(Into::into));
        catalog
    }
}

impl Engine for BuiltinCatalog {
    fn name(&self) -> &str {
        "builtin catalog"
    }

    fn has_theme(&self, theme: &str) -> bool {
        self.themes.contains(theme)
    }

    fn has_widget(&self, widget: &str) -> bool {
        self.widgets.contains(widget)
    }
}
