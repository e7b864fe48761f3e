//! Shared test utilities for the docsite test suite.
//!
//! Builds throwaway project trees in temp directories and loads them:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = write_site(&sidebars_toml(&[
//!     ("tutorial/*", &["localtoc.html"]),
//!     ("faq*", &["localtoc.html", "relations.html"]),
//! ]));
//! let resolver = load(&site);
//! assert_eq!(resolver.resolve_sidebar("faq"), ["localtoc.html", "relations.html"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::resolver::SiteConfigResolver;

/// Contents written to `.version` by [`write_site`].
pub const DEFAULT_VERSION: &str = "0.4.1\n";

// =========================================================================
// Project trees
// =========================================================================

/// Create `<tmp>/.version` and `<tmp>/docs/conf.toml` with the given config.
pub fn write_site(conf: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".version"), DEFAULT_VERSION).unwrap();
    let docs = docs_dir(&tmp);
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("conf.toml"), conf).unwrap();
    tmp
}

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

pub fn docs_dir(site: &TempDir) -> PathBuf {
    site.path().join("docs")
}

pub fn conf_path(site: &TempDir) -> PathBuf {
    docs_dir(site).join("conf.toml")
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn touch(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

// =========================================================================
// Loading
// =========================================================================

/// Load the site's resolver. Panics with the load error on failure.
pub fn load(site: &TempDir) -> SiteConfigResolver {
    let path = conf_path(site);
    SiteConfigResolver::load(&path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()))
}

/// Render `[[sidebars]]` tables in the given order.
///
/// ```rust
/// sidebars_toml(&[
///     ("tutorial/*", &["localtoc.html"]),
///     ("tutorial/advanced", &["localtoc.html", "relations.html"]),
/// ]);
/// ```
pub fn sidebars_toml(rules: &[(&str, &[&str])]) -> String {
    let mut out = String::new();
    for (pattern, widgets) in rules {
        let widgets: Vec<String> = widgets.iter().map(|w| format!("{w:?}")).collect();
        out.push_str(&format!(
            "\n[[sidebars]]\npattern = {pattern:?}\nwidgets = [{}]\n",
            widgets.join(", ")
        ));
    }
    out
}
