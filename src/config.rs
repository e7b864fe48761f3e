//! Documentation site configuration.
//!
//! Handles loading and validating `conf.toml`. The file sits in the docs
//! directory; the project version is read from a sibling file one level up
//! (see [`crate::version`]).
//!
//! ## Config File Location
//!
//! ```text
//! project/
//! ├── .version                 # Version string, read verbatim
//! └── docs/
//!     ├── conf.toml            # This file
//!     ├── _static/             # Static overlay (copied over theme files)
//!     ├── _templates/
//!     ├── index.rst
//!     └── tutorial/
//!         └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! project = ""
//! author = ""
//! copyright = ""
//! master_doc = "index"
//! source_suffix = ".rst"
//! pygments_style = "sphinx"
//! todo_include_todos = false
//! extensions = []
//! templates_path = ["_templates"]
//! exclude_patterns = ["_build/*", "Thumbs.db", ".DS_Store"]
//! static_paths = ["_static"]    # Later entries win on file name clashes
//! stylesheets = []              # Extra CSS files, relative to the static dirs
//! # htmlhelp_basename = "projectdoc"
//! # language = "en"
//!
//! [theme]
//! name = "alabaster"
//! path = []                     # Extra theme search directories
//!
//! [theme.options]
//! # navbar_title = "brig"
//! # globaltoc_depth = 2
//! # navbar_links = [{ label = "GitHub", target = "https://github.com/...", absolute = true }]
//!
//! # Sidebar rules, tried top to bottom. The first matching pattern wins,
//! # so put specific patterns before general ones.
//! [[sidebars]]
//! pattern = "tutorial/*"
//! widgets = ["localtoc.html"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read version file {}: {source}", .path.display())]
    VersionFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Version file is empty: {}", .0.display())]
    EmptyVersion(PathBuf),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("{engine}: unknown theme '{theme}'")]
    UnknownTheme { engine: String, theme: String },
    #[error("{engine}: unknown sidebar widget '{widget}' in rule '{pattern}'")]
    UnknownWidget {
        engine: String,
        widget: String,
        pattern: String,
    },
}

/// Site configuration loaded from `conf.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub project: String,
    pub author: String,
    pub copyright: String,
    /// Page id of the root document.
    pub master_doc: String,
    /// Source file extension, including the dot.
    pub source_suffix: String,
    pub language: Option<String>,
    /// Syntax highlighting style name, passed through.
    pub pygments_style: String,
    /// Whether `todo` directives produce output.
    pub todo_include_todos: bool,
    /// Extension module identifiers to activate, in order.
    pub extensions: Vec<String>,
    pub templates_path: Vec<String>,
    /// Glob patterns for pages left out of the build entirely.
    pub exclude_patterns: Vec<String>,
    /// Static overlay directories, in composition order.
    pub static_paths: Vec<String>,
    /// Extra stylesheets registered with the engine.
    pub stylesheets: Vec<String>,
    /// Base name for generated help/help-index files.
    pub htmlhelp_basename: Option<String>,
    pub theme: ThemeConfig,
    /// Sidebar rules in priority order (first match wins).
    pub sidebars: Vec<SidebarRule>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            author: String::new(),
            copyright: String::new(),
            master_doc: "index".to_string(),
            source_suffix: ".rst".to_string(),
            language: None,
            pygments_style: "sphinx".to_string(),
            todo_include_todos: false,
            extensions: Vec::new(),
            templates_path: vec!["_templates".to_string()],
            exclude_patterns: vec![
                "_build/*".to_string(),
                "Thumbs.db".to_string(),
                ".DS_Store".to_string(),
            ],
            static_paths: vec!["_static".to_string()],
            stylesheets: Vec::new(),
            htmlhelp_basename: None,
            theme: ThemeConfig::default(),
            sidebars: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Validate structural constraints the engine cannot recover from.
    ///
    /// Theme and widget names are checked separately against an engine,
    /// see [`crate::resolver::SiteConfigResolver::check_with`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.name.trim().is_empty() {
            return Err(ConfigError::Validation("theme.name must not be empty".into()));
        }
        if !self.source_suffix.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "source_suffix must start with '.', got '{}'",
                self.source_suffix
            )));
        }
        if self.exclude_patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Validation(
                "exclude_patterns must not contain empty patterns".into(),
            ));
        }
        let mut seen = HashSet::new();
        for ext in &self.extensions {
            if !seen.insert(ext.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "extension '{ext}' is listed more than once"
                )));
            }
        }
        for (index, rule) in self.sidebars.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sidebars[{index}].pattern must not be empty"
                )));
            }
            if rule.widgets.iter().any(|w| w.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "sidebars[{index}] ('{}') has an empty widget name",
                    rule.pattern
                )));
            }
        }
        Ok(())
    }

    /// Help file base name: the configured value, or the project name
    /// reduced to lowercase alphanumerics plus `doc`.
    pub fn htmlhelp_basename(&self) -> String {
        match &self.htmlhelp_basename {
            Some(name) => name.clone(),
            None => {
                let stem: String = self
                    .project
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                format!("{stem}doc")
            }
        }
    }
}

/// Theme selection and theme-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme identifier, interpreted by the engine.
    pub name: String,
    /// Extra directories the engine searches for themes.
    pub path: Vec<String>,
    /// Option name → value. Keys are not validated here.
    pub options: BTreeMap<String, ThemeValue>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "alabaster".to_string(),
            path: Vec::new(),
            options: BTreeMap::new(),
        }
    }
}

/// A single theme option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    Bool(bool),
    Integer(i64),
    String(String),
    Links(Vec<NavLink>),
}

impl fmt::Display for ThemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeValue::Bool(b) => write!(f, "{b}"),
            ThemeValue::Integer(n) => write!(f, "{n}"),
            ThemeValue::String(s) => write!(f, "{s:?}"),
            ThemeValue::Links(links) => {
                let parts: Vec<String> = links.iter().map(NavLink::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// A navbar link: either a page id or, when `absolute`, an arbitrary URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub target: String,
    #[serde(default)]
    pub absolute: bool,
}

impl fmt::Display for NavLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "{} → <{}>", self.label, self.target)
        } else {
            write!(f, "{} → {}", self.label, self.target)
        }
    }
}

/// Maps pages matching `pattern` to an ordered list of sidebar widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarRule {
    pub pattern: String,
    #[serde(default)]
    pub widgets: Vec<String>,
}

/// Parse and validate a config file. Does not touch the version file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `conf.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Documentation Site Configuration
# =================================
# All settings are optional. Values shown below are the defaults.
#
# The project version is read from ../.version (relative to this file)
# and used verbatim as both version and release.
#
# Unknown keys will cause an error.

project = ""
author = ""
copyright = ""

# Page id of the root document.
master_doc = "index"

# Extension of source files. Page ids are source paths without it.
source_suffix = ".rst"

# Content language, passed through to the engine.
# language = "en"

# Syntax highlighting style.
pygments_style = "sphinx"

# Whether todo directives produce output.
todo_include_todos = false

# Extension modules to activate, in order.
extensions = []

# Directories holding custom templates.
templates_path = ["_templates"]

# Pages left out of the build. '*' matches any characters, including '/'.
# 'talk/*' matches every page under talk/ but not 'talking-points'.
exclude_patterns = ["_build/*", "Thumbs.db", ".DS_Store"]

# Static overlay directories. Copied after the theme's own static files;
# later entries overwrite earlier ones on file name clashes.
static_paths = ["_static"]

# Extra stylesheets, relative to the static directories.
stylesheets = []

# Base name for generated help files. Defaults to the project name + "doc".
# htmlhelp_basename = "projectdoc"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
name = "alabaster"

# Extra directories the engine searches for themes.
path = []

# Theme-specific options. Values may be strings, booleans, integers, or
# lists of links: { label = "...", target = "...", absolute = true }.
[theme.options]

# ---------------------------------------------------------------------------
# Sidebars
# ---------------------------------------------------------------------------
# Rules are tried top to bottom and the FIRST matching pattern wins.
# Declare specific patterns before general ones; a rule shadowed by an
# earlier one is reported as a warning.
#
# [[sidebars]]
# pattern = "tutorial/*"
# widgets = ["localtoc.html"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.master_doc, "index");
        assert_eq!(config.source_suffix, ".rst");
        assert_eq!(config.theme.name, "alabaster");
        assert_eq!(config.static_paths, vec!["_static"]);
        assert!(config.sidebars.is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(r#"project = "brig""#).unwrap();
        assert_eq!(config.project, "brig");
        // Defaults preserved
        assert_eq!(config.theme.name, "alabaster");
        assert_eq!(config.exclude_patterns.len(), 3);
    }

    #[test]
    fn sidebars_keep_declaration_order() {
        let toml = r#"
[[sidebars]]
pattern = "tutorial/*"
widgets = ["localtoc.html"]

[[sidebars]]
pattern = "faq*"
widgets = ["localtoc.html", "relations.html"]

[[sidebars]]
pattern = "contributing*"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let patterns: Vec<&str> = config.sidebars.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["tutorial/*", "faq*", "contributing*"]);
        assert_eq!(config.sidebars[1].widgets, vec!["localtoc.html", "relations.html"]);
        assert!(config.sidebars[2].widgets.is_empty());
    }

    #[test]
    fn parse_theme_options_of_every_kind() {
        let toml = r#"
[theme]
name = "bootstrap"

[theme.options]
navbar_title = "brig"
navbar_sidebarrel = false
globaltoc_depth = 2
navbar_links = [
    { label = "GitHub", target = "https://github.com/sahib/brig", absolute = true },
    { label = "FAQ", target = "faq" },
]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let options = &config.theme.options;
        assert_eq!(options["navbar_title"], ThemeValue::String("brig".into()));
        assert_eq!(options["navbar_sidebarrel"], ThemeValue::Bool(false));
        assert_eq!(options["globaltoc_depth"], ThemeValue::Integer(2));
        match &options["navbar_links"] {
            ThemeValue::Links(links) => {
                assert_eq!(links.len(), 2);
                assert!(links[0].absolute);
                assert_eq!(links[1].target, "faq");
                assert!(!links[1].absolute);
            }
            other => panic!("expected links, got {other:?}"),
        }
    }

    #[test]
    fn theme_value_display() {
        assert_eq!(ThemeValue::String("flatly".into()).to_string(), "\"flatly\"");
        assert_eq!(ThemeValue::Integer(-1).to_string(), "-1");
        let links = ThemeValue::Links(vec![NavLink {
            label: "GitHub".into(),
            target: "https://github.com".into(),
            absolute: true,
        }]);
        assert_eq!(links.to_string(), "[GitHub → <https://github.com>]");
    }

    #[test]
    fn htmlhelp_basename_defaults_from_project() {
        let mut config = SiteConfig::default();
        config.project = "My Project-2".to_string();
        assert_eq!(config.htmlhelp_basename(), "myproject2doc");

        config.htmlhelp_basename = Some("brigdoc".to_string());
        assert_eq!(config.htmlhelp_basename(), "brigdoc");
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(r#"exclude_pattern = []"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_theme_key_rejected() {
        let toml = r#"
[theme]
nmae = "bootstrap"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_sidebar_key_rejected() {
        let toml = r#"
[[sidebars]]
pattern = "faq*"
widget = ["localtoc.html"]
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_theme_option_keys_are_accepted() {
        let toml = r#"
[theme.options]
whatever_the_theme_wants = "yes"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.options.len(), 1);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_theme_name() {
        let mut config = SiteConfig::default();
        config.theme.name = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("theme.name"));
    }

    #[test]
    fn validate_source_suffix_needs_dot() {
        let mut config = SiteConfig::default();
        config.source_suffix = "rst".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_duplicate_extension() {
        let mut config = SiteConfig::default();
        config.extensions = vec!["sphinx.ext.todo".into(), "sphinx.ext.todo".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sphinx.ext.todo"));
    }

    #[test]
    fn validate_empty_sidebar_pattern() {
        let mut config = SiteConfig::default();
        config.sidebars.push(SidebarRule {
            pattern: String::new(),
            widgets: vec!["localtoc.html".into()],
        });
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_widget_name() {
        let mut config = SiteConfig::default();
        config.sidebars.push(SidebarRule {
            pattern: "faq*".into(),
            widgets: vec![String::new()],
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_exclude_pattern() {
        let mut config = SiteConfig::default();
        config.exclude_patterns.push(String::new());
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conf.toml");
        fs::write(
            &path,
            r#"
project = "brig"
extensions = ["sphinx.ext.mathjax", "sphinx.ext.todo"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.project, "brig");
        assert_eq!(config.extensions, vec!["sphinx.ext.mathjax", "sphinx.ext.todo"]);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("conf.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conf.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conf.toml");
        fs::write(&path, r#"source_suffix = "md""#).unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.master_doc, defaults.master_doc);
        assert_eq!(config.exclude_patterns, defaults.exclude_patterns);
        assert_eq!(config.static_paths, defaults.static_paths);
        assert_eq!(config.theme, defaults.theme);
        assert!(config.sidebars.is_empty());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[theme]"));
        assert!(content.contains("[theme.options]"));
        assert!(content.contains("[[sidebars]]"));
    }
}
