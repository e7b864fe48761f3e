//! Per-page resolution over a loaded configuration.
//!
//! [`SiteConfigResolver`] is the object the build engine holds on to. It is
//! built once by [`SiteConfigResolver::load`], never mutated afterwards, and
//! answers two questions for every page the engine renders:
//!
//! 1. Is the page excluded? Any matching `exclude_patterns` entry wins.
//! 2. Which sidebar widgets does it get? The FIRST rule in declaration order
//!    whose pattern matches. Not the longest match, not the most specific
//!    one. No match means no sidebar.
//!
//! ## Load Order
//!
//! ```text
//! ../.version   →  conf.toml  →  validate  →  compile patterns  →  lints
//! ```
//!
//! The version file is read before the config file is even opened, so a
//! missing version always surfaces as [`ConfigError::VersionFile`]. Loading
//! is all-or-nothing: on error no resolver exists.
//!
//! ## Lints
//!
//! Rules that can never fire are reported as [`Lint`]s, logged at `warn`
//! level during load, and kept for later inspection. They never fail the
//! load.

use crate::config::{self, ConfigError, SidebarRule, SiteConfig, ThemeConfig};
use crate::engine::Engine;
use crate::pattern::Pattern;
use crate::version::{self, VersionString};
use serde::Serialize;
use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// A non-fatal configuration problem found at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Lint {
    /// An earlier sidebar rule matches every page this one could match.
    DeadRule {
        index: usize,
        pattern: String,
        shadowed_by: usize,
        shadowing_pattern: String,
    },
    /// Every page this sidebar rule could match is excluded from the build.
    ExcludedRule {
        index: usize,
        pattern: String,
        exclude: String,
    },
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lint::DeadRule {
                index,
                pattern,
                shadowed_by,
                shadowing_pattern,
            } => write!(
                f,
                "sidebars[{index}] '{pattern}' is unreachable: sidebars[{shadowed_by}] '{shadowing_pattern}' already matches every page it would"
            ),
            Lint::ExcludedRule {
                index,
                pattern,
                exclude,
            } => write!(
                f,
                "sidebars[{index}] '{pattern}' only matches pages excluded by '{exclude}'"
            ),
        }
    }
}

/// Outcome of resolving a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The page is left out of the build.
    Excluded { pattern: &'a str },
    /// The page renders; `rule` is the sidebar rule that matched, if any.
    Rendered {
        rule: Option<&'a SidebarRule>,
        widgets: &'a [String],
    },
}

/// Immutable, fully validated site configuration.
#[derive(Debug)]
pub struct SiteConfigResolver {
    config_path: PathBuf,
    config_dir: PathBuf,
    version: VersionString,
    config: SiteConfig,
    excludes: Vec<Pattern>,
    rules: Vec<Pattern>,
    static_overlays: Vec<PathBuf>,
    lints: Vec<Lint>,
}

impl SiteConfigResolver {
    /// Load the version file and `conf.toml`, validate, and lint.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let version = version::read_version(&config_dir)?;
        let config = config::load_config(config_path)?;

        let excludes: Vec<Pattern> = config
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect();
        let rules: Vec<Pattern> = config
            .sidebars
            .iter()
            .map(|r| Pattern::new(&r.pattern))
            .collect();
        let static_overlays = config
            .static_paths
            .iter()
            .map(|p| config_dir.join(p))
            .collect();

        let lints = lint_rules(&rules, &excludes);
        for lint in &lints {
            tracing::warn!(config = %config_path.display(), "{lint}");
        }

        tracing::debug!(
            config = %config_path.display(),
            version = version.as_str().trim_end(),
            theme = %config.theme.name,
            rules = rules.len(),
            excludes = excludes.len(),
            "loaded site configuration"
        );

        Ok(Self {
            config_path: config_path.to_path_buf(),
            config_dir,
            version,
            config,
            excludes,
            rules,
            static_overlays,
            lints,
        })
    }

    /// True iff `page_id` matches any exclude pattern.
    pub fn is_excluded(&self, page_id: &str) -> bool {
        self.excluding_pattern(page_id).is_some()
    }

    /// The first exclude pattern matching `page_id`.
    pub fn excluding_pattern(&self, page_id: &str) -> Option<&str> {
        self.excludes
            .iter()
            .find(|p| p.matches(page_id))
            .map(Pattern::as_str)
    }

    /// Widgets of the first sidebar rule matching `page_id`, in declaration
    /// order. Empty when nothing matches.
    ///
    /// Exclusion is not consulted; check [`Self::is_excluded`] first.
    pub fn resolve_sidebar(&self, page_id: &str) -> &[String] {
        self.matching_rule(page_id)
            .map(|(_, rule)| rule.widgets.as_slice())
            .unwrap_or(&[])
    }

    /// Index and rule that decide the sidebar for `page_id`.
    pub fn matching_rule(&self, page_id: &str) -> Option<(usize, &SidebarRule)> {
        let index = self.rules.iter().position(|p| p.matches(page_id))?;
        Some((index, &self.config.sidebars[index]))
    }

    /// Exclusion check followed by sidebar resolution.
    pub fn resolve(&self, page_id: &str) -> Resolution<'_> {
        if let Some(pattern) = self.excluding_pattern(page_id) {
            return Resolution::Excluded { pattern };
        }
        match self.matching_rule(page_id) {
            Some((_, rule)) => Resolution::Rendered {
                rule: Some(rule),
                widgets: &rule.widgets,
            },
            None => Resolution::Rendered {
                rule: None,
                widgets: &[],
            },
        }
    }

    /// The single, global theme configuration.
    pub fn effective_theme(&self) -> &ThemeConfig {
        &self.config.theme
    }

    /// Static overlay directories in composition order (later wins),
    /// resolved against the config directory.
    pub fn effective_static_overlays(&self) -> &[PathBuf] {
        &self.static_overlays
    }

    pub fn version(&self) -> &VersionString {
        &self.version
    }

    /// Identical to [`Self::version`].
    pub fn release(&self) -> &VersionString {
        &self.version
    }

    pub fn extensions(&self) -> &[String] {
        &self.config.extensions
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.config.exclude_patterns
    }

    pub fn sidebar_rules(&self) -> &[SidebarRule] {
        &self.config.sidebars
    }

    pub fn htmlhelp_basename(&self) -> String {
        self.config.htmlhelp_basename()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn lints(&self) -> &[Lint] {
        &self.lints
    }

    /// Map a source file path (relative to the docs directory) to its page id.
    ///
    /// Returns `None` when the file does not carry the configured source
    /// suffix. `docs/tutorial/intro.rst` → `tutorial/intro`.
    pub fn page_id(&self, source: &Path) -> Option<String> {
        let path = source.to_str()?;
        let stem = path.strip_suffix(self.config.source_suffix.as_str())?;
        if stem.is_empty() || stem.ends_with(MAIN_SEPARATOR) {
            return None;
        }
        Some(stem.replace(MAIN_SEPARATOR, "/"))
    }

    /// Check the theme and every widget against an engine.
    pub fn check_with(&self, engine: &dyn Engine) -> Result<(), ConfigError> {
        let theme = &self.config.theme.name;
        if !engine.has_theme(theme) {
            return Err(ConfigError::UnknownTheme {
                engine: engine.name().to_string(),
                theme: theme.clone(),
            });
        }
        for rule in &self.config.sidebars {
            if let Some(widget) = rule.widgets.iter().find(|w| !engine.has_widget(w)) {
                return Err(ConfigError::UnknownWidget {
                    engine: engine.name().to_string(),
                    widget: widget.clone(),
                    pattern: rule.pattern.clone(),
                });
            }
        }
        Ok(())
    }

    /// Everything the engine consumes, in one serializable view.
    pub fn engine_view(&self) -> EngineView<'_> {
        let config = &self.config;
        EngineView {
            project: &config.project,
            author: &config.author,
            copyright: &config.copyright,
            version: &self.version,
            release: &self.version,
            master_doc: &config.master_doc,
            source_suffix: &config.source_suffix,
            language: config.language.as_deref(),
            pygments_style: &config.pygments_style,
            todo_include_todos: config.todo_include_todos,
            extensions: &config.extensions,
            templates_path: &config.templates_path,
            exclude_patterns: &config.exclude_patterns,
            theme: &config.theme,
            sidebars: &config.sidebars,
            static_paths: &self.static_overlays,
            stylesheets: &config.stylesheets,
            htmlhelp_basename: config.htmlhelp_basename(),
            lints: &self.lints,
        }
    }
}

/// The configuration as handed to the build engine.
#[derive(Debug, Serialize)]
pub struct EngineView<'a> {
    pub project: &'a str,
    pub author: &'a str,
    pub copyright: &'a str,
    pub version: &'a VersionString,
    pub release: &'a VersionString,
    pub master_doc: &'a str,
    pub source_suffix: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
    pub pygments_style: &'a str,
    pub todo_include_todos: bool,
    pub extensions: &'a [String],
    pub templates_path: &'a [String],
    pub exclude_patterns: &'a [String],
    pub theme: &'a ThemeConfig,
    pub sidebars: &'a [SidebarRule],
    pub static_paths: &'a [PathBuf],
    pub stylesheets: &'a [String],
    pub htmlhelp_basename: String,
    pub lints: &'a [Lint],
}

/// One lint per unreachable rule at most: shadowing by an earlier rule
/// takes precedence over shadowing by an exclude pattern.
fn lint_rules(rules: &[Pattern], excludes: &[Pattern]) -> Vec<Lint> {
    let mut lints = Vec::new();
    for (index, rule) in rules.iter().enumerate() {
        if let Some(shadowed_by) = rules[..index].iter().position(|earlier| earlier.subsumes(rule)) {
            lints.push(Lint::DeadRule {
                index,
                pattern: rule.to_string(),
                shadowed_by,
                shadowing_pattern: rules[shadowed_by].to_string(),
            });
        } else if let Some(exclude) = excludes.iter().find(|ex| ex.subsumes(rule)) {
            lints.push(Lint::ExcludedRule {
                index,
                pattern: rule.to_string(),
                exclude: exclude.to_string(),
            });
        }
    }
    lints
}
