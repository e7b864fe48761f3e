//! # docsite
//!
//! The configuration layer of a static documentation build. It decides,
//! for every page the build engine renders, whether the page is built at
//! all and which sidebar widgets appear next to it, and it hands the engine
//! the theme, extensions, version and static overlays.
//!
//! ```text
//! project/.version ──┐
//!                    ├─► SiteConfigResolver ──► engine: is_excluded(page)
//! docs/conf.toml   ──┘        (immutable)              resolve_sidebar(page)
//!                                                      effective_theme()
//!                                                      effective_static_overlays()
//! ```
//!
//! Nothing here parses or renders documents. The engine owns that; this
//! crate only answers questions about configuration.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolver`] | [`SiteConfigResolver`]: load, lint, per-page resolution |
//! | [`config`] | `conf.toml` data model, validation, stock config |
//! | [`pattern`] | `*` glob matching and pattern subsumption |
//! | [`version`] | One-shot read of the `../.version` file |
//! | [`engine`] | Trait for the build engine's theme/widget catalog |
//! | [`overlay`] | Static overlay composition (later directories win) |
//! | [`scan`] | Walks a docs tree and resolves every source page |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## First Match Wins
//!
//! Sidebar rules are an ordered list and the first matching pattern
//! decides. There is no specificity ranking: whoever writes the config
//! puts specific patterns above general ones. Rules that can never fire
//! because an earlier rule covers them are reported as lints at load time.
//!
//! ## One Immutable Object
//!
//! All configuration lives in a single [`SiteConfigResolver`] built by
//! [`SiteConfigResolver::load`]. There are no setters and no globals; the
//! engine receives it by reference. It is `Send + Sync`, so rendering
//! workers can share it without locking.
//!
//! ## All or Nothing
//!
//! Loading reads the version file first, then the config, then validates.
//! Any failure aborts before a resolver exists, so the engine never sees a
//! partial configuration.

pub mod config;
pub mod engine;
pub mod logging;
pub mod output;
pub mod overlay;
pub mod pattern;
pub mod resolver;
pub mod scan;
pub mod version;

pub use resolver::SiteConfigResolver;

#[cfg(test)]
pub(crate) mod test_helpers;
