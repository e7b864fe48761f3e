//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity (page, rule, overlay file) leads with its identity; where
//! it came from is shown as indented context. Positional indices are
//! 3-digit and 1-based, matching declaration order, so `003` in the output
//! is the third `[[sidebars]]` table in `conf.toml`.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Site brig 0.4.1
//!     Config: docs/conf.toml
//!     Theme: bootstrap (14 options)
//!     Extensions: 5
//!
//! Sidebars
//! 001 tutorial/* → localtoc.html
//! 002 faq* → localtoc.html
//!
//! Excludes
//!     _build/*
//!     talk/*
//!
//! Static overlays
//! 001 docs/_static
//!
//! Warnings
//!     sidebars[3] 'faq' is unreachable: ...
//! ```
//!
//! ## Resolve / Scan
//!
//! ```text
//! tutorial/intro → localtoc.html
//!     Rule: tutorial/*
//! talk/2018-intro (excluded)
//!     Pattern: talk/*
//! index (no sidebar)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::overlay::OverlayPlan;
use crate::resolver::{Resolution, SiteConfigResolver};
use crate::scan::PageEntry;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn widget_list(widgets: &[String]) -> String {
    if widgets.is_empty() {
        "(none)".to_string()
    } else {
        widgets.join(", ")
    }
}

/// Header line + context lines for one page.
fn page_lines(page_id: &str, excluded_by: Option<&str>, rule: Option<&str>, widgets: &[String]) -> Vec<String> {
    match (excluded_by, rule) {
        (Some(pattern), _) => vec![
            format!("{page_id} (excluded)"),
            format!("    Pattern: {pattern}"),
        ],
        (None, Some(rule)) => vec![
            format!("{page_id} → {}", widget_list(widgets)),
            format!("    Rule: {rule}"),
        ],
        (None, None) => vec![format!("{page_id} (no sidebar)")],
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summarize a loaded configuration, including lints.
pub fn format_check_output(resolver: &SiteConfigResolver) -> Vec<String> {
    let config = resolver.config();
    let theme = resolver.effective_theme();
    let mut lines = Vec::new();

    let name = if config.project.is_empty() {
        "(unnamed)"
    } else {
        config.project.as_str()
    };
    lines.push(format!("Site {} {}", name, resolver.version().as_str().trim_end()));
    lines.push(format!("    Config: {}", resolver.config_path().display()));
    lines.push(format!("    Theme: {} ({} options)", theme.name, theme.options.len()));
    lines.push(format!("    Extensions: {}", resolver.extensions().len()));
    lines.push(format!("    Help basename: {}", resolver.htmlhelp_basename()));

    lines.push(String::new());
    lines.push("Sidebars".to_string());
    if resolver.sidebar_rules().is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, rule) in resolver.sidebar_rules().iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            rule.pattern,
            widget_list(&rule.widgets)
        ));
    }

    if !resolver.exclude_patterns().is_empty() {
        lines.push(String::new());
        lines.push("Excludes".to_string());
        for pattern in resolver.exclude_patterns() {
            lines.push(format!("    {pattern}"));
        }
    }

    if !resolver.effective_static_overlays().is_empty() {
        lines.push(String::new());
        lines.push("Static overlays".to_string());
        for (i, dir) in resolver.effective_static_overlays().iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), dir.display()));
        }
    }

    if !resolver.lints().is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for lint in resolver.lints() {
            lines.push(format!("    {lint}"));
        }
    }

    lines
}

pub fn print_check_output(resolver: &SiteConfigResolver) {
    for line in format_check_output(resolver) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

/// Resolve each requested page id and format the result.
pub fn format_resolve_output(resolver: &SiteConfigResolver, page_ids: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for page_id in page_ids {
        let page = match resolver.resolve(page_id) {
            Resolution::Excluded { pattern } => page_lines(page_id, Some(pattern), None, &[]),
            Resolution::Rendered { rule, widgets } => {
                page_lines(page_id, None, rule.map(|r| r.pattern.as_str()), widgets)
            }
        };
        lines.extend(page);
    }
    lines
}

pub fn print_resolve_output(resolver: &SiteConfigResolver, page_ids: &[String]) {
    for line in format_resolve_output(resolver, page_ids) {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format scanned pages, followed by a one-line summary.
pub fn format_scan_output(pages: &[PageEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for page in pages {
        lines.extend(page_lines(
            &page.page_id,
            page.excluded_by.as_deref(),
            page.rule.as_deref(),
            &page.widgets,
        ));
    }
    let excluded = pages.iter().filter(|p| p.is_excluded()).count();
    let with_sidebar = pages.iter().filter(|p| p.rule.is_some() && !p.is_excluded()).count();
    lines.push(String::new());
    lines.push(format!(
        "{} pages, {} excluded, {} with sidebar",
        pages.len(),
        excluded,
        with_sidebar
    ));
    lines
}

pub fn print_scan_output(pages: &[PageEntry]) {
    for line in format_scan_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Overlays
// ============================================================================

/// Format an overlay plan: layers in order, then each file with its winner.
pub fn format_overlay_output(plan: &OverlayPlan) -> Vec<String> {
    let mut lines = vec!["Layers".to_string()];
    for (i, layer) in plan.layers().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), layer.display()));
    }
    lines.push(String::new());
    lines.push("Files".to_string());
    for (rel, source) in plan.iter() {
        lines.push(format!("    {}", rel.display()));
        lines.push(format!("        Source: {}", source.display()));
    }
    lines
}

pub fn print_overlay_output(plan: &OverlayPlan) {
    for line in format_overlay_output(plan) {
        println!("{}", line);
    }
}
