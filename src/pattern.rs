//! Glob patterns for page identifiers.
//!
//! The grammar is deliberately tiny: `*` matches any run of characters
//! (including `/`), every other character matches itself. Matching is
//! case-sensitive and performs no path normalization.
//!
//! - `"talk/*"` → matches `talk/2018-keynote`, `talk/a/b`; not `talking-points`
//! - `"faq*"` → matches `faq`, `faq-old`, `faq/more`
//! - `"index"` → matches only `index`
//!
//! Besides matching, [`Pattern::subsumes`] answers whether one pattern
//! matches every page another pattern could match. The resolver uses this
//! to flag sidebar rules that can never fire.

use std::fmt;

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    Star,
}

/// A compiled glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile a pattern. Consecutive stars collapse into one.
    pub fn new(source: &str) -> Self {
        let mut tokens = Vec::with_capacity(source.len());
        for c in source.chars() {
            if c == '*' {
                if tokens.last() != Some(&Token::Star) {
                    tokens.push(Token::Star);
                }
            } else {
                tokens.push(Token::Literal(c));
            }
        }
        Self {
            source: source.to_string(),
            tokens,
        }
    }

    /// The pattern text as written in the config.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the pattern contains no wildcard.
    pub fn is_literal(&self) -> bool {
        !self.tokens.contains(&Token::Star)
    }

    /// Match a page identifier against this pattern.
    pub fn matches(&self, page_id: &str) -> bool {
        let text: Vec<Token> = page_id.chars().map(Token::Literal).collect();
        match_tokens(&self.tokens, &text)
    }

    /// True if every string matched by `other` is also matched by `self`.
    ///
    /// Works by matching `self` against `other`'s token sequence, where a
    /// star in `other` can only be consumed by a star in `self`. For a
    /// star-only grammar this is exact, not an approximation.
    pub fn subsumes(&self, other: &Pattern) -> bool {
        match_tokens(&self.tokens, &other.tokens)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Greedy wildcard matching with single-point backtracking.
///
/// `text` may itself contain `Star` tokens (see [`Pattern::subsumes`]);
/// those are only ever consumed by a pattern star.
fn match_tokens(pattern: &[Token], text: &[Token]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(Token::Star) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(Token::Literal(c)) if text[t] == Token::Literal(*c) => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                // Let the last star swallow one more token and retry.
                Some((star_p, star_t)) => {
                    p = star_p + 1;
                    t = star_t + 1;
                    backtrack = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|tok| *tok == Token::Star)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pattern: &str, page: &str) -> bool {
        Pattern::new(pattern).matches(page)
    }

    #[test]
    fn literal_matches_only_itself() {
        assert!(m("index", "index"));
        assert!(!m("index", "index2"));
        assert!(!m("index", "inde"));
    }

    #[test]
    fn trailing_star_matches_any_suffix() {
        assert!(m("faq*", "faq"));
        assert!(m("faq*", "faq-old"));
        assert!(m("faq*", "faq/nested/page"));
        assert!(!m("faq*", "the-faq"));
    }

    #[test]
    fn directory_prefix_respects_separator() {
        assert!(m("talk/*", "talk/2018-keynote"));
        assert!(m("talk/*", "talk/2018/intro"));
        assert!(!m("talk/*", "talking-points"));
        assert!(!m("talk/*", "talk"));
    }

    #[test]
    fn star_crosses_path_separators() {
        assert!(m("*/index", "a/b/c/index"));
        assert!(m("docs/*/intro", "docs/v1/guide/intro"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!m("Tutorial/*", "tutorial/intro"));
    }

    #[test]
    fn no_path_normalization() {
        assert!(!m("talk/*", "./talk/intro"));
        assert!(m("talk/*", "talk/../secret"));
    }

    #[test]
    fn lone_star_matches_everything() {
        assert!(m("*", ""));
        assert!(m("*", "anything/at/all"));
    }

    #[test]
    fn inner_star_needs_backtracking() {
        assert!(m("a*b*c", "aXbYbZc"));
        assert!(!m("a*b*c", "aXbYbZ"));
        assert!(m("*.rst", "talk/a.b.rst"));
    }

    #[test]
    fn empty_pattern_matches_empty_page() {
        assert!(m("", ""));
        assert!(!m("", "index"));
    }

    #[test]
    fn consecutive_stars_collapse() {
        assert_eq!(Pattern::new("a**b").tokens, Pattern::new("a*b").tokens);
        assert_eq!(Pattern::new("a**b").as_str(), "a**b");
    }

    #[test]
    fn is_literal() {
        assert!(Pattern::new("tutorial/advanced").is_literal());
        assert!(!Pattern::new("tutorial/*").is_literal());
    }

    // =========================================================================
    // Subsumption
    // =========================================================================

    fn s(general: &str, specific: &str) -> bool {
        Pattern::new(general).subsumes(&Pattern::new(specific))
    }

    #[test]
    fn identical_patterns_subsume_each_other() {
        assert!(s("tutorial/*", "tutorial/*"));
        assert!(s("faq", "faq"));
    }

    #[test]
    fn prefix_subsumes_literal_under_it() {
        assert!(s("tutorial/*", "tutorial/advanced"));
        assert!(!s("tutorial/advanced", "tutorial/*"));
    }

    #[test]
    fn shorter_prefix_subsumes_longer_prefix() {
        assert!(s("tutorial*", "tutorial/*"));
        assert!(!s("tutorial/*", "tutorial*"));
    }

    #[test]
    fn star_subsumes_everything() {
        assert!(s("*", "quickstart*"));
        assert!(s("*", "*"));
    }

    #[test]
    fn unrelated_prefixes_do_not_subsume() {
        assert!(!s("faq*", "roadmap*"));
        assert!(!s("quickstart*", "installation*"));
    }

    #[test]
    fn suffix_pattern_subsumption() {
        assert!(s("*.rst", "talk/*.rst"));
        assert!(!s("talk/*.rst", "*.rst"));
    }
}
