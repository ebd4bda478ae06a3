use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::core::{Route, Segment};
use crate::config::DEFAULT_PATTERN;
use crate::error::RouterError;
use crate::method::MethodMask;

/// Matches `{name}` and `{name:pattern}`; the pattern may itself contain one
/// level of braces so that quantifiers like `\d{2,4}` survive. Backslash
/// escapes are skipped whole, so `\}` inside a pattern does not close it.
#[allow(clippy::expect_used)]
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?::\s*((?:\\.|[^{}\\]|\{(?:\\.|[^{}\\])*\})*?)\s*)?\}")
        .expect("placeholder scanner regex is valid")
});

/// Turns raw templates into compiled [`Route`]s.
#[derive(Debug, Clone)]
pub struct RouteParser {
    default_pattern: String,
}

impl Default for RouteParser {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl RouteParser {
    /// `default_pattern` is used for placeholders without an inline pattern.
    #[must_use]
    pub fn new(default_pattern: impl Into<String>) -> Self {
        Self {
            default_pattern: default_pattern.into(),
        }
    }

    #[must_use]
    pub fn default_pattern(&self) -> &str {
        &self.default_pattern
    }

    /// Parse `template` into a route accepting `method` (`None` = any verb).
    ///
    /// Every `{name}` / `{name:pattern}` is normalised to `{name}` and its
    /// pattern recorded in declaration order. Templates without placeholders
    /// produce a static route with no regex.
    pub fn parse(&self, template: &str, method: Option<MethodMask>) -> Result<Route, RouterError> {
        let mut segments = Vec::new();
        let mut patterns: Vec<(String, String)> = Vec::new();
        let mut cursor = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                segments.push(Segment::Literal(template[cursor..whole.start()].to_string()));
            }
            cursor = whole.end();

            let name = name.as_str();
            if patterns.iter().any(|(n, _)| n == name) {
                return Err(RouterError::DuplicatePlaceholder {
                    name: name.to_string(),
                    template: template.to_string(),
                });
            }
            let pattern = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|p| !p.is_empty())
                .unwrap_or(&self.default_pattern);
            Route::validate_pattern(name, pattern)?;

            segments.push(Segment::Param(name.to_string()));
            patterns.push((name.to_string(), pattern.to_string()));
        }
        if cursor < template.len() {
            segments.push(Segment::Literal(template[cursor..].to_string()));
        }

        let route = Route::compile(template, segments, patterns, method)?;
        debug!(
            template = %template,
            path = %route.path(),
            parameters = route.parameter_count(),
            is_static = route.is_static(),
            "Parsed route template"
        );
        Ok(route)
    }
}
