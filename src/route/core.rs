use regex::Regex;
use std::collections::HashMap;
use std::fmt;

use crate::error::RouterError;
use crate::method::MethodMask;

/// One piece of a canonical route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text matched verbatim.
    Literal(String),
    /// A named placeholder, written `{name}` in the canonical path.
    Param(String),
}

/// Compiled description of one path template.
///
/// The canonical path, parameter order and regex are fixed at parse time.
/// After that a route only gains defaults (via [`Route::set`]) or has a
/// placeholder pattern replaced (via [`Route::specify`], which recompiles).
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    template: String,
    path: String,
    segments: Vec<Segment>,
    method: Option<MethodMask>,
    /// name -> regex fragment, in declaration order (= capture group order)
    patterns: Vec<(String, String)>,
    /// Unanchored alternation body; `None` for static routes.
    regex_source: Option<String>,
    regex: Option<Regex>,
    defaults: HashMap<String, String>,
}

impl Route {
    pub(crate) fn compile(
        template: &str,
        segments: Vec<Segment>,
        patterns: Vec<(String, String)>,
        method: Option<MethodMask>,
    ) -> Result<Self, RouterError> {
        let path = segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Param(name) => format!("{{{name}}}"),
            })
            .collect();

        let mut route = Self {
            name: String::new(),
            template: template.to_string(),
            path,
            segments,
            method,
            patterns,
            regex_source: None,
            regex: None,
            defaults: HashMap::new(),
        };
        route.rebuild_regex()?;
        Ok(route)
    }

    /// Escape literals, splice `(pattern)` in for placeholders, compile.
    fn rebuild_regex(&mut self) -> Result<(), RouterError> {
        if self.patterns.is_empty() {
            self.regex_source = None;
            self.regex = None;
            return Ok(());
        }

        let mut source = String::with_capacity(self.path.len() + 8 * self.patterns.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Param(name) => {
                    let pattern = self
                        .patterns
                        .iter()
                        .find(|(n, _)| n == name)
                        .map(|(_, p)| p.as_str())
                        .unwrap_or_default();
                    source.push('(');
                    source.push_str(pattern);
                    source.push(')');
                }
            }
        }

        let anchored = format!("^{source}$");
        let regex = Regex::new(&anchored).map_err(|source| RouterError::InvalidPattern {
            pattern: anchored.clone(),
            source,
        })?;
        self.regex_source = Some(source);
        self.regex = Some(regex);
        Ok(())
    }

    /// Check that a placeholder fragment compiles and opens no capture groups.
    pub(crate) fn validate_pattern(name: &str, pattern: &str) -> Result<(), RouterError> {
        let compiled = Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        // captures_len() counts the implicit whole-match group
        if compiled.captures_len() > 1 {
            return Err(RouterError::CapturingGroup {
                name: name.to_string(),
                pattern: pattern.to_string(),
            });
        }
        Ok(())
    }

    /// Override the regex fragment for the placeholder `name`.
    ///
    /// The route is recompiled immediately. Names that do not occur in the
    /// template are ignored, which lets callers push one pattern map into
    /// many routes.
    pub fn specify(&mut self, name: &str, pattern: &str) -> Result<&mut Self, RouterError> {
        let Some(index) = self.patterns.iter().position(|(n, _)| n == name) else {
            return Ok(self);
        };
        Self::validate_pattern(name, pattern)?;
        let previous = std::mem::replace(&mut self.patterns[index].1, pattern.to_string());
        if let Err(err) = self.rebuild_regex() {
            self.patterns[index].1 = previous;
            return Err(err);
        }
        Ok(self)
    }

    /// Route name; empty until the route is registered with a router.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// The template exactly as it was registered.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Canonical path with every placeholder written as `{name}`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Declared parameter names in capture-group order.
    #[must_use]
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn parameter_patterns(&self) -> &[(String, String)] {
        &self.patterns
    }

    /// Anchored regex for this route alone; `None` when static.
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// Unanchored regex body used to build combined chunk patterns.
    #[must_use]
    pub fn regex_source(&self) -> Option<&str> {
        self.regex_source.as_deref()
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `None` means the route accepts every method.
    #[must_use]
    pub fn method(&self) -> Option<MethodMask> {
        self.method
    }

    /// Restrict the route to `bits`; fails outside `[1, ALL]`.
    pub fn set_method(&mut self, bits: u8) -> Result<&mut Self, RouterError> {
        self.method = Some(MethodMask::new(bits)?);
        Ok(self)
    }

    /// True for a wildcard caller, an unrestricted route, or overlapping masks.
    #[must_use]
    pub fn is_method(&self, mask: Option<MethodMask>) -> bool {
        match (mask, self.method) {
            (None, _) | (_, None) => true,
            (Some(requested), Some(accepted)) => accepted.intersects(requested),
        }
    }

    /// Add a default value. A key that is already present keeps its value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.defaults.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Merge many defaults with the same first-write-wins rule as [`Route::set`].
    pub fn add_parameters<I, K, V>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in parameters {
            self.set(key, value);
        }
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    /// Write the canonical path with each placeholder replaced by its value.
    ///
    /// Placeholders without a value are left as `{name}`.
    pub(crate) fn interpolate(&self, values: &HashMap<&str, &str>) -> String {
        let mut out = String::with_capacity(self.path.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(name) => match values.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            Some(mask) => write!(f, "{mask} {}", self.path),
            None => write!(f, "ANY {}", self.path),
        }
    }
}
