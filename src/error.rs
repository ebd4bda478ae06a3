use thiserror::Error;

/// Errors raised while registering routes or generating paths.
///
/// Failing to match a path is not an error; [`crate::RouteMatcher::match_path`]
/// returns `None` for that case.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route is registered under this name.
    #[error("route '{0}' not found")]
    RouteNotFound(String),

    /// No static route is registered at this literal path.
    #[error("no static route registered for uri '{0}'")]
    StaticRouteNotFound(String),

    /// Route names are unique per collection.
    #[error("a route named '{0}' is already registered")]
    DuplicateRoute(String),

    /// Every required placeholder left unresolved after applying defaults.
    #[error("cannot generate route '{route}': missing parameters {}", .names.join(", "))]
    MissingParameters { route: String, names: Vec<String> },

    #[error("method mask {0} is outside the range [1, 15]")]
    InvalidMethodMask(u8),

    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A placeholder name may appear only once per template.
    #[error("placeholder '{name}' appears more than once in '{template}'")]
    DuplicatePlaceholder { name: String, template: String },

    /// Placeholder patterns must not open capturing groups of their own.
    #[error("pattern '{pattern}' for placeholder '{name}' contains a capturing group; use (?:...) instead")]
    CapturingGroup { name: String, pattern: String },
}
