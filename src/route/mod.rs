//! # Route Module
//!
//! A [`Route`] is the compiled form of one path template such as
//! `/users/{id:\d+}/posts/{slug}`. [`RouteParser`] produces routes from raw
//! templates.
//!
//! ## Template Syntax
//!
//! - `{name}` - placeholder matched by the configured default pattern
//!   (`[^/]+` unless overridden)
//! - `{name:pattern}` - placeholder with an inline regex fragment
//! - anything else is literal text and is matched exactly
//!
//! ## Compilation
//!
//! Routes are compiled when they are parsed. A template without placeholders
//! is *static*: it is matched by string equality and never builds a regex.
//! A template with placeholders gets a regex built by escaping every literal
//! segment and splicing `(pattern)` in for each placeholder, left to right.
//! Capture group `n` therefore always belongs to the `n`-th declared
//! parameter name.
//!
//! [`Route::specify`] replaces a placeholder pattern after parsing and
//! recompiles immediately, so the regex can never go stale.
//!
//! ```rust
//! use waypoint::{MethodMask, RouteParser};
//!
//! let route = RouteParser::default()
//!     .parse(r"/users/{id:\d+}", Some(MethodMask::GET))
//!     .unwrap();
//! assert_eq!(route.path(), "/users/{id}");
//! assert_eq!(route.parameter_names().collect::<Vec<_>>(), vec!["id"]);
//! assert!(route.regex().unwrap().is_match("/users/42"));
//! ```

mod core;
mod parser;
#[cfg(test)]
mod tests;

pub use core::{Route, Segment};
pub use parser::RouteParser;
