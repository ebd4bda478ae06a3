//! # Router Module
//!
//! The router module owns the route registry and the two read-only services
//! built on top of it: path matching and path generation.
//!
//! ## Overview
//!
//! - [`Router`] - registry of named routes. Keeps a name index for every
//!   route and a literal-path index for static routes. Applies the configured
//!   prefix/suffix to routes added through the verb helpers, and merges
//!   global default values into routes added after they were set.
//! - [`RouteMatcher`] - resolves `(path, method)` to a [`Match`].
//! - [`RouteGenerator`] - resolves `(name, parameters)` to a path string.
//!
//! ## Matching
//!
//! Matching runs in two tiers:
//!
//! 1. **Static lookup**: the literal-path index is consulted first; a hit
//!    whose method mask overlaps the request is returned without running any
//!    regex.
//!
//! 2. **Chunked dynamic matching**: dynamic routes are grouped into chunks of
//!    `chunk_size` (default 10). Each chunk is compiled into a single
//!    alternation where every alternative is padded with empty `()` groups to
//!    the same width. After one regex run the index of the last populated
//!    group identifies which alternative fired, and therefore which route.
//!    Chunks and alternatives are both in registration order, so the first
//!    registered route that accepts the path wins.
//!
//! ## Example
//!
//! ```rust
//! use waypoint::{MethodMask, Router};
//!
//! let mut router = Router::new();
//! router.add(r"/users/{id:\d+}", MethodMask::GET, Some("user")).unwrap();
//!
//! let matcher = router.matcher().unwrap();
//! let found = matcher.match_path("/users/42", Some(MethodMask::GET)).unwrap();
//! assert_eq!(found.name(), "user");
//! assert_eq!(found.get("id"), Some("42"));
//! assert!(matcher.match_path("/users/abc", Some(MethodMask::GET)).is_none());
//!
//! let path = router.generator().generate("user", [("id", "7")]).unwrap();
//! assert_eq!(path, "/users/7");
//! ```
//!
//! ## Concurrency
//!
//! Registration takes `&mut Router`. Matchers and generators borrow the
//! router immutably, so the borrow checker enforces that registration has
//! finished before any match or generate call, and both may be shared
//! across threads freely.

mod core;
mod generator;
mod matcher;

pub use core::{Match, Router};
pub use generator::RouteGenerator;
pub use matcher::RouteMatcher;
