//! # waypoint
//!
//! **waypoint** is a named-route URL router: it maps request paths to route
//! names plus extracted parameters, and turns route names plus parameters
//! back into paths.
//!
//! ## Overview
//!
//! Routes are registered from path templates such as `/users/{id:\d+}`.
//! Static routes (no placeholders) are resolved through a hash lookup;
//! dynamic routes are folded into a few combined regular expressions so a
//! lookup costs one regex scan per chunk of routes rather than one per route.
//!
//! ## Architecture
//!
//! - **[`route`]** - [`Route`] and the [`RouteParser`] that compiles templates
//! - **[`router`]** - the [`Router`] registry, the chunked [`RouteMatcher`]
//!   and the reverse [`RouteGenerator`]
//! - **[`resource`]** - [`Resource`] expands REST conventions into routes
//! - **[`method`]** - the [`MethodMask`] verb bitset
//! - **[`config`]** - [`RouterConfig`] (prefix, suffix, chunk size, ...)
//! - **[`table`]** - declarative YAML/JSON route tables
//! - **[`logging`]** / **[`cli`]** - the `waypoint` binary's plumbing
//!
//! ### Matching Flow
//!
//! ```text
//! path, method
//!     |
//!     v
//! static index hit with accepted method? --yes--> Match
//!     | no
//!     v
//! per-verb chunk tables: first chunk regex that matches
//!     |
//!     v
//! last populated group index -> route -> Match (defaults + captures)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use waypoint::{MethodMask, Router};
//!
//! let mut router = Router::new();
//! router.get("/users/{id:\\d+}", Some("user")).unwrap();
//! router.get("/about", Some("about")).unwrap();
//!
//! let matcher = router.matcher().unwrap();
//! let found = matcher.match_path("/users/42", Some(MethodMask::GET)).unwrap();
//! assert_eq!(found.name(), "user");
//! assert_eq!(found.get("id"), Some("42"));
//!
//! let url = router.generator().generate("user", [("id", "7")]).unwrap();
//! assert_eq!(url, "/users/7");
//! ```
//!
//! ## Runtime Considerations
//!
//! A [`Router`] is mutated only during registration. Matchers and
//! generators borrow it immutably, so a fully built router can be shared
//! across threads (`&Router` is `Send + Sync`) with no locking.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod method;
pub mod resource;
pub mod route;
pub mod router;
pub mod table;

pub use config::RouterConfig;
pub use error::RouterError;
pub use method::MethodMask;
pub use resource::Resource;
pub use route::{Route, RouteParser, Segment};
pub use router::{Match, RouteGenerator, RouteMatcher, Router};
pub use table::RouteTable;
