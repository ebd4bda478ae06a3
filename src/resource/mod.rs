//! # Resource Module
//!
//! Expands RESTful conventions into many route registrations at once.
//!
//! ## Plural resources
//!
//! `Resource::plural("post", "posts")` registers seven routes:
//!
//! | Action  | Method | Path              | Name        |
//! |---------|--------|-------------------|-------------|
//! | show    | GET    | `posts/{id}`      | `post`      |
//! | edit    | GET    | `posts/{id}/edit` | `edit_post` |
//! | update  | PUT    | `posts/{id}`      | (index)     |
//! | destroy | DELETE | `posts/{id}`      | (index)     |
//! | index   | GET    | `posts`           | `posts`     |
//! | new     | GET    | `posts/new`       | `new_posts` |
//! | create  | POST   | `posts`           | (index)     |
//!
//! Member routes are emitted before collection routes. Within a group the
//! first action bound to the bare path also takes the bare name; later
//! bare-path actions get sequential index names.
//!
//! ## Singleton resources
//!
//! `Resource::singleton("profile")` has exactly one instance, so all six
//! non-index actions live at `profile` (plus `profile/new`,
//! `profile/edit`) with no id placeholder.
//!
//! ## Nesting
//!
//! ```rust
//! use waypoint::{Resource, Router};
//!
//! let mut router = Router::new();
//! Resource::plural("post", "posts")
//!     .resource(Resource::plural("comment", "comments"))
//!     .register(&mut router)
//!     .unwrap();
//!
//! let route = router.get_route("post_comments").unwrap();
//! assert_eq!(route.path(), "posts/{post_id}/comments");
//! ```
//!
//! A parent's own id placeholder becomes `{singular}_id` once it has
//! children. With [`Resource::shallow`] a nested resource registers its
//! member routes without the parent prefix while collection routes keep it.

mod core;

pub use core::Resource;
