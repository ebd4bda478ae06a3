//! Chunked combined-regex matching over dynamic routes.
//!
//! Each chunk holds up to `chunk_size` dynamic routes folded into one pattern:
//!
//! ```text
//! ^(?:(?:users/([^/]+))()|(?:posts/([^/]+)/c/([^/]+))|(?:tags/([^/]+))())$
//!      \___ alt 0: groups 1..=2 __/ \___ alt 1: groups 3..=4 __/ \_ alt 2: 5..=6 _/
//! ```
//!
//! Every alternative contributes the same number of groups (`width` = the
//! largest parameter count in the chunk plus one), padding with empty `()`
//! groups. The padding always includes at least one trailing `()`, so the
//! last populated group of a successful match is the alternative's
//! cumulative boundary `(i + 1) * width`, which maps back to the route.
//!
//! Tables are compiled per method bit so that a path accepted by a dynamic
//! route of the wrong verb keeps searching later routes of the right verb.

use regex::{Captures, Regex};
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::{debug, info};

use super::core::{Match, Router};
use crate::error::RouterError;
use crate::method::MethodMask;

/// Maximum number of captured values kept inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

type CaptureVec = SmallVec<[(usize, String); MAX_INLINE_PARAMS]>;

/// Wildcard table slot, after the four single-verb tables.
const ANY_TABLE: usize = 4;

#[derive(Debug)]
struct ChunkEntry {
    /// Index into the router's route list.
    route: usize,
    param_count: usize,
}

#[derive(Debug)]
struct Chunk {
    regex: Regex,
    width: usize,
    entries: Vec<ChunkEntry>,
    /// cumulative group boundary -> position in `entries`
    boundaries: HashMap<usize, usize>,
}

impl Chunk {
    fn compile(router: &Router, members: &[usize]) -> Result<Self, RouterError> {
        let width = members
            .iter()
            .map(|&index| router.route_at(index).parameter_count())
            .max()
            .unwrap_or(0)
            + 1;

        let mut pattern = String::from("^(?:");
        let mut entries = Vec::with_capacity(members.len());
        let mut boundaries = HashMap::with_capacity(members.len());

        for (position, &index) in members.iter().enumerate() {
            let route = router.route_at(index);
            let param_count = route.parameter_count();
            if position > 0 {
                pattern.push('|');
            }
            pattern.push_str("(?:");
            pattern.push_str(route.regex_source().unwrap_or_default());
            pattern.push(')');
            for _ in param_count..width {
                pattern.push_str("()");
            }
            boundaries.insert((position + 1) * width, position);
            entries.push(ChunkEntry {
                route: index,
                param_count,
            });
        }
        pattern.push_str(")$");

        let regex = Regex::new(&pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

        Ok(Self {
            regex,
            width,
            entries,
            boundaries,
        })
    }

    fn find(&self, path: &str) -> Option<(usize, CaptureVec)> {
        let caps = self.regex.captures(path)?;
        let boundary = last_populated_group(&caps)?;
        let entry = &self.entries[*self.boundaries.get(&boundary)?];

        let first = boundary + 1 - self.width;
        let values = (0..entry.param_count)
            .map(|offset| {
                let value = caps
                    .get(first + offset)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                (offset, value)
            })
            .collect();
        Some((entry.route, values))
    }
}

fn last_populated_group(caps: &Captures<'_>) -> Option<usize> {
    (1..caps.len()).rev().find(|&i| caps.get(i).is_some())
}

#[derive(Debug, Default)]
struct ChunkTable {
    chunks: Vec<Chunk>,
}

impl ChunkTable {
    fn compile(router: &Router, members: &[usize], chunk_size: usize) -> Result<Self, RouterError> {
        let chunks = members
            .chunks(chunk_size)
            .map(|group| Chunk::compile(router, group))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { chunks })
    }

    /// First route (in registration order) accepting `path`.
    fn find(&self, path: &str) -> Option<(usize, CaptureVec)> {
        self.chunks.iter().find_map(|chunk| chunk.find(path))
    }
}

/// Resolves `(path, method)` pairs against a [`Router`].
///
/// Built once from a fully registered router with [`Router::matcher`]; after
/// that it is read-only and can be shared between threads.
#[derive(Debug)]
pub struct RouteMatcher<'r> {
    router: &'r Router,
    /// One table per verb bit (GET, POST, PUT, DELETE) plus a wildcard table.
    tables: [ChunkTable; 5],
    chunk_size: usize,
}

impl<'r> RouteMatcher<'r> {
    pub fn new(router: &'r Router) -> Result<Self, RouterError> {
        let chunk_size = router.config().effective_chunk_size();
        let dynamic: Vec<usize> = router
            .routes()
            .enumerate()
            .filter(|(_, route)| !route.is_static())
            .map(|(index, _)| index)
            .collect();

        let mut tables: [ChunkTable; 5] = Default::default();
        for (slot, verb) in MethodMask::VERBS.into_iter().enumerate() {
            let members: Vec<usize> = dynamic
                .iter()
                .copied()
                .filter(|&index| router.route_at(index).is_method(Some(verb)))
                .collect();
            tables[slot] = ChunkTable::compile(router, &members, chunk_size)?;
        }
        tables[ANY_TABLE] = ChunkTable::compile(router, &dynamic, chunk_size)?;

        info!(
            routes_count = router.len(),
            static_count = router.len() - dynamic.len(),
            dynamic_count = dynamic.len(),
            chunk_count = tables[ANY_TABLE].chunks.len(),
            chunk_size,
            "Route matcher compiled"
        );

        Ok(Self {
            router,
            tables,
            chunk_size,
        })
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of combined patterns compiled for wildcard requests.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.tables[ANY_TABLE].chunks.len()
    }

    /// Resolve `path` for a request with `method` (`None` = any verb).
    ///
    /// Returns `None` when nothing matches; that is a normal outcome.
    #[must_use]
    pub fn match_path(&self, path: &str, method: Option<MethodMask>) -> Option<Match<'r>> {
        debug!(path = %path, method = ?method.map(|m| m.to_string()), "Route match attempt");

        if let Some(route) = self
            .router
            .static_routes_at(path)
            .find(|route| route.is_method(method))
        {
            debug!(route_name = %route.name(), path = %path, "Static route matched");
            return Some(Match::new(route, std::iter::empty()));
        }

        let found = match method {
            None => self.tables[ANY_TABLE].find(path),
            Some(mask) => match mask.verb_index() {
                Some(slot) => self.tables[slot].find(path),
                // several verbs: earliest registered route across their tables
                None => mask
                    .verbs()
                    .filter_map(|verb| verb.verb_index())
                    .filter_map(|slot| self.tables[slot].find(path))
                    .min_by_key(|(index, _)| *index),
            },
        };

        let Some((index, values)) = found else {
            debug!(path = %path, "No route matched");
            return None;
        };

        let route = self.router.route_at(index);
        let names: Vec<&str> = route.parameter_names().collect();
        let extracted = values
            .into_iter()
            .map(|(offset, value)| (names[offset].to_string(), value));
        let matched = Match::new(route, extracted);
        debug!(
            route_name = %route.name(),
            route_pattern = %route.path(),
            path_params = ?matched.parameters(),
            "Dynamic route matched"
        );
        Some(matched)
    }
}
