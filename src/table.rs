//! # Route Tables
//!
//! Declarative route files, loaded from YAML (`.yaml` / `.yml`) or JSON.
//!
//! ```yaml
//! config:
//!   prefix: /api
//!   chunk_size: 10
//! global_values:
//!   format: html
//! routes:
//!   - path: /users/{id:\d+}
//!     methods: [GET]
//!     name: user
//!     defaults: { controller: Users, action: show }
//!   - path: /search
//!     methods: [GET, POST]
//!     decorated: true
//! resources:
//!   - name: post
//!     plural: posts
//!     id_pattern: \d+
//!     except: [new, edit]
//!     member: { publish: POST }
//!     resources:
//!       - name: comment
//!         plural: comments
//!         shallow: true
//! ```
//!
//! `global_values` apply to everything the table registers. Literal routes
//! are registered before resources, in file order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::config::RouterConfig;
use crate::method::MethodMask;
use crate::resource::Resource;
use crate::router::Router;

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn parse_methods(methods: &[String]) -> Result<MethodMask> {
    methods
        .join("|")
        .parse::<MethodMask>()
        .with_context(|| format!("invalid methods {methods:?}"))
}

/// One literal route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    /// Placeholder patterns applied after parsing.
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
    /// Apply the configured prefix and suffix, like the verb helpers.
    #[serde(default)]
    pub decorated: bool,
}

/// One resource declaration, possibly with nested resources.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceEntry {
    pub name: String,
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub only: Option<Vec<String>>,
    #[serde(default)]
    pub except: Vec<String>,
    #[serde(default)]
    pub shallow: bool,
    #[serde(default)]
    pub id_pattern: Option<String>,
    /// Custom member actions: action name -> method(s)
    #[serde(default)]
    pub member: BTreeMap<String, String>,
    /// Custom collection actions: action name -> method(s)
    #[serde(default)]
    pub collection: BTreeMap<String, String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

impl ResourceEntry {
    pub fn to_resource(&self) -> Result<Resource> {
        let mut resource = Resource::new(self.name.as_str(), self.plural.as_deref());
        if let Some(only) = &self.only {
            resource = resource.only(only);
        }
        if !self.except.is_empty() {
            resource = resource.except(&self.except);
        }
        for (action, methods) in &self.member {
            let mask: MethodMask = methods
                .parse()
                .with_context(|| format!("member action '{action}' of '{}'", self.name))?;
            resource = resource.member(action, mask);
        }
        for (action, methods) in &self.collection {
            let mask: MethodMask = methods
                .parse()
                .with_context(|| format!("collection action '{action}' of '{}'", self.name))?;
            resource = resource.collection(action, mask);
        }
        for (key, value) in &self.parameters {
            resource = resource.parameter(key.as_str(), value.as_str());
        }
        if let Some(pattern) = &self.id_pattern {
            resource = resource.id_pattern(pattern.as_str());
        }
        resource = resource.shallow(self.shallow);
        for child in &self.resources {
            resource = resource.resource(child.to_resource()?);
        }
        Ok(resource)
    }
}

/// A complete routing table as written in a route file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub config: RouterConfig,
    pub global_values: BTreeMap<String, String>,
    pub routes: Vec<RouteEntry>,
    pub resources: Vec<ResourceEntry>,
}

impl RouteTable {
    /// Load a table, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading route table {}", path.display()))?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let table = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        table.with_context(|| format!("parsing route table {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Register every route and resource into a new router.
    pub fn into_router(self) -> Result<Router> {
        let mut router = Router::with_config(self.config);
        router.add_global_values(self.global_values);

        for entry in &self.routes {
            let method = parse_methods(&entry.methods)?;
            let route = if entry.decorated {
                router.add_decorated(&entry.path, method, entry.name.as_deref())
            } else {
                router.add(&entry.path, method, entry.name.as_deref())
            }
            .with_context(|| format!("registering route '{}'", entry.path))?;

            for (placeholder, pattern) in &entry.patterns {
                route
                    .specify(placeholder, pattern)
                    .with_context(|| format!("pattern for '{placeholder}' in '{}'", entry.path))?;
            }
            route.add_parameters(entry.defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        for entry in &self.resources {
            entry
                .to_resource()?
                .register(&mut router)
                .with_context(|| format!("registering resource '{}'", entry.name))?;
        }

        info!(
            routes_count = router.len(),
            literal_routes = self.routes.len(),
            resources = self.resources.len(),
            "Route table loaded"
        );
        Ok(router)
    }
}
