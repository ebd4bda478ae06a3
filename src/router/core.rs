use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use super::generator::RouteGenerator;
use super::matcher::RouteMatcher;
use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::method::MethodMask;
use crate::route::{Route, RouteParser};

/// Name given to the route registered by [`Router::root`].
pub const ROOT_ROUTE: &str = "root";

/// Result of resolving a path: the matched route plus its parameters.
///
/// `parameters` holds the route defaults overlaid with the values extracted
/// from the path; extracted values win on key collision.
#[derive(Debug, Clone)]
pub struct Match<'r> {
    route: &'r Route,
    parameters: HashMap<String, String>,
}

impl<'r> Match<'r> {
    pub(crate) fn new(route: &'r Route, extracted: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut parameters = route.defaults().clone();
        parameters.extend(extracted);
        Self { route, parameters }
    }

    #[must_use]
    pub fn route(&self) -> &'r Route {
        self.route
    }

    /// Name of the matched route.
    #[must_use]
    pub fn name(&self) -> &'r str {
        self.route.name()
    }

    #[must_use]
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn into_parameters(self) -> HashMap<String, String> {
        self.parameters
    }
}

/// Registry of named routes.
///
/// Every route is reachable by name. Static routes are additionally indexed
/// by their literal path; several static routes may share a path when their
/// methods differ, and the index keeps them in registration order.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
    parser: RouteParser,
    routes: Vec<Route>,
    names: HashMap<String, usize>,
    static_index: HashMap<String, Vec<usize>>,
    global_values: BTreeMap<String, String>,
    next_index: usize,
}

impl Router {
    /// Create an empty router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            parser: RouteParser::new(config.default_pattern.clone()),
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register `uri` exactly as given.
    ///
    /// `name` of `None` assigns the next free sequential index (`"0"`,
    /// `"1"`, ...). The prefix and suffix are not applied; see
    /// [`Router::add_decorated`].
    pub fn add(
        &mut self,
        uri: &str,
        method: MethodMask,
        name: Option<&str>,
    ) -> Result<&mut Route, RouterError> {
        let name = match name {
            Some(name) => {
                if self.names.contains_key(name) {
                    return Err(RouterError::DuplicateRoute(name.to_string()));
                }
                name.to_string()
            }
            None => self.next_auto_name(),
        };

        let mut route = self.parser.parse(uri, Some(method))?;
        route.set_name(name.clone());
        route.add_parameters(self.global_values.iter().map(|(k, v)| (k.clone(), v.clone())));

        let index = self.routes.len();
        if route.is_static() {
            self.static_index
                .entry(route.path().to_string())
                .or_default()
                .push(index);
        }
        debug!(
            route_name = %name,
            method = %method,
            path = %route.path(),
            is_static = route.is_static(),
            "Registered route"
        );
        self.names.insert(name, index);
        self.routes.push(route);
        Ok(&mut self.routes[index])
    }

    /// Register `prefix + uri + suffix`.
    pub fn add_decorated(
        &mut self,
        uri: &str,
        method: MethodMask,
        name: Option<&str>,
    ) -> Result<&mut Route, RouterError> {
        let uri = format!("{}{}{}", self.config.prefix, uri, self.config.suffix);
        self.add(&uri, method, name)
    }

    pub fn get(&mut self, uri: &str, name: Option<&str>) -> Result<&mut Route, RouterError> {
        self.add_decorated(uri, MethodMask::GET, name)
    }

    pub fn post(&mut self, uri: &str, name: Option<&str>) -> Result<&mut Route, RouterError> {
        self.add_decorated(uri, MethodMask::POST, name)
    }

    pub fn put(&mut self, uri: &str, name: Option<&str>) -> Result<&mut Route, RouterError> {
        self.add_decorated(uri, MethodMask::PUT, name)
    }

    pub fn delete(&mut self, uri: &str, name: Option<&str>) -> Result<&mut Route, RouterError> {
        self.add_decorated(uri, MethodMask::DELETE, name)
    }

    pub fn any(&mut self, uri: &str, name: Option<&str>) -> Result<&mut Route, RouterError> {
        self.add_decorated(uri, MethodMask::ALL, name)
    }

    /// Register a GET route named `"root"` at exactly the prefix.
    ///
    /// With no prefix configured the root path is empty, matching the
    /// relative paths resources register.
    pub fn root(&mut self) -> Result<&mut Route, RouterError> {
        let path = self.config.prefix.clone();
        self.add(&path, MethodMask::GET, Some(ROOT_ROUTE))
    }

    /// Merge default values into every route registered after this call.
    ///
    /// Routes that already exist are not touched.
    pub fn add_global_values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.global_values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn global_values(&self) -> &BTreeMap<String, String> {
        &self.global_values
    }

    pub fn get_route(&self, name: &str) -> Result<&Route, RouterError> {
        self.names
            .get(name)
            .map(|&index| &self.routes[index])
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))
    }

    pub fn get_route_mut(&mut self, name: &str) -> Result<&mut Route, RouterError> {
        match self.names.get(name) {
            Some(&index) => Ok(&mut self.routes[index]),
            None => Err(RouterError::RouteNotFound(name.to_string())),
        }
    }

    /// First static route registered at exactly `uri`.
    pub fn get_static_by_uri(&self, uri: &str) -> Result<&Route, RouterError> {
        self.static_routes_at(uri)
            .next()
            .ok_or_else(|| RouterError::StaticRouteNotFound(uri.to_string()))
    }

    /// Every static route registered at `uri`, in registration order.
    pub(crate) fn static_routes_at<'a>(&'a self, uri: &str) -> impl Iterator<Item = &'a Route> + 'a {
        self.static_index
            .get(uri)
            .into_iter()
            .flatten()
            .map(move |&index| &self.routes[index])
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn route_at(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Compile the chunked matcher over the current route set.
    pub fn matcher(&self) -> Result<RouteMatcher<'_>, RouterError> {
        RouteMatcher::new(self)
    }

    /// Path generator honouring the configured `short_urls` mode.
    #[must_use]
    pub fn generator(&self) -> RouteGenerator<'_> {
        RouteGenerator::new(self)
    }

    /// Log every registered route at `info` level.
    pub fn dump_routes(&self) {
        info!(
            routes_count = self.routes.len(),
            prefix = %self.config.prefix,
            suffix = %self.config.suffix,
            "Routing table"
        );
        for route in &self.routes {
            info!(
                route_name = %route.name(),
                method = %route.method().unwrap_or(MethodMask::ALL),
                path = %route.path(),
                "Route"
            );
        }
    }

    fn next_auto_name(&mut self) -> String {
        loop {
            let candidate = self.next_index.to_string();
            self.next_index += 1;
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}
