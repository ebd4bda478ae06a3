use std::collections::HashMap;
use tracing::debug;

use super::core::Router;
use crate::error::RouterError;

/// Builds concrete paths from route names and parameter values.
///
/// Placeholders are filled from the supplied parameters, then from the
/// route's defaults. Supplied parameters that are not placeholders are
/// appended as a query string. With short URLs disabled the whole path is
/// carried in a `path` query parameter instead:
///
/// ```text
/// short:  /users/7?tab=posts
/// long:   ?path=%2Fusers%2F7&tab=posts
/// ```
#[derive(Debug, Clone)]
pub struct RouteGenerator<'r> {
    router: &'r Router,
    short_urls: bool,
}

impl<'r> RouteGenerator<'r> {
    #[must_use]
    pub fn new(router: &'r Router) -> Self {
        Self {
            router,
            short_urls: router.config().short_urls,
        }
    }

    /// Override the router's `short_urls` setting for this generator.
    #[must_use]
    pub fn with_short_urls(mut self, short_urls: bool) -> Self {
        self.short_urls = short_urls;
        self
    }

    /// Generate the path for route `name`.
    ///
    /// Fails with [`RouterError::RouteNotFound`] for unknown names and with a
    /// single [`RouterError::MissingParameters`] listing every placeholder
    /// that has neither a supplied value nor a default.
    pub fn generate<I, K, V>(&self, name: &str, parameters: I) -> Result<String, RouterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let route = self.router.get_route(name)?;

        // keep caller order for the query string; a repeated key keeps its
        // first position and its last value
        let mut supplied: Vec<(String, String)> = Vec::new();
        for (key, value) in parameters {
            let (key, value) = (key.into(), value.into());
            match supplied.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => supplied.push((key, value)),
            }
        }

        let mut values: HashMap<&str, &str> = HashMap::with_capacity(route.parameter_count());
        let mut missing = Vec::new();
        for required in route.parameter_names() {
            let value = supplied
                .iter()
                .find(|(k, _)| k == required)
                .map(|(_, v)| v.as_str())
                .or_else(|| route.defaults().get(required).map(String::as_str));
            match value {
                Some(value) => {
                    values.insert(required, value);
                }
                None => missing.push(required.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(RouterError::MissingParameters {
                route: name.to_string(),
                names: missing,
            });
        }

        let path = route.interpolate(&values);
        let extras: Vec<&(String, String)> = supplied
            .iter()
            .filter(|(k, _)| !values.contains_key(k.as_str()))
            .collect();

        let generated = if self.short_urls {
            if extras.is_empty() {
                path
            } else {
                let separator = if path.contains('?') { '&' } else { '?' };
                format!("{path}{separator}{}", encode_query(&extras))
            }
        } else {
            let mut long = format!("?path={}", urlencoding::encode(&path));
            if !extras.is_empty() {
                long.push('&');
                long.push_str(&encode_query(&extras));
            }
            long
        };

        debug!(route_name = %name, generated = %generated, "Generated path");
        Ok(generated)
    }
}

fn encode_query(pairs: &[&(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
