use tracing::debug;

use crate::error::RouterError;
use crate::method::MethodMask;
use crate::router::Router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Action {
    method: MethodMask,
    /// Bound to the bare group path rather than `path/action`.
    unnamed: bool,
}

impl Action {
    const fn bare(method: MethodMask) -> Self {
        Self {
            method,
            unnamed: true,
        }
    }

    const fn named(method: MethodMask) -> Self {
        Self {
            method,
            unnamed: false,
        }
    }
}

type ActionMap = Vec<(String, Action)>;

fn actions(defaults: &[(&str, Action)]) -> ActionMap {
    defaults
        .iter()
        .map(|(name, action)| (name.to_string(), *action))
        .collect()
}

/// `blog_posts` -> `BlogPosts`
pub(crate) fn camel_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Declarative builder for conventional CRUD routes.
///
/// Nested resources are owned by their parent; registering the parent
/// registers the whole tree, parents before children.
#[derive(Debug, Clone)]
pub struct Resource {
    singular: String,
    plural: Option<String>,
    collection: ActionMap,
    member: ActionMap,
    id_pattern: Option<String>,
    shallow: bool,
    is_parent: bool,
    parameters: Vec<(String, String)>,
    children: Vec<Resource>,
}

impl Resource {
    /// Create a resource; `plural` of `None` makes it a singleton.
    #[must_use]
    pub fn new(singular: impl Into<String>, plural: Option<&str>) -> Self {
        let singular = singular.into();
        let plural = plural.map(str::to_string);

        let (collection, member) = match plural {
            Some(_) => (
                actions(&[
                    ("index", Action::bare(MethodMask::GET)),
                    ("new", Action::named(MethodMask::GET)),
                    ("create", Action::bare(MethodMask::POST)),
                ]),
                actions(&[
                    ("show", Action::bare(MethodMask::GET)),
                    ("edit", Action::named(MethodMask::GET)),
                    ("update", Action::bare(MethodMask::PUT)),
                    ("destroy", Action::bare(MethodMask::DELETE)),
                ]),
            ),
            None => (
                actions(&[
                    ("show", Action::bare(MethodMask::GET)),
                    ("new", Action::named(MethodMask::GET)),
                    ("create", Action::bare(MethodMask::POST)),
                    ("edit", Action::named(MethodMask::GET)),
                    ("update", Action::bare(MethodMask::PUT)),
                    ("destroy", Action::bare(MethodMask::DELETE)),
                ]),
                Vec::new(),
            ),
        };

        let controller = camel_case(plural.as_deref().unwrap_or(&singular));
        Self {
            singular,
            plural,
            collection,
            member,
            id_pattern: None,
            shallow: false,
            is_parent: false,
            parameters: vec![("controller".to_string(), controller)],
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn plural(singular: impl Into<String>, plural: &str) -> Self {
        Self::new(singular, Some(plural))
    }

    #[must_use]
    pub fn singleton(singular: impl Into<String>) -> Self {
        Self::new(singular, None)
    }

    #[must_use]
    pub fn singular_name(&self) -> &str {
        &self.singular
    }

    #[must_use]
    pub fn plural_name(&self) -> Option<&str> {
        self.plural.as_deref()
    }

    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.plural.is_none()
    }

    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.is_parent
    }

    /// Value of the `controller` parameter every emitted route carries.
    #[must_use]
    pub fn controller(&self) -> &str {
        self.parameters
            .iter()
            .find(|(k, _)| k == "controller")
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    /// Placeholder name for this resource's id: `id`, or `{singular}_id`
    /// once another resource is nested under it.
    #[must_use]
    pub fn id_token(&self) -> String {
        if self.is_parent {
            format!("{}_id", self.singular)
        } else {
            "id".to_string()
        }
    }

    /// Keep only the named actions.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.collection.retain(|(name, _)| keep.contains(name));
        self.member.retain(|(name, _)| keep.contains(name));
        self
    }

    /// Drop the named actions.
    #[must_use]
    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removed: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.collection.retain(|(name, _)| !removed.contains(name));
        self.member.retain(|(name, _)| !removed.contains(name));
        self
    }

    /// Add a custom action addressed at `{plural}/{id}/{name}`.
    ///
    /// Singleton resources have no member routes; the call is ignored.
    #[must_use]
    pub fn member(mut self, name: &str, method: MethodMask) -> Self {
        if !self.is_singleton() {
            upsert(&mut self.member, name, Action::named(method));
        }
        self
    }

    /// Add a custom action addressed at `{plural}/{name}`.
    #[must_use]
    pub fn collection(mut self, name: &str, method: MethodMask) -> Self {
        upsert(&mut self.collection, name, Action::named(method));
        self
    }

    /// Nest `child` under this resource.
    #[must_use]
    pub fn resource(mut self, child: Resource) -> Self {
        self.is_parent = true;
        self.children.push(child);
        self
    }

    /// Register member routes without the ancestor path and name prefix.
    #[must_use]
    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    /// Regex for this resource's id placeholder, also applied to descendants.
    #[must_use]
    pub fn id_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.id_pattern = Some(pattern.into());
        self
    }

    /// Extra fixed parameter merged into every emitted route.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.parameters.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.parameters.push((key, value)),
        }
        self
    }

    /// Emit this resource and every nested resource into `router`.
    ///
    /// Returns the number of routes registered.
    pub fn register(&self, router: &mut Router) -> Result<usize, RouterError> {
        let mut ancestors = Vec::new();
        self.register_nested(router, &mut ancestors)
    }

    fn register_nested<'a>(
        &'a self,
        router: &mut Router,
        ancestors: &mut Vec<&'a Resource>,
    ) -> Result<usize, RouterError> {
        let mut path_prefix = String::new();
        let mut name_prefix = String::new();
        let mut patterns: Vec<(String, String)> = Vec::new();
        for ancestor in ancestors.iter() {
            match &ancestor.plural {
                Some(plural) => {
                    path_prefix.push_str(&format!("{}/{{{}}}/", plural, ancestor.id_token()));
                }
                None => {
                    path_prefix.push_str(&ancestor.singular);
                    path_prefix.push('/');
                }
            }
            name_prefix.push_str(&ancestor.singular);
            name_prefix.push('_');
            if let Some(pattern) = &ancestor.id_pattern {
                patterns.push((ancestor.id_token(), pattern.clone()));
            }
        }
        if let Some(pattern) = &self.id_pattern {
            patterns.push((self.id_token(), pattern.clone()));
        }

        let mut count = 0;
        if let Some(plural) = &self.plural {
            let (path, name) = if self.shallow {
                (String::new(), String::new())
            } else {
                (path_prefix.clone(), name_prefix.clone())
            };
            let base_path = format!("{path}{plural}/{{{}}}", self.id_token());
            let base_name = format!("{name}{}", self.singular);
            count += self.emit(router, &self.member, &base_path, &base_name, &patterns)?;
        }

        let group_root = self.plural.as_deref().unwrap_or(&self.singular);
        let base_path = format!("{path_prefix}{group_root}");
        let base_name = format!("{name_prefix}{group_root}");
        count += self.emit(router, &self.collection, &base_path, &base_name, &patterns)?;

        debug!(
            resource = %self.singular,
            routes = count,
            depth = ancestors.len(),
            "Registered resource"
        );

        ancestors.push(self);
        for child in &self.children {
            count += child.register_nested(router, ancestors)?;
        }
        ancestors.pop();

        Ok(count)
    }

    fn emit(
        &self,
        router: &mut Router,
        group: &ActionMap,
        base_path: &str,
        base_name: &str,
        patterns: &[(String, String)],
    ) -> Result<usize, RouterError> {
        let mut bare_name_taken = false;
        for (action, kind) in group {
            let (path, name) = if kind.unnamed {
                let name = (!bare_name_taken).then(|| base_name.to_string());
                bare_name_taken = true;
                (base_path.to_string(), name)
            } else {
                (
                    format!("{base_path}/{action}"),
                    Some(format!("{action}_{base_name}")),
                )
            };

            let route = router.add_decorated(&path, kind.method, name.as_deref())?;
            for (placeholder, pattern) in patterns {
                route.specify(placeholder, pattern)?;
            }
            route
                .add_parameters(self.parameters.iter().cloned())
                .set("action", action.as_str());
        }
        Ok(group.len())
    }
}

fn upsert(map: &mut ActionMap, name: &str, action: Action) {
    match map.iter_mut().find(|(n, _)| n == name) {
        Some(slot) => slot.1 = action,
        None => map.push((name.to_string(), action)),
    }
}
