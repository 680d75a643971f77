use self::Method::{Delete, Get, Post};
use crate::error::{AdnError, Result};
use crate::template::{PathTemplate, TemplateError};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// HTTP methods used by registered operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Name of the operation whose registered method is GET despite its
/// delete semantics. See [`crate::FilterDeletion`].
pub const DELETE_FILTER: &str = "delete filter";

/// Every operation exposed by the service: (name, method, path template).
pub const ENDPOINTS: &[(&str, Method, &str)] = &[
    // Users
    ("retrieve user", Get, "/stream/0/users/{User}"),
    ("follow user", Post, "/stream/0/users/{User}/follow"),
    ("unfollow user", Delete, "/stream/0/users/{User}/follow"),
    ("list followed users", Get, "/stream/0/users/{User}/following"),
    ("list following users", Get, "/stream/0/users/{User}/followers"),
    ("mute user", Post, "/stream/0/users/{User}/mute"),
    ("unmute user", Delete, "/stream/0/users/{User}/mute"),
    ("list muted users", Get, "/stream/0/users/me/muted"),
    ("list reposters", Get, "/stream/0/posts/{Post}/reposters"),
    ("list starrers", Get, "/stream/0/posts/{Post}/star"),
    // Tokens
    ("check current token", Get, "/stream/0/token"),
    // Posts
    ("create post", Post, "/stream/0/posts"),
    ("retrieve post", Get, "/stream/0/posts/{Post}"),
    ("delete post", Delete, "/stream/0/posts/{Post}"),
    ("retrieve post replies", Get, "/stream/0/posts/{Post}/replies"),
    ("retrieve user posts", Get, "/stream/0/users/{User}/posts"),
    ("repost post", Post, "/stream/0/posts/{Post}/repost"),
    ("unrepost post", Delete, "/stream/0/posts/{Post}/repost"),
    ("star post", Post, "/stream/0/posts/{Post}/star"),
    ("unstar post", Delete, "/stream/0/posts/{Post}/star"),
    ("retrieve user starred posts", Get, "/stream/0/users/{User}/stars"),
    ("retrieve posts mentioning user", Get, "/stream/0/users/{User}/mentions"),
    ("retrieve user personalized stream", Get, "/stream/0/posts/stream"),
    ("retrieve global stream", Get, "/stream/0/posts/stream/global"),
    ("retrieve tagged posts", Get, "/stream/0/posts/tag/{Hashtag}"),
    // Streams
    ("retrieve realtime user personalized stream", Get, "/stream/0/streams/user"),
    ("retrieve realtime multiple user personalized stream", Get, "/stream/0/streams/app"),
    ("retrieve realtime public stream", Get, "/stream/0/streams/public"),
    ("retrieve stream status", Get, "/stream/0/streams/{Stream}"),
    ("control stream", Post, "/stream/0/streams/{Stream}"),
    // Real-time updates
    ("list subscriptions", Get, "/stream/0/subscriptions"),
    ("create subscription", Post, "/stream/0/subscriptions"),
    ("delete subscription", Delete, "/stream/0/subscriptions/{Subscription}"),
    ("delete all subscriptions", Delete, "/stream/0/subscriptions"),
    // Filters
    ("retrieve current user filters", Get, "/stream/0/filters"),
    ("create filter", Post, "/stream/0/filters"),
    ("retrieve filter", Get, "/stream/0/filters/{Filter}"),
    (DELETE_FILTER, Get, "/stream/0/filters/{Filter}"),
];

/// A registered operation with its compiled path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    pub template: PathTemplate,
}

/// Immutable lookup table from operation name to [`Endpoint`].
#[derive(Debug, Clone)]
pub struct Registry {
    endpoints: Vec<Endpoint>,
    index: HashMap<&'static str, usize>,
}

/// Errors found while compiling a list of endpoint definitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("operation {name:?} has an invalid path template: {source}")]
    InvalidTemplate {
        name: &'static str,
        #[source]
        source: TemplateError,
    },

    #[error("operation {0:?} is registered twice")]
    Duplicate(&'static str),
}

impl Registry {
    /// Compile a list of endpoint definitions, failing on the first bad entry
    pub fn compile(
        entries: &[(&'static str, Method, &'static str)],
    ) -> std::result::Result<Self, RegistryError> {
        let mut endpoints = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for &(name, method, path) in entries {
            let template = PathTemplate::parse(path)
                .map_err(|source| RegistryError::InvalidTemplate { name, source })?;
            if index.insert(name, endpoints.len()).is_some() {
                return Err(RegistryError::Duplicate(name));
            }
            endpoints.push(Endpoint {
                name,
                method,
                template,
            });
        }

        Ok(Registry { endpoints, index })
    }

    /// The process-wide registry of [`ENDPOINTS`], compiled on first use.
    ///
    /// # Panics
    ///
    /// Panics if a built-in template is invalid; that is a programming error.
    pub fn builtin() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| match Registry::compile(ENDPOINTS) {
            Ok(registry) => registry,
            Err(err) => panic!("built-in endpoint registry is invalid: {err}"),
        })
    }

    /// Find an operation by name
    pub fn lookup(&self, name: &str) -> Result<&Endpoint> {
        self.index
            .get(name)
            .map(|&i| &self.endpoints[i])
            .ok_or_else(|| AdnError::UnknownOperation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All operations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::template::PathArgs;

    fn all_args() -> PathArgs {
        PathArgs::new()
            .user("1")
            .post("2")
            .hashtag("rust")
            .stream("3")
            .subscription("4")
            .filter("5")
    }

    #[test]
    fn test_builtin_registry_compiles() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), ENDPOINTS.len());
        assert!(registry.contains("retrieve user"));
        assert!(!registry.contains("retrieve users"));
    }

    #[test]
    fn test_every_operation_resolves_fully() {
        let args = all_args();
        for endpoint in Registry::builtin().iter() {
            let path = endpoint.template.render(endpoint.name, &args).unwrap();
            assert!(path.starts_with("/stream/0/"), "{}: {}", endpoint.name, path);
            assert!(!path.contains('{') && !path.contains('}'), "{}: {}", endpoint.name, path);
        }
    }

    #[test]
    fn test_lookup_unknown_operation() {
        let err = Registry::builtin().lookup("launch rocket").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
        assert!(err.to_string().contains("launch rocket"));
    }

    #[test]
    fn test_shared_paths() {
        let registry = Registry::builtin();
        let starrers = registry.lookup("list starrers").unwrap();
        let star = registry.lookup("star post").unwrap();
        let unstar = registry.lookup("unstar post").unwrap();
        assert_eq!(starrers.template, star.template);
        assert_eq!(star.template, unstar.template);
        assert_eq!(
            (starrers.method, star.method, unstar.method),
            (Method::Get, Method::Post, Method::Delete)
        );
    }

    #[test]
    fn test_delete_filter_is_registered_as_get() {
        let registry = Registry::builtin();
        let delete = registry.lookup(DELETE_FILTER).unwrap();
        let retrieve = registry.lookup("retrieve filter").unwrap();
        assert_eq!(delete.method, Method::Get);
        assert_eq!(delete.template, retrieve.template);
    }

    #[test]
    fn test_compile_rejects_bad_template() {
        let err = Registry::compile(&[("broken", Method::Get, "/stream/0/groups/{Group}")])
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidTemplate {
                name: "broken",
                source: TemplateError::UnknownPlaceholder("Group".to_string()),
            }
        );
    }

    #[test]
    fn test_compile_rejects_duplicates() {
        let err = Registry::compile(&[
            ("retrieve user", Method::Get, "/stream/0/users/{User}"),
            ("retrieve user", Method::Get, "/stream/0/users/{User}"),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("retrieve user"));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
    }
}
