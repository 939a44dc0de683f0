//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Register every definition under its served path
//! - Resolve a (method, path) pair to a JSON body or a dispatch error
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap keyed by the full request path
//! - Duplicate paths: the definition registered last wins, with a warning

use std::collections::HashMap;

use crate::definition::{RouteDefinition, SourceLocation};
use crate::routing::error::DispatchError;
use crate::routing::normalizer::normalize_response;

/// A registered mock endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRoute {
    pub method: String,
    pub response_template: String,
    pub source: SourceLocation,
}

/// Immutable mapping from request path to mock route.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, MockRoute>,
}

impl RouteTable {
    /// Build the table, serving each definition at `root_prefix` + path.
    ///
    /// Leading slashes on definition paths are dropped before joining, so
    /// `users` and `/users` both land on `/users` with the default prefix.
    pub fn build<I>(definitions: I, root_prefix: &str) -> Self
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut routes: HashMap<String, MockRoute> = HashMap::new();

        for definition in definitions {
            let path = join_path(root_prefix, &definition.path);
            let route = MockRoute {
                method: definition.method,
                response_template: definition.response_template,
                source: definition.source,
            };
            let source = route.source.clone();

            if let Some(previous) = routes.insert(path.clone(), route) {
                tracing::warn!(
                    path = %path,
                    replaced = %previous.source,
                    by = %source,
                    "Duplicate mock path, later definition wins"
                );
            }
        }

        Self { routes }
    }

    /// Look up the route registered for an exact request path.
    pub fn get(&self, path: &str) -> Option<&MockRoute> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes, ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MockRoute)> {
        let mut entries: Vec<_> = self
            .routes
            .iter()
            .map(|(path, route)| (path.as_str(), route))
            .collect();
        entries.sort_by_key(|(path, _)| *path);
        entries.into_iter()
    }

    /// Resolve a request to its normalized JSON body.
    ///
    /// The template is repaired on every call.
    pub fn resolve(&self, method: &str, path: &str) -> Result<String, DispatchError> {
        let route = self.routes.get(path).ok_or(DispatchError::RouteNotFound)?;
        if route.method != method {
            return Err(DispatchError::MethodNotAllowed {
                expected: route.method.clone(),
            });
        }
        normalize_response(&route.response_template)
    }
}

fn join_path(root_prefix: &str, path: &str) -> String {
    format!("{}{}", root_prefix, path.trim_start_matches('/'))
}
