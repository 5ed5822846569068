//! Worklist walk over the requires graph

use crate::{Request, ResolvedPackage, ResolvedSet};
use cyget_events::{AppEvent, EventEmitter, ResolverEvent};
use cyget_types::{Catalog, Package};
use std::collections::VecDeque;
use std::sync::Arc;

/// A queued token, tagged by where it came from
#[derive(Debug)]
enum Pending {
    /// Caller request: a package name or an `@category` reference
    Request { token: String, spec: String },
    /// Entry of a package's `requires`: always a plain package name
    Requirement { name: String },
}

/// Dependency resolver over a parsed catalog
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    default_spec: String,
}

impl<'a> Resolver<'a> {
    /// Create a resolver; `default_spec` applies to requests without one
    /// and to every transitively required package
    pub fn new(catalog: &'a Catalog, default_spec: impl Into<String>) -> Self {
        Self {
            catalog,
            default_spec: default_spec.into(),
        }
    }

    /// Resolve `requests` into a transitively closed set
    ///
    /// A package is inserted before its requirements are queued, so each
    /// package is expanded at most once and requirement cycles terminate.
    /// Requests are processed breadth first: an explicitly requested spec
    /// wins over the default a dependency edge would assign. Names and
    /// categories that match nothing are dropped.
    #[must_use]
    pub fn resolve(&self, requests: &[Request], events: &impl EventEmitter) -> ResolvedSet {
        events.emit(AppEvent::Resolver(ResolverEvent::Started {
            requested: requests.len(),
        }));

        let mut resolved = ResolvedSet::new();
        let mut queue: VecDeque<Pending> = requests
            .iter()
            .map(|request| Pending::Request {
                token: request.name.clone(),
                spec: request
                    .spec
                    .clone()
                    .unwrap_or_else(|| self.default_spec.clone()),
            })
            .collect();

        while let Some(pending) = queue.pop_front() {
            let (token, spec) = match pending {
                Pending::Request { token, spec } => {
                    if let Some(category) = token.strip_prefix('@') {
                        let mut matched = false;
                        for package in self.catalog.in_category(category) {
                            matched = true;
                            self.append(package, &spec, &mut resolved, &mut queue);
                        }
                        if !matched {
                            events.emit(AppEvent::Resolver(ResolverEvent::UnknownReference {
                                token,
                            }));
                        }
                        continue;
                    }
                    (token, spec)
                }
                Pending::Requirement { name } => (name, self.default_spec.clone()),
            };

            if let Some(package) = self.catalog.get(&token) {
                self.append(package, &spec, &mut resolved, &mut queue);
            } else {
                tracing::debug!(name = %token, "requested package not in catalog");
                events.emit(AppEvent::Resolver(ResolverEvent::UnknownReference { token }));
            }
        }

        events.emit(AppEvent::Resolver(ResolverEvent::Completed {
            packages: resolved.len(),
        }));
        resolved
    }

    fn append(
        &self,
        package: &Arc<Package>,
        spec: &str,
        resolved: &mut ResolvedSet,
        queue: &mut VecDeque<Pending>,
    ) {
        if resolved.contains_key(&package.name) {
            return;
        }
        resolved.insert(
            package.name.clone(),
            ResolvedPackage {
                package: Arc::clone(package),
                spec: spec.to_string(),
            },
        );
        // Requirements are plain names, never category references
        for name in &package.requires {
            queue.push_back(Pending::Requirement { name: name.clone() });
        }
    }
}
