use serde::{Deserialize, Serialize};

/// Resolver domain events for dependency resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResolverEvent {
    /// Resolution of the requested set started
    Started { requested: usize },

    /// A requested name or `@category` matched nothing in the catalog
    UnknownReference { token: String },

    /// Resolution finished with the closed set size
    Completed { packages: usize },
}
