#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for cyget
//!
//! This crate sits between the CLI and the specialized crates: it loads
//! the catalog, resolves the requested set and drives the downloads.

mod catalog;
mod context;
mod fetch;
mod types;

pub use catalog::load_catalog;
pub use context::{OpsContextBuilder, OpsCtx};
pub use fetch::{fetch_packages, get, plan_paths, resolve};
pub use types::{CatalogSource, GetRequest};
