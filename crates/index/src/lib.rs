#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Catalog (setup.ini) parsing and on-disk caching
//!
//! The catalog is a flat, line-oriented file. [`parse_catalog`] turns it
//! into an immutable [`Catalog`]; [`CatalogCache`] owns the copy kept in
//! the target directory between runs.

mod cache;
mod parser;

pub use cache::CatalogCache;
pub use parser::parse_catalog;

pub use cyget_types::Catalog;
