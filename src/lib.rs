//! `ii`: navigate and query a hierarchical data catalog from the shell.
//!
//! A query runs through a fixed pipeline: paths are resolved against the
//! working collection ([`paths`]), wildcards and recursion are expanded
//! ([`expand`]), results are fetched and sorted ([`retrieve`], [`sort`]),
//! then filtered ([`filter`]) and collapsed to one replica per data object
//! ([`dedup`]) before rendering ([`render`]).

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod dedup;
pub mod environment;
pub mod expand;
pub mod filter;
pub mod interrupt;
pub mod logging;
pub mod paths;
pub mod render;
pub mod retrieve;
pub mod session;
pub mod sort;
pub mod wildcard;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, CatalogEntry, SnapshotCatalog};
pub use cli::Cli;
pub use environment::{EnvironmentConfig, EnvironmentPaths};
pub use expand::{EntryType, ExpandedQuery};
pub use filter::FilterSpec;
pub use retrieve::QueryResult;
pub use sort::SortKey;
