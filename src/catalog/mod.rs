//! Catalog service seam.
//!
//! The query pipeline only ever talks to a [`Catalog`]: exact-path existence
//! checks, direct listings, descendant enumeration and replica lookups. The
//! wire client lives outside this crate; [`SnapshotCatalog`] serves the same
//! interface from a JSON dump of a catalog.

pub mod model;
pub mod snapshot;

pub use model::{CatalogEntry, CollectionEntry, DataObjectEntry, ReplicaStatus};
pub use snapshot::SnapshotCatalog;

use anyhow::Result;

/// Direct children of one collection, in the order the catalog reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectChildren {
    pub collections: Vec<CollectionEntry>,
    /// One entry per replica.
    pub data_objects: Vec<DataObjectEntry>,
}

/// Queries the pipeline issues against the catalog. All paths are absolute.
pub trait Catalog {
    fn collection_exists(&self, path: &str) -> Result<bool>;

    fn data_object_exists(&self, path: &str) -> Result<bool>;

    fn list_direct_children(&self, collection: &str) -> Result<DirectChildren>;

    /// Absolute paths of every collection below `collection`, at any depth.
    fn list_descendant_collections(&self, collection: &str) -> Result<Vec<String>>;

    /// Every replica record of the data object at `path`.
    fn data_object_replicas(&self, path: &str) -> Result<Vec<DataObjectEntry>>;
}
