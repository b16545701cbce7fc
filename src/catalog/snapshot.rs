//! In-memory catalog loaded from a JSON snapshot.
//!
//! The snapshot is strict: relative or unnormalised paths, duplicate entries,
//! data objects in unknown collections and objects without replicas are all
//! rejected at load time so queries never observe a half-consistent catalog.

use crate::catalog::{Catalog, CollectionEntry, DataObjectEntry, DirectChildren, ReplicaStatus};
use crate::paths;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub collections: Vec<SnapshotCollection>,
    #[serde(default)]
    pub data_objects: Vec<SnapshotDataObject>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotCollection {
    pub path: String,
    pub id: u64,
    pub owner_name: String,
    pub owner_zone: String,
    #[serde(default)]
    pub modify_time: i64,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotDataObject {
    pub collection: String,
    pub name: String,
    pub id: u64,
    pub owner_name: String,
    pub owner_zone: String,
    pub replicas: Vec<SnapshotReplica>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotReplica {
    pub number: u32,
    pub status: ReplicaStatus,
    pub resource: String,
    pub size: u64,
    #[serde(default)]
    pub modify_time: i64,
    #[serde(default)]
    pub checksum: Option<String>,
    pub physical_path: String,
}

#[derive(Debug, Default)]
pub struct SnapshotCatalog {
    /// Collections in document order.
    collections: Vec<CollectionEntry>,
    collection_index: BTreeMap<String, usize>,
    /// Replica records in document order, grouped per object.
    replicas: Vec<DataObjectEntry>,
    object_index: BTreeMap<String, Vec<usize>>,
}

impl SnapshotCatalog {
    /// Load and validate a snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading catalog snapshot {}", path.display()))?;
        let document: SnapshotDocument = serde_json::from_str(&data)
            .with_context(|| format!("parsing catalog snapshot {}", path.display()))?;
        Self::from_document(document).with_context(|| format!("loading {}", path.display()))
    }

    pub fn from_document(document: SnapshotDocument) -> Result<Self> {
        let mut catalog = SnapshotCatalog::default();

        for coll in document.collections {
            validate_collection_path(&coll.path)?;
            if catalog.collection_index.contains_key(&coll.path) {
                bail!("duplicate collection {}", coll.path);
            }
            let (parent, name) = paths::split(&coll.path);
            let entry = CollectionEntry {
                name: paths::last_segment(&coll.path).to_string(),
                parent_path: if name.is_empty() {
                    String::new()
                } else {
                    parent.to_string()
                },
                full_path: coll.path.clone(),
                id: coll.id,
                owner_name: coll.owner_name,
                owner_zone: coll.owner_zone,
                modify_time: coll.modify_time,
            };
            catalog
                .collection_index
                .insert(coll.path, catalog.collections.len());
            catalog.collections.push(entry);
        }

        for object in document.data_objects {
            if !catalog.collection_index.contains_key(&object.collection) {
                bail!(
                    "data object {} references unknown collection {}",
                    object.name,
                    object.collection
                );
            }
            if object.name.is_empty() || object.name.contains(paths::SEPARATOR) {
                bail!(
                    "data object name '{}' in {} must be a single non-empty segment",
                    object.name,
                    object.collection
                );
            }
            let full_path = paths::join(&object.collection, &object.name);
            if catalog.object_index.contains_key(&full_path) {
                bail!("duplicate data object {full_path}");
            }
            if object.replicas.is_empty() {
                bail!("data object {full_path} has no replicas");
            }

            let mut numbers = BTreeSet::new();
            let mut slots = Vec::with_capacity(object.replicas.len());
            for replica in object.replicas {
                if !numbers.insert(replica.number) {
                    bail!(
                        "data object {full_path} declares replica {} twice",
                        replica.number
                    );
                }
                slots.push(catalog.replicas.len());
                catalog.replicas.push(DataObjectEntry {
                    name: object.name.clone(),
                    collection_path: object.collection.clone(),
                    full_path: full_path.clone(),
                    id: object.id,
                    owner_name: object.owner_name.clone(),
                    owner_zone: object.owner_zone.clone(),
                    modify_time: replica.modify_time,
                    size: replica.size,
                    replica_number: replica.number,
                    replica_status: replica.status,
                    resc_name: replica.resource,
                    checksum: replica.checksum,
                    physical_path: replica.physical_path,
                });
            }
            catalog.object_index.insert(full_path, slots);
        }

        Ok(catalog)
    }

    /// Number of registered collections.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Number of distinct data objects (not replicas).
    pub fn data_object_count(&self) -> usize {
        self.object_index.len()
    }
}

impl Catalog for SnapshotCatalog {
    fn collection_exists(&self, path: &str) -> Result<bool> {
        Ok(self.collection_index.contains_key(path))
    }

    fn data_object_exists(&self, path: &str) -> Result<bool> {
        Ok(self.object_index.contains_key(path))
    }

    fn list_direct_children(&self, collection: &str) -> Result<DirectChildren> {
        let collections = self
            .collections
            .iter()
            .filter(|c| c.parent_path == collection)
            .cloned()
            .collect();
        let data_objects = self
            .replicas
            .iter()
            .filter(|d| d.collection_path == collection)
            .cloned()
            .collect();
        Ok(DirectChildren {
            collections,
            data_objects,
        })
    }

    fn list_descendant_collections(&self, collection: &str) -> Result<Vec<String>> {
        let prefix = if collection.ends_with(paths::SEPARATOR) {
            collection.to_string()
        } else {
            format!("{collection}{}", paths::SEPARATOR)
        };
        Ok(self
            .collections
            .iter()
            .map(|c| c.full_path.as_str())
            .filter(|p| p.starts_with(&prefix) && p.len() > prefix.len())
            .map(str::to_string)
            .collect())
    }

    fn data_object_replicas(&self, path: &str) -> Result<Vec<DataObjectEntry>> {
        Ok(self
            .object_index
            .get(path)
            .map(|slots| slots.iter().map(|&i| self.replicas[i].clone()).collect())
            .unwrap_or_default())
    }
}

fn validate_collection_path(path: &str) -> Result<()> {
    if !paths::is_absolute(path) {
        bail!("collection path '{path}' must be absolute");
    }
    if paths::normalize(path) != path {
        bail!("collection path '{path}' must be normalised");
    }
    Ok(())
}
