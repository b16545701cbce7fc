//! In-crate fixtures for unit tests.

use crate::catalog::{
    Catalog, CatalogEntry, CollectionEntry, DataObjectEntry, DirectChildren, ReplicaStatus,
};
use crate::environment::EnvironmentConfig;
use crate::paths;
use anyhow::Result;
use serde_json::json;

pub fn collection_entry(path: &str) -> CollectionEntry {
    let (parent, _) = paths::split(path);
    CollectionEntry {
        name: paths::last_segment(path).to_string(),
        full_path: path.to_string(),
        parent_path: parent.to_string(),
        id: 1,
        owner_name: "alice".to_string(),
        owner_zone: "zone".to_string(),
        modify_time: 0,
    }
}

pub fn replica(path: &str, resource: &str, number: u32, size: u64) -> DataObjectEntry {
    let (collection, name) = paths::split(path);
    DataObjectEntry {
        name: name.to_string(),
        collection_path: collection.to_string(),
        full_path: path.to_string(),
        id: 100,
        owner_name: "alice".to_string(),
        owner_zone: "zone".to_string(),
        modify_time: 0,
        size,
        replica_number: number,
        replica_status: ReplicaStatus::UpToDate,
        resc_name: resource.to_string(),
        checksum: None,
        physical_path: format!("/vault/{resource}{path}"),
    }
}

pub fn config(zone: &str, user: &str) -> EnvironmentConfig {
    EnvironmentConfig::from_json(json!({
        "irods_host": "localhost",
        "irods_port": 1247,
        "irods_user_name": user,
        "irods_zone_name": zone,
    }))
    .expect("fixture config is valid")
}

pub fn object(path: &str, size: u64) -> CatalogEntry {
    CatalogEntry::DataObject(replica(path, "R1", 0, size))
}

pub fn coll(path: &str) -> CatalogEntry {
    CatalogEntry::Collection(collection_entry(path))
}

/// Lenient catalog: parents need not exist.
#[derive(Default)]
pub struct FakeCatalog {
    collections: Vec<CollectionEntry>,
    replicas: Vec<DataObjectEntry>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(mut self, path: &str) -> Self {
        self.collections.push(collection_entry(path));
        self
    }

    pub fn object(mut self, path: &str, resources: &[&str]) -> Self {
        for (number, resource) in resources.iter().enumerate() {
            self.replicas.push(replica(path, resource, number as u32, 10));
        }
        self
    }

    pub fn replica(mut self, entry: DataObjectEntry) -> Self {
        self.replicas.push(entry);
        self
    }
}

impl Catalog for FakeCatalog {
    fn collection_exists(&self, path: &str) -> Result<bool> {
        Ok(self.collections.iter().any(|c| c.full_path == path))
    }

    fn data_object_exists(&self, path: &str) -> Result<bool> {
        Ok(self.replicas.iter().any(|d| d.full_path == path))
    }

    fn list_direct_children(&self, collection: &str) -> Result<DirectChildren> {
        Ok(DirectChildren {
            collections: self
                .collections
                .iter()
                .filter(|c| c.parent_path == collection)
                .cloned()
                .collect(),
            data_objects: self
                .replicas
                .iter()
                .filter(|d| d.collection_path == collection)
                .cloned()
                .collect(),
        })
    }

    fn list_descendant_collections(&self, collection: &str) -> Result<Vec<String>> {
        let prefix = format!("{collection}/");
        Ok(self
            .collections
            .iter()
            .filter(|c| c.full_path.starts_with(&prefix))
            .map(|c| c.full_path.clone())
            .collect())
    }

    fn data_object_replicas(&self, path: &str) -> Result<Vec<DataObjectEntry>> {
        Ok(self
            .replicas
            .iter()
            .filter(|d| d.full_path == path)
            .cloned()
            .collect())
    }
}
