//! Typed catalog entries.
//!
//! Field names follow the catalog's own column names (`full_name`,
//! `resc_name`, `parent_name`) so the structured renderers emit the keys
//! users of the catalog expect.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplicaStatus {
    #[serde(rename = "1")]
    UpToDate,
    #[serde(rename = "0")]
    Stale,
}

impl ReplicaStatus {
    /// Short label used by the long listing (`OK` / `STL`).
    pub fn label(&self) -> &'static str {
        match self {
            ReplicaStatus::UpToDate => "OK",
            ReplicaStatus::Stale => "STL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CollectionEntry {
    /// Last path segment.
    pub name: String,
    #[serde(rename = "full_name")]
    pub full_path: String,
    #[serde(rename = "parent_name")]
    pub parent_path: String,
    pub id: u64,
    pub owner_name: String,
    pub owner_zone: String,
    pub modify_time: i64,
}

/// One replica of a data object. Replicas of the same object share
/// `full_path` and `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataObjectEntry {
    pub name: String,
    #[serde(rename = "collection")]
    pub collection_path: String,
    #[serde(rename = "full_name")]
    pub full_path: String,
    pub id: u64,
    pub owner_name: String,
    pub owner_zone: String,
    pub modify_time: i64,
    pub size: u64,
    pub replica_number: u32,
    pub replica_status: ReplicaStatus,
    pub resc_name: String,
    pub checksum: Option<String>,
    pub physical_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogEntry {
    Collection(CollectionEntry),
    #[serde(rename = "dataobject")]
    DataObject(DataObjectEntry),
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Collection(c) => &c.name,
            CatalogEntry::DataObject(d) => &d.name,
        }
    }

    pub fn full_path(&self) -> &str {
        match self {
            CatalogEntry::Collection(c) => &c.full_path,
            CatalogEntry::DataObject(d) => &d.full_path,
        }
    }

    pub fn owner_name(&self) -> &str {
        match self {
            CatalogEntry::Collection(c) => &c.owner_name,
            CatalogEntry::DataObject(d) => &d.owner_name,
        }
    }

    pub fn modify_time(&self) -> i64 {
        match self {
            CatalogEntry::Collection(c) => c.modify_time,
            CatalogEntry::DataObject(d) => d.modify_time,
        }
    }

    /// Size in bytes; collections have none.
    pub fn size(&self) -> Option<u64> {
        match self {
            CatalogEntry::Collection(_) => None,
            CatalogEntry::DataObject(d) => Some(d.size),
        }
    }

    pub fn as_data_object(&self) -> Option<&DataObjectEntry> {
        match self {
            CatalogEntry::DataObject(d) => Some(d),
            CatalogEntry::Collection(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, CatalogEntry::Collection(_))
    }
}

impl From<CollectionEntry> for CatalogEntry {
    fn from(value: CollectionEntry) -> Self {
        CatalogEntry::Collection(value)
    }
}

impl From<DataObjectEntry> for CatalogEntry {
    fn from(value: DataObjectEntry) -> Self {
        CatalogEntry::DataObject(value)
    }
}
