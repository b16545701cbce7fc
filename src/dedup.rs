//! Collapses replica records so each data object is listed once.

use crate::catalog::CatalogEntry;
use crate::retrieve::QueryResult;
use std::collections::BTreeSet;

/// Keep the first record per data object path; collections pass through.
pub fn dedup_replicas(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    entries
        .into_iter()
        .filter(|entry| match entry {
            CatalogEntry::DataObject(d) => seen.insert(d.full_path.clone()),
            CatalogEntry::Collection(_) => true,
        })
        .collect()
}

/// Deduplicate each query's results independently.
pub fn dedup_results(results: Vec<QueryResult>) -> Vec<QueryResult> {
    results
        .into_iter()
        .map(|result| result.map_results(dedup_replicas))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coll, replica};

    fn resources(entries: &[CatalogEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                CatalogEntry::DataObject(d) => format!("{}@{}", d.name, d.resc_name),
                CatalogEntry::Collection(c) => format!("C {}", c.name),
            })
            .collect()
    }

    #[test]
    fn keeps_first_replica_and_all_collections() {
        let entries = vec![
            replica("/z/a.dat", "R2", 1, 5).into(),
            coll("/z/sub"),
            replica("/z/a.dat", "R1", 0, 5).into(),
            replica("/z/b.dat", "R1", 0, 5).into(),
            coll("/z/sub"),
        ];
        let out = dedup_replicas(entries);
        assert_eq!(
            resources(&out),
            vec!["a.dat@R2", "C sub", "b.dat@R1", "C sub"]
        );
    }

    #[test]
    fn dedup_is_idempotent() {
        let entries: Vec<CatalogEntry> = vec![
            replica("/z/a", "R1", 0, 1).into(),
            replica("/z/a", "R2", 1, 1).into(),
            coll("/z/c"),
            replica("/z/b", "R1", 0, 1).into(),
        ];
        let once = dedup_replicas(entries);
        let twice = dedup_replicas(once.clone());
        assert_eq!(once, twice);
    }
}
