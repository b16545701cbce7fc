//! Fetches the entries behind each expanded query.

use crate::catalog::{Catalog, CatalogEntry};
use crate::expand::{EntryType, ExpandedQuery};
use crate::sort::{SortKey, sort_entries};
use anyhow::{Context, Result};

/// An expanded query together with the entries it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult {
    pub query: ExpandedQuery,
    pub results: Vec<CatalogEntry>,
}

impl QueryResult {
    /// Apply `f` to this query's results, keeping the query itself.
    pub fn map_results(self, f: impl FnOnce(Vec<CatalogEntry>) -> Vec<CatalogEntry>) -> Self {
        QueryResult {
            query: self.query,
            results: f(self.results),
        }
    }
}

/// Retrieve and sort the results of every query, preserving query order.
///
/// Collections yield their direct subcollections followed by every replica
/// of their direct data objects; data objects yield their replicas.
pub fn retrieve(
    catalog: &dyn Catalog,
    queries: Vec<ExpandedQuery>,
    sort_key: SortKey,
) -> Result<Vec<QueryResult>> {
    queries
        .into_iter()
        .map(|query| -> Result<QueryResult> {
            let path = &query.expanded_path;
            let results: Vec<CatalogEntry> = match query.entry_type {
                EntryType::Collection => {
                    let children = catalog
                        .list_direct_children(path)
                        .with_context(|| format!("listing collection {path}"))?;
                    children
                        .collections
                        .into_iter()
                        .map(CatalogEntry::from)
                        .chain(children.data_objects.into_iter().map(CatalogEntry::from))
                        .collect()
                }
                EntryType::DataObject => catalog
                    .data_object_replicas(path)
                    .with_context(|| format!("fetching replicas of {path}"))?
                    .into_iter()
                    .map(CatalogEntry::from)
                    .collect(),
            };
            Ok(QueryResult {
                results: sort_entries(results, sort_key),
                query,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeCatalog;

    fn query(path: &str, entry_type: EntryType) -> ExpandedQuery {
        ExpandedQuery {
            original_query: path.to_string(),
            expanded_path: path.to_string(),
            entry_type,
        }
    }

    #[test]
    fn collection_lists_subcollections_before_objects() {
        let catalog = FakeCatalog::new()
            .collection("/z")
            .object("/z/a.dat", &["R1", "R2"])
            .collection("/z/sub");
        let results = retrieve(
            &catalog,
            vec![query("/z", EntryType::Collection)],
            SortKey::Unsorted,
        )
        .unwrap();
        let kinds: Vec<_> = results[0]
            .results
            .iter()
            .map(|e| (e.is_collection(), e.full_path()))
            .collect();
        assert_eq!(
            kinds,
            vec![(true, "/z/sub"), (false, "/z/a.dat"), (false, "/z/a.dat")]
        );
    }

    #[test]
    fn data_object_yields_every_replica_sorted() {
        let catalog = FakeCatalog::new().object("/z/a.dat", &["R1", "R2", "R3"]);
        let results = retrieve(
            &catalog,
            vec![query("/z/a.dat", EntryType::DataObject)],
            SortKey::Name,
        )
        .unwrap();
        assert_eq!(results[0].results.len(), 3);
        let resources: Vec<_> = results[0]
            .results
            .iter()
            .filter_map(CatalogEntry::as_data_object)
            .map(|d| d.resc_name.as_str())
            .collect();
        assert_eq!(resources, vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn sort_applies_within_each_query() {
        let catalog = FakeCatalog::new()
            .collection("/z")
            .object("/z/b", &["R1"])
            .object("/z/a", &["R1"]);
        let results = retrieve(
            &catalog,
            vec![query("/z", EntryType::Collection)],
            SortKey::Name,
        )
        .unwrap();
        let names: Vec<_> = results[0].results.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
