//! Query expansion: wildcards, classification and recursion.
//!
//! Raw user queries become [`ExpandedQuery`] values naming an absolute path
//! that the catalog confirmed as a collection or a data object. Queries that
//! resolve to neither are reported and dropped; they never abort the batch.

use crate::catalog::Catalog;
use crate::paths;
use crate::wildcard;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Collection,
    #[serde(rename = "dataobject")]
    DataObject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpandedQuery {
    pub original_query: String,
    pub expanded_path: String,
    pub entry_type: EntryType,
}

/// Outcome of expanding one batch of queries.
#[derive(Debug, Default)]
pub struct Expansion {
    pub queries: Vec<ExpandedQuery>,
    /// Queries that were neither a collection nor a data object.
    pub unresolved: Vec<String>,
}

/// Expand raw `queries` against the catalog.
///
/// An empty query list means "the working collection". Wildcards are only
/// expanded for single-segment patterns, scoped to `cwd`.
pub fn expand_queries(
    catalog: &dyn Catalog,
    cwd: &str,
    queries: &[String],
    recursive: bool,
) -> Result<Expansion> {
    let defaulted;
    let queries = if queries.is_empty() {
        defaulted = vec![cwd.to_string()];
        &defaulted
    } else {
        queries
    };

    let preprocessed = expand_wildcards(catalog, cwd, queries)?;
    let mut expansion = Expansion::default();

    for query in preprocessed {
        let absolute = paths::to_absolute(&query, cwd);
        if catalog
            .collection_exists(&absolute)
            .with_context(|| format!("checking collection {absolute}"))?
        {
            debug!("Argument \"{query}\" is a collection.");
            let descendants = if recursive {
                catalog
                    .list_descendant_collections(&absolute)
                    .with_context(|| format!("listing subcollections of {absolute}"))?
            } else {
                Vec::new()
            };
            expansion.queries.push(ExpandedQuery {
                original_query: query.clone(),
                expanded_path: absolute,
                entry_type: EntryType::Collection,
            });
            for descendant in descendants {
                debug!("Recursively adding subcollection {descendant} to queries.");
                expansion.queries.push(ExpandedQuery {
                    original_query: query.clone(),
                    expanded_path: descendant,
                    entry_type: EntryType::Collection,
                });
            }
        } else if catalog
            .data_object_exists(&absolute)
            .with_context(|| format!("checking data object {absolute}"))?
        {
            debug!("Argument \"{query}\" is a data object.");
            expansion.queries.push(ExpandedQuery {
                original_query: query,
                expanded_path: absolute,
                entry_type: EntryType::DataObject,
            });
        } else {
            warn!("Query \"{query}\" could not be resolved. Ignoring ...");
            expansion.unresolved.push(query);
        }
    }

    Ok(expansion)
}

/// True for queries the wildcard pass expands: glob characters, no separator.
pub fn is_wildcard_query(query: &str) -> bool {
    !query.contains(paths::SEPARATOR) && (query.contains('*') || query.contains('?'))
}

/// Replace single-segment wildcard queries with the full paths of matching
/// entries in `cwd`: data objects first, then subcollections. Each path is
/// emitted at most once across all patterns. Other queries pass through.
fn expand_wildcards(catalog: &dyn Catalog, cwd: &str, queries: &[String]) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut already_expanded: BTreeSet<String> = BTreeSet::new();
    let mut listing = None;

    for query in queries {
        if !is_wildcard_query(query) {
            out.push(query.clone());
            continue;
        }
        let pattern = match wildcard::compile(query) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!("Query \"{query}\" is not a valid wildcard pattern ({err}). Ignoring ...");
                continue;
            }
        };
        if listing.is_none() {
            listing = Some(
                catalog
                    .list_direct_children(cwd)
                    .with_context(|| format!("listing {cwd} for wildcard expansion"))?,
            );
        }
        let Some(children) = listing.as_ref() else {
            continue;
        };

        let object_paths = children
            .data_objects
            .iter()
            .filter(|d| pattern.matches(&d.name))
            .map(|d| &d.full_path);
        let collection_paths = children
            .collections
            .iter()
            .filter(|c| pattern.matches(&c.name))
            .map(|c| &c.full_path);
        for path in object_paths.chain(collection_paths) {
            if already_expanded.insert(path.clone()) {
                out.push(path.clone());
            }
        }
    }

    Ok(out)
}
