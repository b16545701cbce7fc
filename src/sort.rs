//! Per-query ordering of retrieved entries.
//!
//! Every key sorts stably: entries comparing equal keep their input order.

use crate::catalog::CatalogEntry;
use anyhow::{Result, bail};
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Ext,
    Size,
    Date,
    Unsorted,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Ext => "ext",
            SortKey::Size => "size",
            SortKey::Date => "date",
            SortKey::Unsorted => "unsorted",
        }
    }
}

impl TryFrom<&str> for SortKey {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "name" => Ok(SortKey::Name),
            "ext" => Ok(SortKey::Ext),
            "size" => Ok(SortKey::Size),
            "date" => Ok(SortKey::Date),
            "unsorted" => Ok(SortKey::Unsorted),
            other => bail!("Sort option {other} not supported."),
        }
    }
}

pub fn sort_entries(mut entries: Vec<CatalogEntry>, key: SortKey) -> Vec<CatalogEntry> {
    match key {
        SortKey::Unsorted => {}
        SortKey::Name => entries.sort_by(|a, b| a.name().cmp(b.name())),
        SortKey::Ext => entries.sort_by(|a, b| extension_key(a).cmp(extension_key(b))),
        SortKey::Size => entries.sort_by_key(|e| e.size().unwrap_or(0)),
        SortKey::Date => entries.sort_by_key(CatalogEntry::modify_time),
    }
    entries
}

/// Text after the last `.` for data objects (whole name without one);
/// collections sort by name.
fn extension_key(entry: &CatalogEntry) -> &str {
    match entry {
        CatalogEntry::DataObject(d) => d.name.rsplit('.').next().unwrap_or(&d.name),
        CatalogEntry::Collection(c) => &c.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coll, object, replica};

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.full_path()).collect()
    }

    #[test]
    fn unsorted_preserves_input() {
        let input = vec![object("/z/b", 1), coll("/z/a"), object("/z/c", 0)];
        let out = sort_entries(input.clone(), SortKey::Unsorted);
        assert_eq!(out, input);
    }

    #[test]
    fn name_sort_is_lexicographic() {
        let out = sort_entries(
            vec![object("/z/b", 1), coll("/z/c"), object("/z/a", 0)],
            SortKey::Name,
        );
        assert_eq!(names(&out), vec!["/z/a", "/z/b", "/z/c"]);
    }

    #[test]
    fn ext_sort_uses_suffix_or_whole_name() {
        let out = sort_entries(
            vec![
                object("/z/x.zip", 0),
                object("/z/README", 0),
                coll("/z/bin"),
                object("/z/y.csv", 0),
            ],
            SortKey::Ext,
        );
        assert_eq!(names(&out), vec!["/z/README", "/z/bin", "/z/y.csv", "/z/x.zip"]);
    }

    #[test]
    fn size_sort_treats_collections_as_zero_and_is_stable() {
        let out = sort_entries(
            vec![
                object("/z/big", 9),
                object("/z/first_zero", 0),
                coll("/z/dir"),
                object("/z/small", 3),
            ],
            SortKey::Size,
        );
        assert_eq!(names(&out), vec!["/z/first_zero", "/z/dir", "/z/small", "/z/big"]);
    }

    #[test]
    fn equal_keys_keep_input_order_for_every_key() {
        let input: Vec<CatalogEntry> = ["R3", "R1", "R2"]
            .iter()
            .enumerate()
            .map(|(i, r)| CatalogEntry::DataObject(replica("/z/same.dat", r, i as u32, 7)))
            .collect();
        for key in [
            SortKey::Name,
            SortKey::Ext,
            SortKey::Size,
            SortKey::Date,
            SortKey::Unsorted,
        ] {
            assert_eq!(sort_entries(input.clone(), key), input, "key {}", key.as_str());
        }
    }

    #[test]
    fn date_sort_orders_by_modify_time() {
        let mut newer = replica("/z/new", "R1", 0, 1);
        newer.modify_time = 200;
        let mut older = replica("/z/old", "R1", 0, 1);
        older.modify_time = 100;
        let out = sort_entries(vec![newer.into(), older.into()], SortKey::Date);
        assert_eq!(names(&out), vec!["/z/old", "/z/new"]);
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let err = SortKey::try_from("colour").unwrap_err();
        assert_eq!(err.to_string(), "Sort option colour not supported.");
        assert_eq!(SortKey::try_from("ext").unwrap(), SortKey::Ext);
    }
}
