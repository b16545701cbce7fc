//! CSV listing: one row per entry.

use crate::catalog::CatalogEntry;
use crate::render::humanize::{human_size, readable_date};
use crate::render::{HrSize, RenderOptions};
use crate::retrieve::QueryResult;
use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;

const HEADER: [&str; 11] = [
    "Type",
    "Original query",
    "Owner name",
    "Replica number",
    "Resource name",
    "Replica status",
    "Size",
    "Modification time",
    "Name",
    "Full name",
    "Physical path",
];

pub fn render(results: &[QueryResult], options: &RenderOptions, out: &mut dyn Write) -> Result<()> {
    // Only an explicit `yes` switches CSV to human-readable sizes.
    let human = options.hr_size == HrSize::Yes;
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(HEADER)?;

    for result in results {
        let original = result.query.original_query.as_str();
        for entry in &result.results {
            let record: [String; 11] = match entry {
                CatalogEntry::Collection(c) => [
                    "collection".into(),
                    original.into(),
                    c.owner_name.clone(),
                    "-".into(),
                    "-".into(),
                    "-".into(),
                    "-".into(),
                    readable_date(c.modify_time),
                    c.name.clone(),
                    c.full_path.clone(),
                    "-".into(),
                ],
                CatalogEntry::DataObject(d) => [
                    "dataobject".into(),
                    original.into(),
                    d.owner_name.clone(),
                    d.replica_number.to_string(),
                    d.resc_name.clone(),
                    d.replica_status.label().into(),
                    if human {
                        human_size(d.size)
                    } else {
                        d.size.to_string()
                    },
                    readable_date(d.modify_time),
                    d.name.clone(),
                    d.full_path.clone(),
                    d.physical_path.clone(),
                ],
            };
            writer.write_record(&record)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{EntryType, ExpandedQuery};
    use crate::test_support::{coll, replica};

    fn csv_for(hr_size: HrSize) -> String {
        let results = vec![QueryResult {
            query: ExpandedQuery {
                original_query: "proj".into(),
                expanded_path: "/z/proj".into(),
                entry_type: EntryType::Collection,
            },
            results: vec![
                coll("/z/proj/raw"),
                replica("/z/proj/a, b.dat", "R1", 0, 4096).into(),
            ],
        }];
        let options = RenderOptions {
            hr_size,
            ..RenderOptions::default()
        };
        let mut out = Vec::new();
        render(&results, &options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn rows_follow_header_and_quote_commas() {
        let text = csv_for(HrSize::Default);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Type,Original query,Owner name"));
        assert!(lines[1].starts_with("collection,proj,alice,-,-,-,-,"));
        assert!(lines[1].ends_with(",raw,/z/proj/raw,-"));
        assert!(lines[2].starts_with("dataobject,proj,alice,0,R1,OK,4096,"));
        assert!(lines[2].contains("\"a, b.dat\""));
    }

    #[test]
    fn human_sizes_only_when_requested() {
        assert!(csv_for(HrSize::Yes).contains(",4.0K,"));
        assert!(csv_for(HrSize::No).contains(",4096,"));
    }
}
