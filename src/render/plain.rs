//! Plain text listing, in the spirit of `ils`.

use crate::catalog::CatalogEntry;
use crate::expand::EntryType;
use crate::render::humanize::{human_size, readable_date};
use crate::render::{HrSize, ListingStyle, RenderOptions};
use crate::retrieve::QueryResult;
use anyhow::Result;
use std::io::Write;

const LONG_HEADERS: [&str; 8] = ["Type", "Owner", "R#", "Resource", "R?", "Size", "Mdate", "name"];
const SIZE_COLUMN: usize = 5;

pub fn render(results: &[QueryResult], options: &RenderOptions, out: &mut dyn Write) -> Result<()> {
    match options.style {
        ListingStyle::Short => render_short(results, out),
        ListingStyle::Long => render_long(results, options, false, out),
        ListingStyle::LongWithPhysicalPath => render_long(results, options, true, out),
    }
}

fn render_short(results: &[QueryResult], out: &mut dyn Write) -> Result<()> {
    for result in results {
        match result.query.entry_type {
            EntryType::Collection => {
                writeln!(out, "{}:", result.query.expanded_path)?;
                for entry in &result.results {
                    match entry {
                        CatalogEntry::Collection(c) => writeln!(out, "C {}", c.full_path)?,
                        CatalogEntry::DataObject(d) => writeln!(out, "D {}", d.name)?,
                    }
                }
                writeln!(out)?;
            }
            EntryType::DataObject => writeln!(out, "D {}", result.query.original_query)?,
        }
    }
    Ok(())
}

fn render_long(
    results: &[QueryResult],
    options: &RenderOptions,
    physical_paths: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let human = options.hr_size != HrSize::No;
    for result in results {
        if result.query.entry_type == EntryType::Collection {
            writeln!(out, "{}:", result.query.expanded_path)?;
            if result.results.is_empty() {
                writeln!(out)?;
                continue;
            }
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for entry in &result.results {
            match entry {
                CatalogEntry::Collection(c) => rows.push(vec![
                    "C".into(),
                    c.owner_name.clone(),
                    "-".into(),
                    "-".into(),
                    "-".into(),
                    "-".into(),
                    readable_date(c.modify_time),
                    c.name.clone(),
                ]),
                CatalogEntry::DataObject(d) => {
                    rows.push(vec![
                        "D".into(),
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
                    ]);
                    if physical_paths {
                        let mut row = vec![String::new(); 6];
                        row.push("PHY PATH:".into());
                        row.push(d.physical_path.clone());
                        rows.push(row);
                    }
                }
            }
        }
        write_table(&rows, out)?;
    }
    Ok(())
}

/// Borderless table: left-aligned columns except the right-aligned size.
fn write_table(rows: &[Vec<String>], out: &mut dyn Write) -> Result<()> {
    let mut widths: Vec<usize> = LONG_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = LONG_HEADERS.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header).chain(rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(idx, (cell, &width))| {
                if idx == SIZE_COLUMN {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}
