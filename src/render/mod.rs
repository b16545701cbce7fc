//! Output renderers for `ls` and `find`.
//!
//! Renderers consume the per-query result lists produced by the pipeline and
//! write to any `io::Write`, so the binary hands them stdout while tests
//! capture a buffer.

pub mod humanize;
pub mod plain;
pub mod structured;
pub mod tabular;

use crate::retrieve::QueryResult;
use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
    Csv,
    Yaml,
}

/// `--hr-size`: whether sizes are printed human-readable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum HrSize {
    /// Human-readable for plain text only.
    #[default]
    Default,
    Yes,
    No,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListingStyle {
    #[default]
    Short,
    /// `-l`: one row per replica.
    Long,
    /// `-L`: `-l` plus physical paths.
    LongWithPhysicalPath,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub hr_size: HrSize,
    pub style: ListingStyle,
}

pub fn render_listing(
    results: &[QueryResult],
    options: &RenderOptions,
    out: &mut dyn Write,
) -> Result<()> {
    match options.format {
        OutputFormat::Plain => plain::render(results, options, out),
        OutputFormat::Csv => tabular::render(results, options, out),
        OutputFormat::Json => structured::render_json(results, out),
        OutputFormat::Yaml => structured::render_yaml(results, out),
    }
}

/// Full path of every data object in `results`, terminated by `\0` when
/// `print0` is set and by a newline otherwise.
pub fn render_paths(results: &[QueryResult], print0: bool, out: &mut dyn Write) -> Result<()> {
    let terminator = if print0 { "\0" } else { "\n" };
    for entry in results.iter().flat_map(|r| &r.results) {
        if let Some(object) = entry.as_data_object() {
            write!(out, "{}{terminator}", object.full_path)?;
        }
    }
    Ok(())
}
