//! JSON and YAML listings.
//!
//! Both formats flatten every query's results into one array of entry
//! objects with sorted keys.

use crate::retrieve::QueryResult;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

fn collapse(results: &[QueryResult]) -> Result<Value> {
    let entries = results
        .iter()
        .flat_map(|r| &r.results)
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .context("serializing catalog entries")?;
    // `Value` maps are ordered by key, which gives sorted output.
    Ok(Value::Array(entries))
}

pub fn render_json(results: &[QueryResult], out: &mut dyn Write) -> Result<()> {
    let value = collapse(results)?;
    let mut serializer = Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_yaml(results: &[QueryResult], out: &mut dyn Write) -> Result<()> {
    let value = collapse(results)?;
    let text = serde_yaml::to_string(&value).context("serializing YAML output")?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
