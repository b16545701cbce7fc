//! `pwd`, `cd`, `ls` and `find`.
//!
//! Each command verifies the local environment before touching the catalog.
//! The catalog-facing halves (`list`, `find_entries`, `change_collection`)
//! take any [`Catalog`] so they can run against fixtures.

use crate::catalog::Catalog;
use crate::cli::{CdArgs, Cli, Command, FindArgs, LsArgs};
use crate::dedup::dedup_results;
use crate::environment::{
    CwdStore, EnvironmentConfig, EnvironmentPaths, SessionCwdStore, verify_environment,
};
use crate::expand::expand_queries;
use crate::filter::{FilterSpec, filter_results};
use crate::paths;
use crate::render::{ListingStyle, RenderOptions, render_listing, render_paths};
use crate::retrieve::{QueryResult, retrieve};
use crate::session::connect;
use crate::sort::SortKey;
use anyhow::{Result, bail};
use std::io::Write;
use tracing::debug;

pub fn run(cli: &Cli, paths: &EnvironmentPaths, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Pwd(_) => command_pwd(paths, out),
        Command::Cd(args) => command_cd(paths, args),
        Command::Ls(args) => command_ls(paths, args, out),
        Command::Find(args) => command_find(paths, args, out),
    }
}

fn command_pwd(paths: &EnvironmentPaths, out: &mut dyn Write) -> Result<()> {
    let config = verify_environment(paths, false)?;
    let cwd = SessionCwdStore::new(paths, &config).get()?;
    writeln!(out, "{cwd}")?;
    Ok(())
}

fn command_cd(paths: &EnvironmentPaths, args: &CdArgs) -> Result<()> {
    let config = verify_environment(paths, true)?;
    let store = SessionCwdStore::new(paths, &config);
    let session = connect(paths, &config)?;
    change_collection(&session.catalog, &store, &config, args.directory.as_deref())?;
    Ok(())
}

/// Resolve `directory` (home when absent), check it is a collection and
/// store it as the working collection. Returns the stored path.
pub fn change_collection(
    catalog: &dyn Catalog,
    store: &dyn CwdStore,
    config: &EnvironmentConfig,
    directory: Option<&str>,
) -> Result<String> {
    let mut target = match directory {
        Some(dir) => dir.to_string(),
        None => {
            let home = config.home_collection();
            debug!("Defaulting cwd to home directory: {home}");
            home
        }
    };
    if !paths::is_absolute(&target) {
        target = paths::resolve(&target, &store.get()?);
        debug!("Resolved relative directory to {target}");
    }
    if !catalog.collection_exists(&target)? {
        bail!("This collection does not exist.");
    }
    store.set(&target)?;
    Ok(target)
}

fn listing_style(args: &LsArgs) -> Result<ListingStyle> {
    match (args.long, args.long_physical) {
        (true, true) => bail!("The -l and -L switches of the ls command are incompatible."),
        (true, false) => Ok(ListingStyle::Long),
        (false, true) => Ok(ListingStyle::LongWithPhysicalPath),
        (false, false) => Ok(ListingStyle::Short),
    }
}

fn command_ls(paths: &EnvironmentPaths, args: &LsArgs, out: &mut dyn Write) -> Result<()> {
    let style = listing_style(args)?;
    let config = verify_environment(paths, true)?;
    let cwd = SessionCwdStore::new(paths, &config).get()?;
    let session = connect(paths, &config)?;

    let results = list(
        &session.catalog,
        &cwd,
        &args.queries,
        args.recursive,
        args.sort,
        style,
    )?;
    let options = RenderOptions {
        format: args.format,
        hr_size: args.hr_size,
        style,
    };
    render_listing(&results, &options, out)
}

/// Expand, retrieve and sort; replicas are collapsed unless a long listing
/// asked to see them.
pub fn list(
    catalog: &dyn Catalog,
    cwd: &str,
    queries: &[String],
    recursive: bool,
    sort_key: SortKey,
    style: ListingStyle,
) -> Result<Vec<QueryResult>> {
    let expansion = expand_queries(catalog, cwd, queries, recursive)?;
    let results = retrieve(catalog, expansion.queries, sort_key)?;
    Ok(match style {
        ListingStyle::Short => dedup_results(results),
        ListingStyle::Long | ListingStyle::LongWithPhysicalPath => results,
    })
}

fn command_find(paths: &EnvironmentPaths, args: &FindArgs, out: &mut dyn Write) -> Result<()> {
    let spec = FilterSpec::from_args(&args.filter_args())?;
    let config = verify_environment(paths, true)?;
    let cwd = SessionCwdStore::new(paths, &config).get()?;
    let session = connect(paths, &config)?;

    let results = find_entries(&session.catalog, &cwd, &args.queries, &spec)?;
    render_paths(&results, args.print0, out)
}

/// Recursive, unsorted expansion filtered by `spec`, then deduplicated so
/// filtered-out replicas cannot hide a matching one.
pub fn find_entries(
    catalog: &dyn Catalog,
    cwd: &str,
    queries: &[String],
    spec: &FilterSpec,
) -> Result<Vec<QueryResult>> {
    let expansion = expand_queries(catalog, cwd, queries, true)?;
    let results = retrieve(catalog, expansion.queries, SortKey::Unsorted)?;
    Ok(dedup_results(filter_results(results, spec)))
}
