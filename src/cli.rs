//! Command-line surface of `ii`.

use crate::filter::FilterArgs;
use crate::render::{HrSize, OutputFormat};
use crate::sort::SortKey;
use clap::{Args, Parser, Subcommand};

/// Command line utilities for a hierarchical data catalog.
#[derive(Debug, Parser)]
#[command(name = "ii", version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Pwd(args) => args.verbose,
            Command::Cd(args) => args.verbose,
            Command::Ls(args) => args.verbose,
            Command::Find(args) => args.verbose,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print working directory/collection.
    Pwd(PwdArgs),
    /// Change working directory/collection.
    Cd(CdArgs),
    /// List collections or data objects.
    Ls(LsArgs),
    /// Find data objects by property.
    Find(FindArgs),
}

#[derive(Debug, Args)]
pub struct PwdArgs {
    /// Print verbose information for troubleshooting.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CdArgs {
    /// Print verbose information for troubleshooting.
    #[arg(short, long)]
    pub verbose: bool,
    /// Collection to change to; defaults to the home collection.
    pub directory: Option<String>,
}

#[derive(Debug, Args)]
pub struct LsArgs {
    /// Print verbose information for troubleshooting.
    #[arg(short, long)]
    pub verbose: bool,
    /// Collection, data object or data object wildcard.
    pub queries: Vec<String>,
    /// Output format.
    #[arg(short = 'm', long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
    /// Property to use for sorting.
    #[arg(short, long, value_enum, default_value_t = SortKey::Name)]
    pub sort: SortKey,
    /// Whether to print human-readable sizes. By default, enabled for text
    /// output and disabled for other formats.
    #[arg(short = 'H', long, value_enum, default_value_t = HrSize::Default)]
    pub hr_size: HrSize,
    /// Include contents of subcollections.
    #[arg(short, long)]
    pub recursive: bool,
    /// Display replicas with size, resource, owner, date.
    #[arg(short = 'l')]
    pub long: bool,
    /// Like -l, but also display checksum and physical path.
    #[arg(short = 'L')]
    pub long_physical: bool,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Print verbose information for troubleshooting.
    #[arg(short, long)]
    pub verbose: bool,
    /// Collection, data object or data object wildcard.
    pub queries: Vec<String>,
    /// Use 0 byte delimiters between results.
    #[arg(short = '0', long)]
    pub print0: bool,
    /// Wildcard filter for data object name.
    #[arg(long)]
    pub dname: Option<String>,
    /// Filter for data object owner name (excluding zone).
    #[arg(long)]
    pub owner_name: Option<String>,
    /// Filter for data object owner zone.
    #[arg(long)]
    pub owner_zone: Option<String>,
    /// Filter for data object resource.
    #[arg(long)]
    pub resc_name: Option<String>,
    /// Filter for minimum data object size (human-readable sizes like "2g" allowed).
    #[arg(long)]
    pub minsize: Option<String>,
    /// Filter for maximum data object size (human-readable sizes like "2g" allowed).
    #[arg(long)]
    pub maxsize: Option<String>,
    /// Filter for (exact) data object size (human-readable sizes like "2g" allowed).
    #[arg(long)]
    pub size: Option<String>,
}

impl FindArgs {
    pub fn filter_args(&self) -> FilterArgs {
        FilterArgs {
            name_glob: self.dname.clone(),
            owner_name: self.owner_name.clone(),
            owner_zone: self.owner_zone.clone(),
            resource_name: self.resc_name.clone(),
            exact_size: self.size.clone(),
            min_size: self.minsize.clone(),
            max_size: self.maxsize.clone(),
        }
    }
}
