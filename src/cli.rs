use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Tree Explorer - browse a project as a collapsible tree
#[derive(Parser, Debug)]
#[command(name = "tree-explorer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse a project interactively
    Browse(BrowseArgs),

    /// Print a project tree to stdout
    Print(PrintArgs),

    /// Show which context menu a file or folder maps to
    Classify(ClassifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the tree comes from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read the tree from a JSON file instead of scanning a directory
    #[arg(short, long, value_name = "FILE", conflicts_with = "path")]
    pub tree: Option<PathBuf>,

    /// Project name (defaults to the root node's name)
    #[arg(short, long, value_name = "NAME")]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Disable animations
    #[arg(long)]
    pub no_animations: bool,
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Expand every folder before printing
    #[arg(short, long)]
    pub expand_all: bool,

    /// Append each node's context-menu category
    #[arg(long)]
    pub categories: bool,

    /// Output the tree as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// File or folder name
    pub name: String,

    /// Project-relative path (defaults to /NAME)
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Treat the node as a folder
    #[arg(long)]
    pub folder: bool,

    /// Current project name
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
