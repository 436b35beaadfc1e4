//! Subcommand implementations

pub mod browse;
pub mod classify;
pub mod print;

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::scan_project;
use crate::tree::Node;

/// Load the tree named by `source`: a JSON tree file when given, otherwise a
/// scan of the project directory with the root expanded.
pub fn load_tree(source: &SourceArgs, config: &Config) -> Result<Node> {
    match &source.tree {
        Some(file) => {
            tracing::info!(file = %file.display(), "Loading tree file");
            Node::load(file)
        }
        None => {
            tracing::info!(path = %source.path.display(), "Scanning project");
            scan_project(&source.path, &config.scan_options().with_expand_root(true))
        }
    }
}

/// Project name for classification: the command line wins over the config.
pub fn project_name<'a>(source: &'a SourceArgs, config: &'a Config) -> Option<&'a str> {
    source
        .project
        .as_deref()
        .or(config.project_name.as_deref())
}
