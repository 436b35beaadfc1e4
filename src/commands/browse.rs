//! Browse command implementation

use crate::cli::BrowseArgs;
use crate::config::Config;
use crate::error::Result;
use crate::tree::Node;
use crate::tui::{self, App};

/// Run the interactive explorer
pub fn run(args: BrowseArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if args.no_animations {
        config.animations.enabled = false;
    }
    if let Some(project) = &args.source.project {
        config.project_name = Some(project.clone());
    }

    let app = match &args.source.tree {
        Some(file) => App::new(Node::load(file)?.with_toggled(true), &config),
        None => App::from_directory(args.source.path.clone(), &config)?,
    };

    tracing::debug!(nodes = app.tree.count(), "Starting explorer");
    tui::run(app)
}
