//! Classify command implementation

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::tree::{classify, MenuCategory, Node};

/// Category and routed menu id of a described node.
pub fn describe(args: &ClassifyArgs, config: &Config) -> (MenuCategory, Option<String>) {
    let path = args
        .path
        .clone()
        .unwrap_or_else(|| format!("/{}", args.name));
    let node = if args.folder {
        Node::folder(args.name.as_str(), path, Vec::new())
    } else {
        Node::file(args.name.as_str(), path)
    };

    let project = args.project.as_deref().or(config.project_name.as_deref());
    let category = classify(&node, project);
    let menu_id = config
        .context_menu_ids()
        .menu_for(category)
        .map(str::to_string);
    (category, menu_id)
}

/// Run the classify command
pub fn run(args: ClassifyArgs, config: &Config, verbose: bool) -> Result<()> {
    let (category, menu_id) = describe(&args, config);
    tracing::info!(name = %args.name, %category, menu = ?menu_id, "Classified node");

    match menu_id {
        Some(menu_id) if verbose => println!("{}\t{}", category, menu_id),
        _ => println!("{}", category),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> ClassifyArgs {
        ClassifyArgs {
            name: name.to_string(),
            path: None,
            folder: false,
            project: None,
        }
    }

    #[test]
    fn test_describe_page() {
        let (category, menu) = describe(&args("index.html"), &Config::default());
        assert_eq!(category, MenuCategory::Pages);
        assert_eq!(menu.as_deref(), Some("pages-menu"));
    }

    #[test]
    fn test_describe_component_by_path() {
        let mut args = args("nav.htm");
        args.path = Some("/__components/nav.htm".to_string());
        let (category, _) = describe(&args, &Config::default());
        assert_eq!(category, MenuCategory::Component);
    }

    #[test]
    fn test_describe_project_wins_over_folder() {
        let mut args = args("site");
        args.folder = true;
        args.project = Some("site".to_string());
        let (category, menu) = describe(&args, &Config::default());
        assert_eq!(category, MenuCategory::Project);
        assert_eq!(menu.as_deref(), Some("project-menu"));
    }

    #[test]
    fn test_describe_without_routes() {
        let mut config = Config::default();
        config.context_menu.enabled = false;
        let (category, menu) = describe(&args("data.json"), &config);
        assert_eq!(category, MenuCategory::Assets);
        assert_eq!(menu, None);
    }
}
