//! Print command implementation

use crate::cli::PrintArgs;
use crate::config::Config;
use crate::error::Result;
use crate::tree::{render_tree, Animations, ContextMenuIds, Decorators, Node, TreeContext};
use crate::tui::rows::{flatten, to_plain_text};

/// Run the print command
pub fn run(args: PrintArgs, config: &Config) -> Result<()> {
    let mut tree = super::load_tree(&args.source, config)?;
    if args.expand_all {
        tree.set_toggled_recursive(true);
    }

    let output = if args.json {
        let mut json = serde_json::to_string_pretty(&tree)?;
        json.push('\n');
        json
    } else {
        let project = super::project_name(&args.source, config);
        render_text(&tree, config, project, args.categories)
    };

    print!("{}", output);
    Ok(())
}

/// Render the visible part of `tree` as indented plain text. With
/// `categories`, each header is followed by its context-menu category.
pub fn render_text(
    tree: &Node,
    config: &Config,
    project_name: Option<&str>,
    categories: bool,
) -> String {
    let style = config.plain_style();
    let decorators = Decorators::standard();
    let animations = Animations::Disabled;
    let context_menu = if categories {
        ContextMenuIds::by_category()
    } else {
        ContextMenuIds::Disabled
    };
    let ctx = TreeContext {
        style: &style,
        decorators: &decorators,
        animations: &animations,
        on_toggle: None,
        context_menu: &context_menu,
        project_name: project_name.or(Some(tree.name.as_str())),
    };

    let item = render_tree(&ctx, tree);
    let flat = flatten(&item, style.indent);
    if !categories {
        return to_plain_text(&flat.rows);
    }

    let mut output = String::new();
    for row in &flat.rows {
        output.push_str(row.text().trim_end());
        if let Some(menu) = row.menu {
            output.push_str(&format!("  [{}]", menu.category));
        }
        output.push('\n');
    }
    output
}
