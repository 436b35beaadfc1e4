//! Context-menu category inference.
//!
//! Classification is a pure function of the node and the current project
//! name, kept apart from rendering so it can be tested on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::node::Node;

/// Path prefix under which HTML-like files are components rather than pages.
pub const COMPONENTS_PREFIX: &str = "/__components";

/// Extension used when a name has no `.` segment.
pub const DEFAULT_EXTENSION: &str = "txt";

const HTML_EXTENSIONS: [&str; 4] = ["html", "htmldl", "htm", "htmdl"];

/// Which context menu a node's header is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    /// The project root.
    Project,
    /// Any node with children.
    Folder,
    /// An HTML-like file under `/__components`.
    Component,
    /// Any other HTML-like file.
    Pages,
    /// Everything else.
    Assets,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::Project,
        MenuCategory::Folder,
        MenuCategory::Component,
        MenuCategory::Pages,
        MenuCategory::Assets,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MenuCategory::Project => "project",
            MenuCategory::Folder => "folder",
            MenuCategory::Component => "component",
            MenuCategory::Pages => "pages",
            MenuCategory::Assets => "assets",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown menu category '{}'", s))
    }
}

/// Infer the extension of a file name.
///
/// Only the second and third `.`-separated segments count. When both exist
/// they are concatenated without a separator, so `archive.tar.gz` yields
/// `targz` and `index.html.dl` yields `htmldl`.
pub fn infer_extension(name: &str) -> String {
    let mut segments = name.split('.').skip(1);

    match (segments.next(), segments.next()) {
        (Some(first), Some(second)) => format!("{}{}", first, second).to_lowercase(),
        (Some(first), None) => first.to_lowercase(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// True for the extensions rendered as pages or components.
pub fn is_html_like(extension: &str) -> bool {
    HTML_EXTENSIONS.contains(&extension)
}

/// Classify a node, in priority order: project, folder, component, pages, assets.
pub fn classify(node: &Node, project_name: Option<&str>) -> MenuCategory {
    if project_name == Some(node.name.as_str()) {
        return MenuCategory::Project;
    }

    if node.is_folder() {
        return MenuCategory::Folder;
    }

    if is_html_like(&infer_extension(&node.name)) {
        if node.path.starts_with(COMPONENTS_PREFIX) {
            MenuCategory::Component
        } else {
            MenuCategory::Pages
        }
    } else {
        MenuCategory::Assets
    }
}
