use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ExplorerError, Result};
use crate::tree::{Children, Node};

use super::options::ScanOptions;

/// Scan a project directory into a tree rooted at path `/`.
pub fn scan_project(root: &Path, options: &ScanOptions) -> Result<Node> {
    let root = canonical_dir(root)?;
    let mut tree = scan_from(&root, &root, options)?;
    tree.path = "/".to_string();
    tree.id = Some(tree.path.clone());
    tree.toggled = options.expand_root;

    tracing::debug!(root = %root.display(), nodes = tree.count(), "Scanned project");
    Ok(tree)
}

/// Scan one directory of a project, keeping paths relative to the project
/// root. `project_path` is a node path such as `/src/components`.
pub fn scan_subtree(root: &Path, project_path: &str, options: &ScanOptions) -> Result<Node> {
    let root = canonical_dir(root)?;
    let start = root.join(project_path.trim_start_matches('/'));
    if !start.is_dir() {
        return Err(ExplorerError::NotADirectory(start));
    }
    scan_from(&root, &start, options)
}

/// Project-relative node path of `path`, always starting with `/`.
pub fn project_path(root: &Path, path: &Path) -> String {
    let relative: Vec<_> = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("/{}", relative.join("/"))
}

fn canonical_dir(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(ExplorerError::PathNotFound(root.to_path_buf()));
    }
    let root = root.canonicalize().map_err(|e| ExplorerError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !root.is_dir() {
        return Err(ExplorerError::NotADirectory(root));
    }
    Ok(root)
}

fn scan_from(root: &Path, start: &Path, options: &ScanOptions) -> Result<Node> {
    let mut walker = WalkDir::new(start).follow_links(options.follow_symlinks);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut entries: HashMap<PathBuf, Node> = HashMap::new();

    let walk = walker.into_iter().filter_entry(|entry| {
        options.include_hidden
            || entry.depth() == 0
            || !entry.file_name().to_string_lossy().starts_with('.')
    });

    for result in walk {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path().to_path_buf();
        let node_path = project_path(root, &path);
        let name = entry.file_name().to_string_lossy().into_owned();

        let node = if entry.file_type().is_dir() {
            let at_limit = options.max_depth == Some(entry.depth()) && entry.depth() > 0;
            Node::folder(name, node_path.clone(), vec![]).with_loading(at_limit)
        } else {
            Node::file(name, node_path.clone())
        };

        entries.insert(path, node.with_id(node_path));
    }

    build_tree(start, entries)
}

/// Build a tree structure from a flat HashMap of nodes
fn build_tree(start: &Path, mut entries: HashMap<PathBuf, Node>) -> Result<Node> {
    // Deepest first, so children are complete before they move into parents
    let mut paths: Vec<_> = entries.keys().cloned().collect();
    paths.sort_by_key(|path| std::cmp::Reverse(path.components().count()));

    for path in &paths {
        if path == start {
            continue;
        }

        let Some(parent_path) = path.parent() else {
            continue;
        };
        if let Some(node) = entries.remove(path) {
            if let Some(parent) = entries.get_mut(parent_path) {
                if let Children::Many(children) = &mut parent.children {
                    children.push(node);
                }
            }
        }
    }

    let mut root = entries
        .remove(start)
        .ok_or_else(|| ExplorerError::PathNotFound(start.to_path_buf()))?;
    sort_recursive(&mut root);
    Ok(root)
}

/// Folders first, then case-insensitive name order.
fn sort_recursive(node: &mut Node) {
    if let Children::Many(children) = &mut node.children {
        children.sort_by(|a, b| {
            b.is_folder()
                .cmp(&a.is_folder())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
    }
    for child in node.children.iter_mut() {
        sort_recursive(child);
    }
}
