//! Application state for the TUI.
//!
//! `App` owns the tree. The tree component only requests toggles; requests
//! arrive through a channel while an element tree is alive and are applied
//! here once it has been dropped.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::scanner::{scan_project, scan_subtree, ScanOptions};
use crate::tree::{
    render_tree, Animations, Children, ContextMenuIds, Decorators, MenuCategory, Node,
    NodeSnapshot, ToggleHandler, TreeContext, TreeStyle,
};

use super::rows::{flatten, Flattened};
use super::transition::{DisplayRow, TransitionTracker};

/// The current UI mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Context menu popup.
    ContextMenu(MenuState),
    /// Help overlay mode.
    Help,
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub menu_id: String,
    pub payload: NodeSnapshot,
    pub items: Vec<String>,
    pub selected: usize,
}

/// A toggle requested by a header click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    /// [`Node::address`] of the clicked node in the rendered tree.
    pub address: usize,
    pub path: String,
    pub toggled: bool,
}

/// What the selected row shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRow {
    pub node: Option<NodeSnapshot>,
    pub category: Option<MenuCategory>,
    pub menu_id: Option<String>,
    pub depth: usize,
}

/// Main application state for the TUI.
pub struct App {
    /// Directory the tree was scanned from, if any.
    pub root: Option<PathBuf>,

    /// The explorer tree.
    pub tree: Node,

    pub project_name: Option<String>,
    pub style: TreeStyle,
    pub decorators: Decorators,
    pub animations: Animations,
    pub context_menu: ContextMenuIds,

    /// Menu id to item labels.
    pub menus: BTreeMap<String, Vec<String>>,

    pub scan_options: ScanOptions,

    /// Currently selected row.
    pub selected: usize,

    /// Current UI mode.
    pub mode: Mode,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    pub transitions: TransitionTracker,

    on_toggle: Box<ToggleHandler<'static>>,
    toggle_rx: Receiver<ToggleRequest>,
    pending_loads: Vec<String>,
}

impl App {
    /// Create a new App around an existing tree.
    pub fn new(tree: Node, config: &Config) -> Self {
        let (tx, toggle_rx) = mpsc::channel();
        let on_toggle: Box<ToggleHandler<'static>> = Box::new(move |node: &Node, toggled: bool| {
            // The receiver lives as long as the App that owns this closure.
            let _ = tx.send(ToggleRequest {
                address: node.address(),
                path: node.path.clone(),
                toggled,
            });
        });

        let project_name = config
            .project_name
            .clone()
            .or_else(|| Some(tree.name.clone()));

        Self {
            root: None,
            tree,
            project_name,
            style: config.tree_style(),
            decorators: Decorators::standard(),
            animations: config.animations(),
            context_menu: config.context_menu_ids(),
            menus: config.context_menu.menus.clone(),
            scan_options: config.scan_options(),
            selected: 0,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            transitions: TransitionTracker::new(),
            on_toggle,
            toggle_rx,
            pending_loads: Vec::new(),
        }
    }

    /// Scan `root` and explore it.
    pub fn from_directory(root: PathBuf, config: &Config) -> Result<Self> {
        let tree = scan_project(&root, &config.scan_options().with_expand_root(true))?;

        let mut app = Self::new(tree, config);
        app.root = Some(root);
        Ok(app)
    }

    /// The read-only context for one render pass.
    pub fn context(&self) -> TreeContext<'_> {
        TreeContext {
            style: &self.style,
            decorators: &self.decorators,
            animations: &self.animations,
            on_toggle: Some(&*self.on_toggle),
            context_menu: &self.context_menu,
            project_name: self.project_name.as_deref(),
        }
    }

    /// Render the tree, flatten it and hand the rows to `f`.
    pub fn with_rows<R>(&self, f: impl FnOnce(&Flattened<'_>) -> R) -> R {
        let ctx = self.context();
        let item = render_tree(&ctx, &self.tree);
        let flat = flatten(&item, self.style.indent);
        f(&flat)
    }

    pub fn row_count(&self) -> usize {
        self.with_rows(|flat| flat.rows.len())
    }

    /// Rows as they should be drawn at `now`, with transitions applied.
    pub fn display_rows(&mut self, now: Instant) -> Vec<DisplayRow> {
        let mut tracker = std::mem::take(&mut self.transitions);
        let display = self.with_rows(|flat| tracker.layout(&flat.rows, &flat.drawers, now));
        self.transitions = tracker;
        display
    }

    pub fn selected_row(&self) -> Option<SelectedRow> {
        let selected = self.selected;
        self.with_rows(|flat| {
            flat.rows.get(selected).map(|row| SelectedRow {
                node: row.header.map(|header| header.node.clone()),
                category: row.menu.map(|menu| menu.category),
                menu_id: row.menu.and_then(|menu| menu.menu_id.clone()),
                depth: row.depth,
            })
        })
    }

    /// Move selection by delta, clamping to valid range.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.row_count();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, count as isize - 1) as usize;
    }

    pub fn select_last(&mut self) {
        self.selected = self.row_count().saturating_sub(1);
    }

    /// Click the selected header, then apply whatever it requested.
    pub fn activate_selected(&mut self) {
        let selected = self.selected;
        self.with_rows(|flat| {
            if let Some(row) = flat.rows.get(selected) {
                row.click();
            }
        });
        self.apply_pending_toggles();
    }

    /// Expand the selected folder if it is collapsed.
    pub fn expand_selected(&mut self) {
        if let Some(SelectedRow { node: Some(node), .. }) = self.selected_row() {
            if node.is_folder && !node.toggled {
                self.activate_selected();
            }
        }
    }

    /// Collapse the selected folder, or jump to its parent.
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row.node {
            Some(node) if node.is_folder && node.toggled => self.activate_selected(),
            _ => self.select_parent(row.depth),
        }
    }

    fn select_parent(&mut self, depth: usize) {
        if depth == 0 {
            return;
        }
        let selected = self.selected;
        let parent = self.with_rows(|flat| {
            flat.rows[..selected.min(flat.rows.len())]
                .iter()
                .rposition(|row| row.depth < depth && row.header.is_some())
        });
        if let Some(parent) = parent {
            self.selected = parent;
        }
    }

    /// Apply toggle requests queued by `on_toggle`.
    ///
    /// Requests name nodes by address, so they must be applied before the
    /// tree is replaced or restructured.
    pub fn apply_pending_toggles(&mut self) -> usize {
        let requests: Vec<_> = self.toggle_rx.try_iter().collect();
        let applied = requests.len();

        for request in requests {
            let Some(node) = self.tree.find_by_address_mut(request.address) else {
                tracing::warn!(path = %request.path, "Toggle for unknown node");
                continue;
            };
            node.toggled = request.toggled;
            tracing::debug!(path = %request.path, toggled = request.toggled, "Applied toggle");

            if request.toggled && node.loading && self.root.is_some() {
                self.pending_loads.push(request.path);
            }
        }

        self.clamp_selection();
        applied
    }

    /// Expand or collapse every folder.
    pub fn set_all_toggled(&mut self, toggled: bool) {
        self.tree.set_toggled_recursive(toggled);
        if !toggled {
            // The root stays open so there is something to navigate.
            self.tree.toggled = true;
        }
        self.clamp_selection();
    }

    /// Periodic work between frames: fills in folders that were opened
    /// while still loading.
    pub fn tick(&mut self) {
        let Some(root) = self.root.clone() else {
            self.pending_loads.clear();
            return;
        };

        for path in std::mem::take(&mut self.pending_loads) {
            match scan_subtree(&root, &path, &self.scan_options) {
                Ok(loaded) => {
                    if let Some(node) = self.tree.find_mut(None, &path) {
                        node.children = match loaded.children {
                            Children::Leaf => Children::Many(Vec::new()),
                            children => children,
                        };
                        node.loading = false;
                        tracing::debug!(path = %path, children = node.children.len(), "Loaded folder");
                    }
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "Failed to load folder");
                    self.status_message = Some(format!("Failed to load {}: {}", path, err));
                }
            }
        }
    }

    pub fn has_pending_work(&self) -> bool {
        !self.pending_loads.is_empty() || self.transitions.is_animating()
    }

    /// Rescan the project directory, keeping open folders open.
    pub fn rescan(&mut self) {
        let Some(root) = self.root.clone() else {
            self.status_message = Some("Nothing to rescan".to_string());
            return;
        };

        let mut open = Vec::new();
        collect_open(&self.tree, &mut open);

        // Requests queued against the old tree no longer name live nodes.
        self.toggle_rx.try_iter().for_each(drop);

        let options = self.scan_options.clone().with_expand_root(true);
        match scan_project(&root, &options) {
            Ok(mut tree) => {
                self.pending_loads.clear();
                for path in open {
                    if let Some(node) = tree.find_mut(None, &path) {
                        node.toggled = true;
                        if node.loading {
                            self.pending_loads.push(path);
                        }
                    }
                }
                self.tree = tree;
                self.clamp_selection();
                self.status_message = Some("Rescanned".to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "Rescan failed");
                self.status_message = Some(format!("Rescan failed: {}", err));
            }
        }
    }

    /// Open the context menu bound to the selected row.
    pub fn open_context_menu(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let (Some(node), Some(menu_id)) = (row.node, row.menu_id) else {
            self.status_message = Some("No context menu here".to_string());
            return;
        };

        let items = self.menus.get(&menu_id).cloned().unwrap_or_default();
        if items.is_empty() {
            self.status_message = Some(format!("Menu '{}' has no items", menu_id));
            return;
        }

        self.mode = Mode::ContextMenu(MenuState {
            menu_id,
            payload: node,
            items,
            selected: 0,
        });
    }

    /// Run the highlighted context-menu item and close the menu.
    pub fn choose_menu_item(&mut self) {
        let Mode::ContextMenu(menu) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };
        if let Some(item) = menu.items.get(menu.selected) {
            tracing::info!(menu = %menu.menu_id, item = %item, path = %menu.payload.path, "Context menu action");
            self.status_message = Some(format!("{}: {}", item, menu.payload.path));
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }
}

fn collect_open(node: &Node, open: &mut Vec<String>) {
    if node.is_folder() && node.toggled {
        open.push(node.path.clone());
    }
    for child in node.children.iter() {
        collect_open(child, open);
    }
}
