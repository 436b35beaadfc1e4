use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ExplorerError, Result};

use super::animations::AnimationOverrides;
use super::decorators::Decorators;

/// One entry of the explorer tree: a file, a folder or the project root.
///
/// Nodes are owned by whoever holds the tree state. The rendering code only
/// reads them and asks for toggles through a callback.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier, used as the render key when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name (last path component).
    pub name: String,

    /// Project-relative path, always starting with `/`.
    #[serde(rename = "Path", default)]
    pub path: String,

    /// Child nodes. `Leaf` for files.
    #[serde(default)]
    pub children: Children,

    /// Whether the drawer is expanded.
    #[serde(default)]
    pub toggled: bool,

    /// Whether children are still being fetched.
    #[serde(default)]
    pub loading: bool,

    /// Node-level decorator overrides.
    #[serde(skip)]
    pub decorators: Option<Decorators>,

    /// Node-level animation overrides.
    #[serde(skip)]
    pub animations: Option<AnimationOverrides>,
}

impl Node {
    /// Create a leaf node.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a folder node with the given children.
    pub fn folder(name: impl Into<String>, path: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Children::Many(children),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_toggled(mut self, toggled: bool) -> Self {
        self.toggled = toggled;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_decorators(mut self, decorators: Decorators) -> Self {
        self.decorators = Some(decorators);
        self
    }

    pub fn with_animations(mut self, animations: AnimationOverrides) -> Self {
        self.animations = Some(animations);
        self
    }

    /// True unless `children` is `Leaf`. An empty folder is still a folder.
    pub fn is_folder(&self) -> bool {
        !matches!(self.children, Children::Leaf)
    }

    /// Owned shallow copy of this node, detached from the tree.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            toggled: self.toggled,
            loading: self.loading,
            is_folder: self.is_folder(),
            child_count: self.children.len(),
        }
    }

    /// Depth-first search by id, falling back to path when `id` is `None`.
    pub fn find_mut(&mut self, id: Option<&str>, path: &str) -> Option<&mut Node> {
        let hit = match (id, self.id.as_deref()) {
            (Some(wanted), Some(own)) => wanted == own,
            _ => self.path == path,
        };
        if hit {
            return Some(self);
        }

        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id, path))
    }

    /// Address of this node, stable while the tree is not mutated.
    pub fn address(&self) -> usize {
        self as *const Node as usize
    }

    /// Depth-first search for the node at `address`.
    pub fn find_by_address_mut(&mut self, address: usize) -> Option<&mut Node> {
        if self.address() == address {
            return Some(self);
        }

        self.children
            .iter_mut()
            .find_map(|child| child.find_by_address_mut(address))
    }

    /// Give every node without a `Path` one derived from its parent's path
    /// and its own name. A root without a path becomes `/`.
    pub fn fill_missing_paths(&mut self) {
        if self.path.is_empty() {
            self.path = "/".to_string();
        }
        fill_child_paths(self);
    }

    /// Set `toggled` on every folder in the tree.
    pub fn set_toggled_recursive(&mut self, toggled: bool) {
        if self.is_folder() {
            self.toggled = toggled;
        }
        for child in self.children.iter_mut() {
            child.set_toggled_recursive(toggled);
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Parse a tree from its JSON representation.
    ///
    /// Nodes without a `Path` get one from [`Node::fill_missing_paths`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut node: Node = serde_json::from_str(json)?;
        node.fill_missing_paths();
        Ok(node)
    }

    /// Load a tree from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ExplorerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&content).map_err(|e| ExplorerError::InvalidTree {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn fill_child_paths(parent: &mut Node) {
    let prefix = parent.path.trim_end_matches('/').to_string();
    for child in parent.children.iter_mut() {
        if child.path.is_empty() {
            child.path = format!("{}/{}", prefix, child.name);
        }
        fill_child_paths(child);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("toggled", &self.toggled)
            .field("loading", &self.loading)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Children of a node: none, a single node, or a sequence.
#[derive(Debug, Clone, Default)]
pub enum Children {
    #[default]
    Leaf,
    One(Box<Node>),
    Many(Vec<Node>),
}

impl Children {
    /// Normalized view: empty for `Leaf`, one element for `One`.
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Children::Leaf => &[],
            Children::One(node) => std::slice::from_ref(node.as_ref()),
            Children::Many(nodes) => nodes,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        match self {
            Children::Leaf => Default::default(),
            Children::One(node) => std::slice::from_mut(node.as_mut()).iter_mut(),
            Children::Many(nodes) => nodes.iter_mut(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChildren {
    Many(Vec<Node>),
    One(Box<Node>),
}

impl<'de> Deserialize<'de> for Children {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<RawChildren>::deserialize(deserializer)? {
            None => Children::Leaf,
            Some(RawChildren::One(node)) => Children::One(node),
            Some(RawChildren::Many(nodes)) => Children::Many(nodes),
        })
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Children::Leaf => serializer.serialize_none(),
            Children::One(node) => node.serialize(serializer),
            Children::Many(nodes) => nodes.serialize(serializer),
        }
    }
}

/// Key of a recursive child render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Id(String),
    Index(usize),
}

impl NodeKey {
    /// The child's id, or its position when it has none.
    pub fn for_child(child: &Node, index: usize) -> Self {
        match &child.id {
            Some(id) if !id.is_empty() => NodeKey::Id(id.clone()),
            _ => NodeKey::Index(index),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Id(id) => f.write_str(id),
            NodeKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Owned copy of a node's own fields, without its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub id: Option<String>,
    pub name: String,
    pub path: String,
    pub toggled: bool,
    pub loading: bool,
    pub is_folder: bool,
    pub child_count: usize,
}
