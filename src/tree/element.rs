//! Output of a render pass.
//!
//! Elements borrow the tree they were rendered from (click handlers close over
//! the rendered node), so an element tree must be dropped before the caller
//! applies any toggle it requested.

use std::fmt;

use ratatui::style::Style;
use ratatui::text::Line;

use super::animations::TransitionProps;
use super::category::MenuCategory;
use super::node::{NodeKey, NodeSnapshot};

/// Callback attached to a header row.
pub struct ClickHandler<'a>(Box<dyn Fn() + 'a>);

impl<'a> ClickHandler<'a> {
    pub fn new(handler: impl Fn() + 'a) -> Self {
        Self(Box::new(handler))
    }

    pub fn fire(&self) {
        (self.0)()
    }
}

impl fmt::Debug for ClickHandler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

/// A rendered node: header followed by an optional drawer.
#[derive(Debug)]
pub struct ListItem<'a> {
    pub key: Option<NodeKey>,
    pub style: Style,
    pub children: Vec<Element<'a>>,
}

impl<'a> ListItem<'a> {
    /// The header element, looking through a context-menu wrapper.
    pub fn header(&self) -> Option<&Header<'a>> {
        self.children.iter().find_map(Element::as_header)
    }

    /// The context-menu wrapper around the header, if any.
    pub fn context_menu(&self) -> Option<&ContextMenu<'a>> {
        self.children.iter().find_map(|element| match element {
            Element::ContextMenu(menu) => Some(menu),
            _ => None,
        })
    }

    /// Everything after the header.
    pub fn drawer(&self) -> Option<&Element<'a>> {
        self.children.get(1)
    }

    /// Child items rendered inside the drawer, in order.
    pub fn child_items(&self) -> &[ListItem<'a>] {
        self.drawer().map(Element::items).unwrap_or(&[])
    }
}

/// The clickable label row of a node.
#[derive(Debug)]
pub struct Header<'a> {
    pub node: NodeSnapshot,
    pub line: Line<'static>,
    pub on_click: ClickHandler<'a>,
}

impl Header<'_> {
    pub fn click(&self) {
        self.on_click.fire();
    }
}

/// Context-menu provider wrapped around a header.
#[derive(Debug)]
pub struct ContextMenu<'a> {
    /// Menu to open; `None` when the category has no route.
    pub menu_id: Option<String>,
    pub category: MenuCategory,
    pub payload: NodeSnapshot,
    pub child: Box<Element<'a>>,
}

/// Animated container around a drawer's children.
#[derive(Debug)]
pub struct Transition<'a> {
    /// Identifies the owning node across render passes.
    pub key: String,
    pub props: TransitionProps,
    /// Present only while the node is expanded.
    pub child: Option<Box<Element<'a>>>,
}

#[derive(Debug)]
pub enum Element<'a> {
    List { style: Style, items: Vec<ListItem<'a>> },
    Header(Header<'a>),
    ContextMenu(ContextMenu<'a>),
    Transition(Transition<'a>),
    Decoration { name: String, line: Line<'static> },
}

impl<'a> Element<'a> {
    pub fn as_header(&self) -> Option<&Header<'a>> {
        match self {
            Element::Header(header) => Some(header),
            Element::ContextMenu(menu) => menu.child.as_header(),
            _ => None,
        }
    }

    /// Items of a list, looking through a transition. Empty otherwise.
    pub fn items(&self) -> &[ListItem<'a>] {
        match self {
            Element::List { items, .. } => items,
            Element::Transition(Transition {
                child: Some(child), ..
            }) => child.items(),
            Element::Header(_)
            | Element::ContextMenu(_)
            | Element::Transition(_)
            | Element::Decoration { .. } => &[],
        }
    }
}
