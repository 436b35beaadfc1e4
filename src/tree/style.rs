use ratatui::style::{Color, Modifier, Style};

/// Per-region styles of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStyle {
    /// Each node's list item.
    pub base: Style,
    /// The container of a node's children.
    pub subtree: Style,
    /// The loading placeholder.
    pub loading: Style,
    /// The node name in the header row.
    pub header: Style,
    /// The expand/collapse arrow.
    pub toggle: Style,
    /// Columns added per nesting level.
    pub indent: u16,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            base: Style::default().fg(Color::White),
            subtree: Style::default(),
            loading: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            header: Style::default(),
            toggle: Style::default().fg(Color::Cyan),
            indent: 2,
        }
    }
}

impl TreeStyle {
    /// Style without colors or modifiers.
    pub fn plain() -> Self {
        Self {
            base: Style::default(),
            subtree: Style::default(),
            loading: Style::default(),
            header: Style::default(),
            toggle: Style::default(),
            indent: 2,
        }
    }
}
