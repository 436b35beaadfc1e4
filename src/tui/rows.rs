//! Flattening of a rendered element tree into terminal rows.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tree::element::{ContextMenu, Header, Transition};
use crate::tree::{Element, ListItem, TransitionProps};

/// One line of the flattened tree.
#[derive(Debug)]
pub struct Row<'e> {
    /// Nesting level (0 = root).
    pub depth: usize,
    /// Indented content.
    pub line: Line<'static>,
    /// Header this row was drawn from; `None` for decorations.
    pub header: Option<&'e Header<'e>>,
    /// Context-menu provider wrapping the header.
    pub menu: Option<&'e ContextMenu<'e>>,
}

impl Row<'_> {
    /// Activate the header, which requests a toggle.
    pub fn click(&self) {
        if let Some(header) = self.header {
            header.click();
        }
    }

    pub fn text(&self) -> String {
        self.line.spans.iter().map(|s| s.content.as_ref()).collect()
    }
}

/// Rows covered by one drawer transition.
#[derive(Debug, Clone)]
pub struct DrawerSpan {
    pub key: String,
    pub props: TransitionProps,
    /// Children are currently rendered.
    pub mounted: bool,
    /// First row inside the drawer.
    pub start: usize,
    /// One past the last row inside the drawer.
    pub end: usize,
}

/// Rows plus the drawer transitions found while flattening.
#[derive(Debug, Default)]
pub struct Flattened<'e> {
    pub rows: Vec<Row<'e>>,
    pub drawers: Vec<DrawerSpan>,
}

/// Styles a row picks up from the item and lists around it.
///
/// The row's own line style sits on top of its item's style; the styles of
/// every enclosing list are patched over both.
#[derive(Debug, Clone, Copy, Default)]
struct Inherited {
    item: Style,
    subtree: Style,
}

impl Inherited {
    fn apply(self, line: Line<'static>) -> Line<'static> {
        let own = line.style;
        line.style(self.item.patch(own)).patch_style(self.subtree)
    }
}

/// Flatten a rendered tree, indenting `indent` columns per level.
pub fn flatten<'e>(root: &'e ListItem<'e>, indent: u16) -> Flattened<'e> {
    let mut out = Flattened::default();
    flatten_item(root, 0, indent as usize, &mut out, Style::default());
    out
}

fn flatten_item<'e>(
    item: &'e ListItem<'e>,
    depth: usize,
    indent: usize,
    out: &mut Flattened<'e>,
    subtree: Style,
) {
    let inherited = Inherited {
        item: item.style,
        subtree,
    };
    for child in &item.children {
        flatten_element(child, depth, indent, out, None, inherited);
    }
}

fn flatten_element<'e>(
    element: &'e Element<'e>,
    depth: usize,
    indent: usize,
    out: &mut Flattened<'e>,
    menu: Option<&'e ContextMenu<'e>>,
    inherited: Inherited,
) {
    match element {
        Element::List { style, items } => {
            let subtree = inherited.subtree.patch(*style);
            for item in items {
                flatten_item(item, depth + 1, indent, out, subtree);
            }
        }
        Element::Header(header) => out.rows.push(Row {
            depth,
            line: inherited.apply(indented(&header.line, depth * indent)),
            header: Some(header),
            menu,
        }),
        Element::ContextMenu(context_menu) => flatten_element(
            &context_menu.child,
            depth,
            indent,
            out,
            Some(context_menu),
            inherited,
        ),
        Element::Transition(Transition { key, props, child }) => {
            let start = out.rows.len();
            if let Some(child) = child {
                flatten_element(child, depth, indent, out, None, inherited);
            }
            out.drawers.push(DrawerSpan {
                key: key.clone(),
                props: *props,
                mounted: child.is_some(),
                start,
                end: out.rows.len(),
            });
        }
        Element::Decoration { line, .. } => out.rows.push(Row {
            depth,
            line: inherited.apply(indented(line, depth * indent)),
            header: None,
            menu: None,
        }),
    }
}

fn indented(line: &Line<'static>, width: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    if width > 0 {
        spans.push(Span::raw(" ".repeat(width)));
    }
    spans.extend(line.spans.iter().cloned());
    Line::from(spans).style(line.style)
}

/// Plain text of the rows, one per line.
pub fn to_plain_text(rows: &[Row<'_>]) -> String {
    let mut output = String::new();
    for row in rows {
        output.push_str(row.text().trim_end());
        output.push('\n');
    }
    output
}
