use ratatui::text::Line;

use super::animations::ResolvedAnimations;
use super::decorators::{self, DecoratorProps, Decorators};
use super::element::{ClickHandler, Element, Header};
use super::node::Node;
use super::style::TreeStyle;

/// Renders the clickable label row of a node.
///
/// Folders get the `Toggle` decorator in front of the `Header` decorator;
/// files only get the `Header` decorator, indented to line up with folder names.
pub struct NodeHeader<'r> {
    pub node: &'r Node,
    pub decorators: &'r Decorators,
    pub animations: Option<&'r ResolvedAnimations>,
    pub style: &'r TreeStyle,
}

impl<'r> NodeHeader<'r> {
    pub fn render<'a>(self, on_click: ClickHandler<'a>) -> Element<'a> {
        let toggle = self.animations.map(|animations| &animations.toggle);
        let mut spans = Vec::new();

        if self.node.is_folder() {
            let props = DecoratorProps::new(self.style.toggle)
                .with_node(self.node)
                .with_toggle(toggle);
            spans.extend(self.decorators.required(decorators::TOGGLE).render(&props).spans);
        } else {
            spans.push("  ".into());
        }

        let props = DecoratorProps::new(self.style.header)
            .with_node(self.node)
            .with_toggle(toggle);
        spans.extend(self.decorators.required(decorators::HEADER).render(&props).spans);

        Element::Header(Header {
            node: self.node.snapshot(),
            line: Line::from(spans).style(self.style.base),
            on_click,
        })
    }
}
