//! Pluggable renderables substituted for default visual elements.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::animations::ToggleAnimation;
use super::node::Node;

pub const LOADING: &str = "Loading";
pub const TOGGLE: &str = "Toggle";
pub const HEADER: &str = "Header";

/// Rotation (degrees) from which the toggle arrow is drawn as expanded.
const EXPANDED_ROTATION: f32 = 45.0;

/// Inputs handed to a decorator when it is drawn.
#[derive(Debug, Clone, Copy)]
pub struct DecoratorProps<'a> {
    pub style: Style,
    pub node: Option<&'a Node>,
    pub toggle: Option<&'a ToggleAnimation>,
}

impl<'a> DecoratorProps<'a> {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            node: None,
            toggle: None,
        }
    }

    pub fn with_node(mut self, node: &'a Node) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_toggle(mut self, toggle: Option<&'a ToggleAnimation>) -> Self {
        self.toggle = toggle;
        self
    }
}

type RenderFn = dyn Fn(&DecoratorProps<'_>) -> Line<'static> + Send + Sync;

/// A shared render function.
#[derive(Clone)]
pub struct Decorator(Arc<RenderFn>);

impl Decorator {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&DecoratorProps<'_>) -> Line<'static> + Send + Sync + 'static,
    {
        Self(Arc::new(render))
    }

    /// Decorator that always draws the same text.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |props| Line::from(Span::styled(text.clone(), props.style)))
    }

    pub fn render(&self, props: &DecoratorProps<'_>) -> Line<'static> {
        (self.0)(props)
    }

    /// True when both handles point to the same render function.
    pub fn same_as(&self, other: &Decorator) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Decorator(..)")
    }
}

/// Named decorators. Lookups of a missing name panic at the point of use.
#[derive(Debug, Clone, Default)]
pub struct Decorators {
    entries: BTreeMap<String, Decorator>,
}

impl Decorators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, decorator: Decorator) -> Self {
        self.insert(name, decorator);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, decorator: Decorator) {
        self.entries.insert(name.into(), decorator);
    }

    /// Look up a decorator the caller contract says must exist.
    pub fn required(&self, name: &str) -> &Decorator {
        match self.entries.get(name) {
            Some(decorator) => decorator,
            None => panic!("decorator '{}' is not defined", name),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: entries of `overrides` replace ours by key.
    pub fn merged(&self, overrides: Option<&Decorators>) -> Decorators {
        let mut entries = self.entries.clone();
        if let Some(overrides) = overrides {
            for (name, decorator) in &overrides.entries {
                entries.insert(name.clone(), decorator.clone());
            }
        }
        Decorators { entries }
    }

    /// The stock `Loading`, `Toggle` and `Header` decorators.
    pub fn standard() -> Self {
        Self::new()
            .with(LOADING, Decorator::text("loading..."))
            .with(TOGGLE, Decorator::new(render_toggle))
            .with(HEADER, Decorator::new(render_header))
    }
}

fn render_toggle(props: &DecoratorProps<'_>) -> Line<'static> {
    let expanded = match (props.toggle, props.node) {
        (Some(toggle), _) => toggle.rotate_z >= EXPANDED_ROTATION,
        (None, Some(node)) => node.toggled,
        (None, None) => false,
    };
    let glyph = if expanded { "▼ " } else { "► " };
    Line::from(Span::styled(glyph, props.style))
}

fn render_header(props: &DecoratorProps<'_>) -> Line<'static> {
    let name = props.node.map(|n| n.name.clone()).unwrap_or_default();
    Line::from(Span::styled(name, props.style))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_merge_overrides_by_key() {
        let a = Decorator::text("A");
        let b = Decorator::text("B");
        let header = Decorator::text("H");

        let global = Decorators::new()
            .with(LOADING, a.clone())
            .with(HEADER, header.clone());
        let node_level = Decorators::new().with(LOADING, b.clone());

        let merged = global.merged(Some(&node_level));
        assert!(merged.required(LOADING).same_as(&b));
        assert!(merged.required(HEADER).same_as(&header));
        // The global bundle is left untouched.
        assert!(global.required(LOADING).same_as(&a));
    }

    #[test]
    fn test_merge_without_overrides_is_copy() {
        let global = Decorators::standard();
        let merged = global.merged(None);
        assert_eq!(merged.len(), global.len());
    }

    #[test]
    #[should_panic(expected = "decorator 'Loading' is not defined")]
    fn test_required_missing_panics() {
        Decorators::new().required(LOADING);
    }

    #[test]
    fn test_toggle_glyph_follows_rotation() {
        let decorators = Decorators::standard();
        let open = ToggleAnimation::rotated(90.0);
        let closed = ToggleAnimation::rotated(0.0);

        let props = DecoratorProps::new(Style::default()).with_toggle(Some(&open));
        assert_eq!(text_of(&decorators.required(TOGGLE).render(&props)), "▼ ");

        let props = DecoratorProps::new(Style::default()).with_toggle(Some(&closed));
        assert_eq!(text_of(&decorators.required(TOGGLE).render(&props)), "► ");
    }

    #[test]
    fn test_toggle_glyph_without_animation_uses_node() {
        let node = Node::folder("src", "/src", vec![]).with_toggled(true);
        let props = DecoratorProps::new(Style::default()).with_node(&node);
        let line = Decorators::standard().required(TOGGLE).render(&props);
        assert_eq!(text_of(&line), "▼ ");
    }

    #[test]
    fn test_header_shows_name() {
        let node = Node::file("main.rs", "/main.rs");
        let props = DecoratorProps::new(Style::default()).with_node(&node);
        let line = Decorators::standard().required(HEADER).render(&props);
        assert_eq!(text_of(&line), "main.rs");
    }
}
