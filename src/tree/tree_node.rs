//! The recursive tree-node component.
//!
//! A [`TreeNode`] is a node paired with the read-only [`TreeContext`] shared by
//! the whole render pass. Rendering never mutates the node: expanding or
//! collapsing is requested through the context's toggle callback and applied
//! by whoever owns the tree.

use std::fmt;

use tracing::trace;

use super::animations::{Animations, ResolvedAnimations};
use super::category::classify;
use super::context_menu::ContextMenuIds;
use super::decorators::{self, DecoratorProps, Decorators};
use super::element::{ClickHandler, ContextMenu, Element, ListItem, Transition};
use super::header::NodeHeader;
use super::node::{Node, NodeKey};
use super::style::TreeStyle;

/// Toggle-request callback: `(node, requested toggled state)`.
pub type ToggleHandler<'a> = dyn Fn(&Node, bool) + 'a;

/// Configuration threaded unchanged through every level of the tree.
pub struct TreeContext<'a> {
    pub style: &'a TreeStyle,
    pub decorators: &'a Decorators,
    pub animations: &'a Animations,
    pub on_toggle: Option<&'a ToggleHandler<'a>>,
    pub context_menu: &'a ContextMenuIds,
    pub project_name: Option<&'a str>,
}

impl fmt::Debug for TreeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeContext")
            .field("style", self.style)
            .field("decorators", self.decorators)
            .field("animations", self.animations)
            .field("on_toggle", &self.on_toggle.is_some())
            .field("context_menu", self.context_menu)
            .field("project_name", &self.project_name)
            .finish()
    }
}

/// One node of the tree, ready to render.
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    pub ctx: &'a TreeContext<'a>,
    pub node: &'a Node,
}

impl<'a> TreeNode<'a> {
    pub fn new(ctx: &'a TreeContext<'a>, node: &'a Node) -> Self {
        Self { ctx, node }
    }

    /// Ask the tree owner to flip this node's `toggled` state.
    pub fn on_click(&self) {
        if let Some(on_toggle) = self.ctx.on_toggle {
            trace!(path = %self.node.path, toggled = !self.node.toggled, "Toggle requested");
            on_toggle(self.node, !self.node.toggled);
        }
    }

    /// Resolve the animation bundle for this node, `None` when disabled.
    pub fn animations(&self) -> Option<ResolvedAnimations> {
        match self.ctx.animations {
            Animations::Disabled => None,
            Animations::Enabled(bundle) => {
                let bundle = bundle.merged(self.node.animations.as_ref());
                Some(ResolvedAnimations {
                    toggle: bundle.toggle.resolve(self),
                    drawer: bundle.drawer.resolve(self),
                })
            }
        }
    }

    /// Global decorators with this node's overrides applied.
    pub fn decorators(&self) -> Decorators {
        self.ctx.decorators.merged(self.node.decorators.as_ref())
    }

    pub fn render(&self) -> ListItem<'a> {
        let decorators = self.decorators();
        let animations = self.animations();

        let mut children = vec![self.render_header(&decorators, animations.as_ref())];
        if let Some(drawer) = self.render_drawer(&decorators, animations.as_ref()) {
            children.push(drawer);
        }

        ListItem {
            key: None,
            style: self.ctx.style.base,
            children,
        }
    }

    pub fn render_header(
        &self,
        decorators: &Decorators,
        animations: Option<&ResolvedAnimations>,
    ) -> Element<'a> {
        let this = *self;
        let header = NodeHeader {
            node: self.node,
            decorators,
            animations,
            style: self.ctx.style,
        }
        .render(ClickHandler::new(move || this.on_click()));

        if !self.ctx.context_menu.is_enabled() {
            return header;
        }

        let category = classify(self.node, self.ctx.project_name);
        Element::ContextMenu(ContextMenu {
            menu_id: self.ctx.context_menu.menu_for(category).map(str::to_string),
            category,
            payload: self.node.snapshot(),
            child: Box::new(header),
        })
    }

    pub fn render_drawer(
        &self,
        decorators: &Decorators,
        animations: Option<&ResolvedAnimations>,
    ) -> Option<Element<'a>> {
        let toggled = self.node.toggled;

        let Some(animations) = animations else {
            return toggled.then(|| self.render_children(decorators));
        };

        Some(Element::Transition(Transition {
            key: self.node.path.clone(),
            props: animations.drawer.transition_props(),
            child: toggled.then(|| Box::new(self.render_children(decorators))),
        }))
    }

    pub fn render_children(&self, decorators: &Decorators) -> Element<'a> {
        if self.node.loading {
            return self.render_loading(decorators);
        }

        let items = self
            .node
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let mut item = TreeNode::new(self.ctx, child).render();
                item.key = Some(NodeKey::for_child(child, index));
                item
            })
            .collect();

        Element::List {
            style: self.ctx.style.subtree,
            items,
        }
    }

    pub fn render_loading(&self, decorators: &Decorators) -> Element<'a> {
        let style = self.ctx.style;
        let props = DecoratorProps::new(style.loading);
        let placeholder = Element::Decoration {
            name: decorators::LOADING.to_string(),
            line: decorators.required(decorators::LOADING).render(&props),
        };

        Element::List {
            style: style.subtree,
            items: vec![ListItem {
                key: None,
                style: style.base,
                children: vec![placeholder],
            }],
        }
    }
}

/// Render a whole tree from its root.
pub fn render_tree<'a>(ctx: &'a TreeContext<'a>, root: &'a Node) -> ListItem<'a> {
    TreeNode::new(ctx, root).render()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;
    use crate::tree::animations::{
        AnimationBundle, AnimationOverrides, DrawerAnimation, DrawerResolver, Easing,
        ToggleAnimation, ToggleResolver, TransitionEffect, TransitionSpec,
    };
    use crate::tree::category::MenuCategory;
    use crate::tree::decorators::Decorator;

    fn sample_tree() -> Node {
        Node::folder(
            "site",
            "/",
            vec![
                Node::file("index.html", "/index.html").with_id("index"),
                Node::folder(
                    "__components",
                    "/__components",
                    vec![Node::file("nav.html", "/__components/nav.html")],
                )
                .with_id("components"),
            ],
        )
        .with_toggled(true)
    }

    struct Fixture {
        style: TreeStyle,
        decorators: Decorators,
        animations: Animations,
        context_menu: ContextMenuIds,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                style: TreeStyle::plain(),
                decorators: Decorators::standard(),
                animations: Animations::Disabled,
                context_menu: ContextMenuIds::Disabled,
            }
        }

        fn ctx<'a>(&'a self, on_toggle: Option<&'a ToggleHandler<'a>>) -> TreeContext<'a> {
            TreeContext {
                style: &self.style,
                decorators: &self.decorators,
                animations: &self.animations,
                on_toggle,
                context_menu: &self.context_menu,
                project_name: Some("site"),
            }
        }
    }

    #[test]
    fn test_on_click_requests_inverse_once() {
        let calls = RefCell::new(Vec::new());
        let handler = |node: &Node, toggled: bool| calls.borrow_mut().push((node.path.clone(), toggled));
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Some(&handler));

        let node = Node::folder("src", "/src", vec![]).with_toggled(false);
        TreeNode::new(&ctx, &node).on_click();

        assert_eq!(*calls.borrow(), vec![("/src".to_string(), true)]);
        assert!(!node.toggled);
    }

    #[test]
    fn test_on_click_without_handler_is_noop() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let node = Node::file("a", "/a");
        TreeNode::new(&ctx, &node).on_click();
    }

    #[test]
    fn test_header_click_goes_through_on_click() {
        let calls = RefCell::new(0);
        let handler = |_: &Node, toggled: bool| {
            assert!(!toggled);
            *calls.borrow_mut() += 1;
        };
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Some(&handler));
        let tree = sample_tree();

        let item = TreeNode::new(&ctx, &tree).render();
        item.header().unwrap().click();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_collapsed_without_animations_has_no_drawer() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = sample_tree().with_toggled(false);

        let item = TreeNode::new(&ctx, &tree).render();
        assert_eq!(item.children.len(), 1);
        assert!(item.drawer().is_none());
    }

    #[test]
    fn test_expanded_without_animations_renders_children_directly() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = sample_tree();

        let item = TreeNode::new(&ctx, &tree).render();
        assert!(matches!(item.drawer(), Some(Element::List { .. })));
        assert_eq!(item.child_items().len(), 2);
    }

    #[test]
    fn test_leaf_renders_no_children_even_when_toggled() {
        let mut fixture = Fixture::new();
        let leaf = Node::file("a.txt", "/a.txt").with_toggled(true);

        let ctx = fixture.ctx(None);
        assert!(TreeNode::new(&ctx, &leaf).render().child_items().is_empty());

        fixture.animations = Animations::standard();
        let ctx = fixture.ctx(None);
        assert!(TreeNode::new(&ctx, &leaf).render().child_items().is_empty());
    }

    #[test]
    fn test_children_keyed_by_id_or_index() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = Node::folder(
            "root",
            "/",
            vec![Node::file("a", "/a").with_id("c1"), Node::file("b", "/b")],
        )
        .with_toggled(true);

        let item = TreeNode::new(&ctx, &tree).render();
        let keys: Vec<_> = item.child_items().iter().map(|i| i.key.clone()).collect();
        assert_eq!(
            keys,
            vec![Some(NodeKey::Id("c1".into())), Some(NodeKey::Index(1))]
        );
        assert_eq!(item.key, None);
    }

    #[test]
    fn test_single_child_is_normalized() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let mut tree = Node::file("root", "/").with_toggled(true);
        tree.children = crate::tree::Children::One(Box::new(Node::file("only", "/only")));

        let item = TreeNode::new(&ctx, &tree).render();
        assert_eq!(item.child_items().len(), 1);
        assert_eq!(item.child_items()[0].key, Some(NodeKey::Index(0)));
    }

    #[test]
    fn test_loading_replaces_children() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = sample_tree().with_loading(true);

        let item = TreeNode::new(&ctx, &tree).render();
        let items = item.child_items();
        assert_eq!(items.len(), 1);
        assert!(matches!(
            &items[0].children[..],
            [Element::Decoration { name, .. }] if name == "Loading"
        ));
    }

    #[test]
    fn test_node_level_loading_decorator_wins() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let spinner = Decorator::text("spinning");
        let tree = sample_tree()
            .with_loading(true)
            .with_decorators(Decorators::new().with("Loading", spinner.clone()));

        let node = TreeNode::new(&ctx, &tree);
        assert!(node.decorators().required("Loading").same_as(&spinner));

        let item = node.render();
        let Element::Decoration { line, .. } = &item.child_items()[0].children[0] else {
            panic!("expected loading decoration");
        };
        assert_eq!(line.spans[0].content, "spinning");
    }

    #[test]
    fn test_children_receive_global_decorators_not_merged() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = Node::folder(
            "root",
            "/",
            vec![Node::folder("child", "/child", vec![]).with_toggled(true).with_loading(true)],
        )
        .with_toggled(true)
        .with_decorators(Decorators::new().with("Loading", Decorator::text("parent-only")));

        let item = TreeNode::new(&ctx, &tree).render();
        let child = &item.child_items()[0];
        let Element::Decoration { line, .. } = &child.child_items()[0].children[0] else {
            panic!("expected loading decoration");
        };
        assert_eq!(line.spans[0].content, "loading...");
    }

    #[test]
    fn test_context_menu_categories() {
        let mut fixture = Fixture::new();
        fixture.context_menu = ContextMenuIds::by_category();
        let ctx = fixture.ctx(None);
        let tree = sample_tree();

        let item = TreeNode::new(&ctx, &tree).render();
        let root_menu = item.context_menu().unwrap();
        assert_eq!(root_menu.category, MenuCategory::Project);
        assert_eq!(root_menu.menu_id.as_deref(), Some("project"));
        assert_eq!(root_menu.payload.path, "/");

        let categories: Vec<_> = item
            .child_items()
            .iter()
            .map(|i| i.context_menu().unwrap().category)
            .collect();
        assert_eq!(categories, vec![MenuCategory::Pages, MenuCategory::Folder]);
    }

    #[test]
    fn test_context_menu_disabled_renders_bare_header() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = sample_tree();
        let item = TreeNode::new(&ctx, &tree).render();
        assert!(matches!(item.children[0], Element::Header(_)));
        assert!(item.context_menu().is_none());
    }

    #[test]
    fn test_animations_disabled_resolve_to_none() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(None);
        let tree = sample_tree().with_animations(AnimationOverrides::default());
        assert!(TreeNode::new(&ctx, &tree).animations().is_none());
    }

    #[test]
    fn test_animation_resolvers_see_current_node() {
        let mut fixture = Fixture::new();
        fixture.animations = Animations::standard();
        let ctx = fixture.ctx(None);

        let open = sample_tree();
        let closed = sample_tree().with_toggled(false);
        assert_eq!(TreeNode::new(&ctx, &open).animations().unwrap().toggle.rotate_z, 90.0);
        assert_eq!(TreeNode::new(&ctx, &closed).animations().unwrap().toggle.rotate_z, 0.0);
    }

    #[test]
    fn test_node_animation_overrides_by_key() {
        let mut fixture = Fixture::new();
        fixture.animations = Animations::Enabled(AnimationBundle::standard(
            Duration::from_millis(300),
            Easing::Linear,
            false,
        ));
        let ctx = fixture.ctx(None);

        let custom_drawer = DrawerResolver::new(|_| DrawerAnimation {
            animation: None,
            duration: None,
            enter: Some(TransitionSpec::new(
                TransitionEffect::Fade,
                Duration::from_millis(10),
                Easing::EaseIn,
            )),
            leave: None,
            run_on_mount: true,
        });
        let tree = sample_tree().with_animations(AnimationOverrides {
            toggle: None,
            drawer: Some(custom_drawer),
        });

        let resolved = TreeNode::new(&ctx, &tree).animations().unwrap();
        assert_eq!(resolved.toggle.rotate_z, 90.0);
        assert_eq!(resolved.drawer.enter.unwrap().effect, TransitionEffect::Fade);
        assert!(resolved.drawer.leave.is_none());

        let toggle_only = sample_tree().with_animations(AnimationOverrides {
            toggle: Some(ToggleResolver::new(|_| ToggleAnimation::rotated(45.0))),
            drawer: None,
        });
        let resolved = TreeNode::new(&ctx, &toggle_only).animations().unwrap();
        assert_eq!(resolved.toggle.rotate_z, 45.0);
        assert_eq!(resolved.drawer.enter.unwrap().effect, TransitionEffect::SlideDown);
    }

    #[test]
    fn test_animated_drawer_is_transition() {
        let mut fixture = Fixture::new();
        fixture.animations = Animations::standard();
        let ctx = fixture.ctx(None);

        let open = sample_tree();
        let item = TreeNode::new(&ctx, &open).render();
        let Some(Element::Transition(transition)) = item.drawer() else {
            panic!("expected transition drawer");
        };
        assert_eq!(transition.key, "/");
        assert!(transition.child.is_some());
        assert_eq!(
            transition.props.enter.unwrap().effect,
            TransitionEffect::SlideDown
        );

        let closed = sample_tree().with_toggled(false);
        let item = TreeNode::new(&ctx, &closed).render();
        let Some(Element::Transition(transition)) = item.drawer() else {
            panic!("expected transition drawer");
        };
        assert!(transition.child.is_none());
    }

    #[test]
    fn test_context_is_shared_by_recursive_renders() {
        let calls = RefCell::new(Vec::new());
        let handler = |node: &Node, toggled: bool| calls.borrow_mut().push((node.name.clone(), toggled));
        let mut fixture = Fixture::new();
        fixture.context_menu = ContextMenuIds::by_category();
        let ctx = fixture.ctx(Some(&handler));
        let tree = sample_tree();

        let item = render_tree(&ctx, &tree);
        let components = &item.child_items()[1];
        components.header().unwrap().click();

        assert_eq!(*calls.borrow(), vec![("__components".to_string(), true)]);
    }
}
