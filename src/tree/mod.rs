//! The collapsible tree-node component and its data model.

pub mod animations;
pub mod category;
pub mod context_menu;
pub mod decorators;
pub mod element;
pub mod header;
pub mod node;
pub mod style;
pub mod tree_node;

pub use animations::{
    AnimationBundle, AnimationOverrides, Animations, DrawerAnimation, DrawerResolver, Easing,
    ResolvedAnimations, ToggleAnimation, ToggleResolver, TransitionEffect, TransitionProps,
    TransitionSpec,
};
pub use category::{classify, infer_extension, MenuCategory};
pub use context_menu::ContextMenuIds;
pub use decorators::{Decorator, DecoratorProps, Decorators};
pub use element::{ClickHandler, Element, Header, ListItem};
pub use node::{Children, Node, NodeKey, NodeSnapshot};
pub use style::TreeStyle;
pub use tree_node::{render_tree, ToggleHandler, TreeContext, TreeNode};
