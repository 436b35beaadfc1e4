use std::collections::BTreeMap;

use super::category::MenuCategory;

/// Context-menu routing for the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContextMenuIds {
    /// Headers are rendered without a context-menu provider.
    #[default]
    Disabled,
    /// Category to menu id.
    Routes(BTreeMap<MenuCategory, String>),
}

impl ContextMenuIds {
    /// Route every category to a menu id named after it.
    pub fn by_category() -> Self {
        ContextMenuIds::Routes(
            MenuCategory::ALL
                .into_iter()
                .map(|category| (category, category.as_str().to_string()))
                .collect(),
        )
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ContextMenuIds::Routes(_))
    }

    /// Menu id for a category. `None` when disabled or unrouted.
    pub fn menu_for(&self, category: MenuCategory) -> Option<&str> {
        match self {
            ContextMenuIds::Disabled => None,
            ContextMenuIds::Routes(routes) => routes.get(&category).map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_routes_nothing() {
        let ids = ContextMenuIds::Disabled;
        assert!(!ids.is_enabled());
        assert_eq!(ids.menu_for(MenuCategory::Folder), None);
    }

    #[test]
    fn test_partial_routes() {
        let mut routes = BTreeMap::new();
        routes.insert(MenuCategory::Pages, "page-menu".to_string());
        let ids = ContextMenuIds::Routes(routes);

        assert!(ids.is_enabled());
        assert_eq!(ids.menu_for(MenuCategory::Pages), Some("page-menu"));
        assert_eq!(ids.menu_for(MenuCategory::Assets), None);
    }

    #[test]
    fn test_by_category() {
        let ids = ContextMenuIds::by_category();
        assert_eq!(ids.menu_for(MenuCategory::Component), Some("component"));
    }
}
