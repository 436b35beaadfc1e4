use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};

use crate::error::{ConfigError, Result};
use crate::scanner::ScanOptions;
use crate::tree::{AnimationBundle, Animations, ContextMenuIds, Easing, MenuCategory, TreeStyle};

const MAX_INDENT: u16 = 16;
const MAX_DURATION_MS: u64 = 10_000;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the project root; defaults to the scanned directory's name
    pub project_name: Option<String>,
    pub style: StyleConfig,
    pub animations: AnimationConfig,
    pub context_menu: ContextMenuConfig,
    pub scanner: ScannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Foreground of every row
    pub base: Option<String>,
    /// Foreground of nested rows
    pub subtree: Option<String>,
    /// Foreground of the loading placeholder
    pub loading: Option<String>,
    /// Foreground of node names
    pub header: Option<String>,
    /// Foreground of the expand/collapse arrow
    pub toggle: Option<String>,
    /// Columns per nesting level
    pub indent: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Animate toggles and drawers
    pub enabled: bool,
    /// Duration of each transition in milliseconds
    pub duration_ms: u64,
    /// Easing: linear, ease-in, ease-out, ease-in-out
    pub easing: String,
    /// Animate drawers that are already open on first render
    pub run_on_mount: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextMenuConfig {
    /// Bind context menus to node headers
    pub enabled: bool,
    /// Category (project, folder, component, pages, assets) to menu id
    pub routes: BTreeMap<String, String>,
    /// Menu id to item labels
    pub menus: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Include entries whose name starts with '.'
    pub show_hidden: bool,
    /// Maximum directory depth (0 = unlimited)
    pub max_depth: usize,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base: Some("white".to_string()),
            subtree: None,
            loading: Some("darkgray".to_string()),
            header: None,
            toggle: Some("cyan".to_string()),
            indent: 2,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 300,
            easing: "ease-out".to_string(),
            run_on_mount: false,
        }
    }
}

impl Default for ContextMenuConfig {
    fn default() -> Self {
        let routes: BTreeMap<String, String> = MenuCategory::ALL
            .into_iter()
            .map(|category| (category.to_string(), format!("{}-menu", category)))
            .collect();

        let menus: BTreeMap<String, Vec<String>> = [
            ("project-menu", &["New page", "New folder", "Rename project"][..]),
            ("folder-menu", &["New file", "New folder", "Rename", "Delete"][..]),
            ("component-menu", &["Edit component", "Rename", "Duplicate", "Delete"][..]),
            ("pages-menu", &["Open page", "Rename", "Duplicate", "Delete"][..]),
            ("assets-menu", &["Open", "Rename", "Delete"][..]),
        ]
        .into_iter()
        .map(|(id, items)| {
            (
                id.to_string(),
                items.iter().map(|item| item.to_string()).collect(),
            )
        })
        .collect();

        Self {
            enabled: true,
            routes,
            menus,
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: 0,
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`. A missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/tree-explorer/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tree-explorer").join("config.toml"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.style.indent > MAX_INDENT {
            return Err(ConfigError::Invalid(format!(
                "style.indent must be at most {}",
                MAX_INDENT
            )));
        }

        for color in [
            &self.style.base,
            &self.style.subtree,
            &self.style.loading,
            &self.style.header,
            &self.style.toggle,
        ]
        .into_iter()
        .flatten()
        {
            Color::from_str(color)
                .map_err(|_| ConfigError::Invalid(format!("unknown color '{}'", color)))?;
        }

        if self.animations.duration_ms > MAX_DURATION_MS {
            return Err(ConfigError::Invalid(format!(
                "animations.duration_ms must be at most {}",
                MAX_DURATION_MS
            )));
        }
        Easing::from_str(&self.animations.easing).map_err(ConfigError::Invalid)?;

        for (category, menu_id) in &self.context_menu.routes {
            MenuCategory::from_str(category).map_err(ConfigError::Invalid)?;
            if !self.context_menu.menus.contains_key(menu_id) {
                return Err(ConfigError::Invalid(format!(
                    "route '{}' points to undefined menu '{}'",
                    category, menu_id
                )));
            }
        }

        Ok(())
    }

    pub fn tree_style(&self) -> TreeStyle {
        let fg = |color: &Option<String>| {
            color
                .as_deref()
                .and_then(|c| Color::from_str(c).ok())
                .map(|c| Style::default().fg(c))
                .unwrap_or_default()
        };

        TreeStyle {
            base: fg(&self.style.base),
            subtree: fg(&self.style.subtree),
            loading: fg(&self.style.loading).add_modifier(Modifier::ITALIC),
            header: fg(&self.style.header),
            toggle: fg(&self.style.toggle),
            indent: self.style.indent,
        }
    }

    /// Plain style for output without colors.
    pub fn plain_style(&self) -> TreeStyle {
        TreeStyle {
            indent: self.style.indent,
            ..TreeStyle::plain()
        }
    }

    pub fn animations(&self) -> Animations {
        if !self.animations.enabled {
            return Animations::Disabled;
        }
        Animations::Enabled(AnimationBundle::standard(
            Duration::from_millis(self.animations.duration_ms),
            Easing::from_str(&self.animations.easing).unwrap_or_default(),
            self.animations.run_on_mount,
        ))
    }

    pub fn context_menu_ids(&self) -> ContextMenuIds {
        if !self.context_menu.enabled {
            return ContextMenuIds::Disabled;
        }
        ContextMenuIds::Routes(
            self.context_menu
                .routes
                .iter()
                .filter_map(|(category, id)| {
                    MenuCategory::from_str(category)
                        .ok()
                        .map(|category| (category, id.clone()))
                })
                .collect(),
        )
    }

    /// Scanner options from `[scanner]`. The root is left collapsed.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new()
            .with_max_depth(self.scanner.max_depth)
            .with_hidden(self.scanner.show_hidden)
            .with_follow_symlinks(self.scanner.follow_symlinks)
    }
}
