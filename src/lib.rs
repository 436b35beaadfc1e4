//! Tree Explorer - a terminal project explorer
//!
//! This crate provides:
//! - A recursive, decorator-driven tree-node component (`tree`)
//! - Project directory scanning into explorer trees (`scanner`)
//! - An interactive TUI with animated drawers and context menus (`tui`)

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod scanner;
pub mod tree;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{ExplorerError, Result};
