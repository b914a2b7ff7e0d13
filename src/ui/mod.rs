//! UI rendering modules
//!
//! This module contains all rendering logic for the browser UI,
//! separated into focused submodules:
//! - `screen` - Full-frame composition and hit-test layout
//! - `breadcrumbs` - Breadcrumb trail bar
//! - `sidebar` - Navigation sidebar with storage footer
//! - `grid` - Tile grid entry view
//! - `list` - Detailed list entry view
//! - `menu` - New item popup menu
//! - `icons` - Per-kind icons and colors
//! - `theme` - Color themes and theme file loading

pub mod breadcrumbs;
pub mod grid;
pub mod icons;
pub mod list;
pub mod menu;
pub mod screen;
pub mod sidebar;
pub mod theme;

// Re-export main types for convenience
pub use screen::{EntriesLayout, ScreenLayout};
pub use sidebar::SidebarItem;
pub use theme::Theme;
