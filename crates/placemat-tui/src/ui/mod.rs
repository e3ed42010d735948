//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering and layout
//! - `input`: Keyboard event handling
//! - `styles`: Color palettes and text styling
//! - `tabs`: Tab-specific content rendering (home, auth, posts)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
