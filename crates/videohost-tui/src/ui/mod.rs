//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: landing page layout (header, auth panel, product panel, footer)
//! - `input`: Keyboard event handling
//! - `styles`: Dark/light palettes and text styling

pub mod input;
pub mod render;
pub mod styles;
