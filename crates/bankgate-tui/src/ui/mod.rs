//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout for the checking, login, and index screens
//! - `input`: keyboard event handling per screen
//! - `styles`: color scheme and text styling

pub mod input;
pub mod render;
pub mod styles;
