//! Process-level services
//!
//! Code that touches the environment outside the browser itself, kept
//! apart from the model and view layers.

pub mod logging;
pub mod terminal_modes;
