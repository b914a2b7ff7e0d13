// Drive browser library - exposes all core modules for testing

pub mod app;
pub mod config;
pub mod event;
pub mod model;
pub mod services;
pub mod state;
pub mod ui;
