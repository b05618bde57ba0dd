//! Theme components for the TUI.
//!
//! Palettes are Catppuccin: [`Theme::mocha`] (default) and [`Theme::latte`].

mod colors;

pub use colors::Theme;
