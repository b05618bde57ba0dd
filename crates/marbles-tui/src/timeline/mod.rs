//! Timeline module for drawing a scrolling event strip.
//!
//! This module provides:
//! - [`TimelineWidget`] - Widget rendering the boxes of a [`Scene`](marbles_engine::Scene)
//! - [`box_text`] - The text drawn inside a single box

mod widget;

pub use widget::{box_text, TimelineWidget, MIN_BOX_CELLS};
