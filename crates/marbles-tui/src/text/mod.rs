//! Text measuring utilities shared by widgets.
//!
//! - [`visual_width`] - Width of a string in terminal cells
//! - [`truncate_to_width`] - Cut a string to a cell budget with an ellipsis
//! - [`single_line`] - Replace control characters so text stays on one row

mod width;

pub use width::{single_line, truncate_to_width, visual_width};
