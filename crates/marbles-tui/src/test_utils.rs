//! Rendering helpers for TUI tests.
//!
//! Widgets are drawn into an off-screen [`Buffer`] and flattened to text so
//! tests can assert on what a terminal would show.

use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::App;

/// Screen size used by [`render_app_to_string`].
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Flatten a buffer into one line per row, right-trimmed.
///
/// The final row carries no trailing newline.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    let rows: Vec<String> = buffer
        .content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(ratatui::buffer::Cell::symbol).collect();
            line.trim_end_matches(' ').to_string()
        })
        .collect();
    rows.join("\n")
}

/// Draw the whole app at the test screen size.
pub fn render_app_to_string(app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_rows_are_trimmed() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 8, 3));
        buffer.set_string(0, 0, "[1]", Style::default());
        buffer.set_string(2, 1, "[|]", Style::default());

        assert_eq!(buffer_to_string(&buffer), "[1]\n  [|]\n");
    }
}
