//! Timeline widget for rendering a scene of event boxes.

use marbles_engine::{BoxStyle, Scene, VisualizerConfig};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::text::{single_line, truncate_to_width, visual_width};
use crate::theme::Theme;

/// Narrowest box that still fits its brackets and one character.
pub const MIN_BOX_CELLS: u16 = 3;

/// Scrolling strip of event boxes.
///
/// Logical track coordinates are scaled onto whatever area the widget is
/// given; boxes partly off the left edge are clipped.
pub struct TimelineWidget<'a> {
    scene: &'a Scene,
    config: &'a VisualizerConfig,
    theme: &'a Theme,
    title: &'a str,
    attached: bool,
}

impl<'a> TimelineWidget<'a> {
    /// Create a new timeline widget.
    pub fn new(scene: &'a Scene, config: &'a VisualizerConfig, theme: &'a Theme) -> Self {
        Self {
            scene,
            config,
            theme,
            title: "",
            attached: false,
        }
    }

    /// Set the border title.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set whether the timeline's frame loop is running.
    #[must_use]
    pub fn attached(mut self, attached: bool) -> Self {
        self.attached = attached;
        self
    }

    fn box_style(&self, style: BoxStyle) -> Style {
        let bg = match style {
            BoxStyle::Value => self.theme.value_box,
            BoxStyle::Completed => self.theme.completed_box,
            BoxStyle::Error => self.theme.error_box,
        };
        let base = Style::default().fg(self.theme.base).bg(bg);
        if style == BoxStyle::Value {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        }
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.attached {
            Style::default().fg(self.theme.border_attached)
        } else {
            Style::default().fg(self.theme.border)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.base));
        if !self.title.is_empty() {
            block = block
                .title(format!(" {} ", self.title))
                .title_style(Style::default().fg(self.theme.text));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let scale_x = f64::from(inner.width) / self.config.track_width;
        let scale_y = f64::from(inner.height) / self.config.track_height;
        let cells = ((self.config.box_width * scale_x).round() as u16).max(MIN_BOX_CELLS);
        let width = i32::from(inner.width);

        for visual in self.scene.visible_boxes() {
            let col = (visual.x * scale_x).round() as i32;
            let row = (visual.y * scale_y).round() as i32;
            if row < 0 || row >= i32::from(inner.height) || col >= width {
                continue;
            }

            let text = box_text(&visual.label, cells);
            let style = self.box_style(visual.style);
            let y = inner.y + row as u16;

            if col >= 0 {
                let max_width = (width - col) as usize;
                buf.set_stringn(inner.x + col as u16, y, &text, max_width, style);
            } else {
                let clipped = skip_width(&text, (-col) as usize);
                buf.set_stringn(inner.x, y, clipped, inner.width as usize, style);
            }
        }
    }
}

/// Text drawn for a box `cells` wide: the label on one line, truncated
/// and centered between brackets.
pub fn box_text(label: &str, cells: u16) -> String {
    let room = usize::from(cells.max(MIN_BOX_CELLS)) - 2;
    let shown = truncate_to_width(&single_line(label), room);
    let pad = room.saturating_sub(visual_width(&shown));
    let left = pad / 2;
    format!("[{}{}{}]", " ".repeat(left), shown, " ".repeat(pad - left))
}

/// Drop the first `columns` display columns of `s`.
fn skip_width(s: &str, columns: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        if used >= columns {
            return &s[idx..];
        }
        used += ch.width().unwrap_or(0);
    }
    ""
}
