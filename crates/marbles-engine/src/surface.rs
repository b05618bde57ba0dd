//! Display surfaces that own rendered boxes.
//!
//! A [`Surface`] is the display tree a timeline realizes its events into.
//! Each realized event holds exactly one [`Visual`] handle; the handle is
//! not `Clone`, so releasing it consumes the only way to reach the box.

use std::collections::BTreeMap;

/// Identifier of a box on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(u64);

/// Owned handle to a box on a surface.
#[derive(Debug, PartialEq, Eq)]
pub struct Visual {
    id: VisualId,
}

impl Visual {
    /// Identifier of the box this handle refers to.
    pub fn id(&self) -> VisualId {
        self.id
    }
}

/// Visual style of a box, chosen from the event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    /// Emitted value: neutral emphasis.
    Value,
    /// Completion: terminal box, muted color.
    Completed,
    /// Error: terminal box, alert color.
    Error,
}

/// A box as currently placed on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxVisual {
    pub label: String,
    pub style: BoxStyle,
    pub x: f64,
    pub y: f64,
    /// Boxes start hidden so they never flash at the origin.
    pub visible: bool,
}

/// Display tree that timeline boxes live in.
pub trait Surface {
    /// Create a hidden box and return the handle that owns it.
    fn create(&mut self, style: BoxStyle, label: &str) -> Visual;

    /// Move a box and make it visible.
    fn place(&mut self, visual: &Visual, x: f64, y: f64);

    /// Remove a box from the display.
    fn release(&mut self, visual: Visual);

    /// Number of boxes currently on the surface.
    fn len(&self) -> usize;

    /// Check if the surface holds no boxes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory surface, drawn by the terminal widget.
#[derive(Debug, Default)]
pub struct Scene {
    boxes: BTreeMap<VisualId, BoxVisual>,
    next_id: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a box by id.
    pub fn get(&self, id: VisualId) -> Option<&BoxVisual> {
        self.boxes.get(&id)
    }

    /// Boxes that have been placed at least once.
    pub fn visible_boxes(&self) -> impl Iterator<Item = &BoxVisual> {
        self.boxes.values().filter(|b| b.visible)
    }
}

impl Surface for Scene {
    fn create(&mut self, style: BoxStyle, label: &str) -> Visual {
        let id = VisualId(self.next_id);
        self.next_id += 1;
        self.boxes.insert(
            id,
            BoxVisual {
                label: label.to_string(),
                style,
                x: 0.0,
                y: 0.0,
                visible: false,
            },
        );
        Visual { id }
    }

    fn place(&mut self, visual: &Visual, x: f64, y: f64) {
        if let Some(b) = self.boxes.get_mut(&visual.id) {
            b.x = x;
            b.y = y;
            b.visible = true;
        }
    }

    fn release(&mut self, visual: Visual) {
        self.boxes.remove(&visual.id);
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }
}
