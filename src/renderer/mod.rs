//! Rendering boundary
//!
//! Screens describe what is visible as a `Batch` of sprites and labels. The
//! host implements `Renderer` to put a batch on screen; `ascii` is a headless
//! implementation used by the native runner.

pub mod ascii;

pub use ascii::AsciiRenderer;

use glam::DVec2;

use crate::sim::{ObjectKind, Rect};

/// Image assets the host must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetTag {
    Ball,
    /// Paddle bar
    Bar,
    Wall,
}

impl From<ObjectKind> for AssetTag {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Ball => AssetTag::Ball,
            ObjectKind::Paddle => AssetTag::Bar,
            ObjectKind::Wall => AssetTag::Wall,
        }
    }
}

/// A line of text, centered on `pos`
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: u32,
    pub pos: DVec2,
}

impl Label {
    pub fn new(text: impl Into<String>, font_size: u32, pos: DVec2) -> Self {
        Self {
            text: text.into(),
            font_size,
            pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Sprite { asset: AssetTag, bounds: Rect },
    Label(Label),
}

/// Everything one screen wants drawn this frame, in draw order
#[derive(Debug, Clone, Default)]
pub struct Batch {
    items: Vec<DrawItem>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sprite(&mut self, asset: AssetTag, bounds: Rect) {
        self.items.push(DrawItem::Sprite { asset, bounds });
    }

    pub fn push_label(&mut self, label: Label) {
        self.items.push(DrawItem::Label(label));
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Label(label) => Some(label),
            _ => None,
        })
    }
}

/// Host-side drawing surface
pub trait Renderer {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Clear the surface and draw `batch`
    fn draw(&mut self, batch: &Batch);
}
