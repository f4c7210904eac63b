//! Text-mode renderer for headless runs
//!
//! Maps the pixel surface onto a character grid. Row 0 of the grid is the top
//! of the surface (y is flipped).

use super::{AssetTag, Batch, DrawItem, Renderer};

pub struct AsciiRenderer {
    /// Surface size in pixels
    width: u32,
    height: u32,
    /// Grid size in characters
    cols: usize,
    rows: usize,
    frame: Vec<Vec<char>>,
}

impl AsciiRenderer {
    pub fn new(width: u32, height: u32, cols: usize, rows: usize) -> Self {
        Self {
            width,
            height,
            cols: cols.max(1),
            rows: rows.max(1),
            frame: vec![vec![' '; cols.max(1)]; rows.max(1)],
        }
    }

    fn glyph(asset: AssetTag) -> char {
        match asset {
            AssetTag::Ball => 'o',
            AssetTag::Bar => '|',
            AssetTag::Wall => '=',
        }
    }

    fn col(&self, x: f64) -> isize {
        (x / self.width as f64 * self.cols as f64).floor() as isize
    }

    fn row(&self, y: f64) -> isize {
        self.rows as isize - 1 - (y / self.height as f64 * self.rows as f64).floor() as isize
    }

    /// Column of the last cell covered by a span ending at `x`
    fn last_col(&self, x: f64) -> isize {
        (x / self.width as f64 * self.cols as f64).ceil() as isize - 1
    }

    /// Row of the last cell covered by a span ending at `y`
    fn last_row(&self, y: f64) -> isize {
        self.rows as isize - (y / self.height as f64 * self.rows as f64).ceil() as isize
    }

    fn put(&mut self, col: isize, row: isize, c: char) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self
            .frame
            .get_mut(row as usize)
            .and_then(|line| line.get_mut(col as usize))
        {
            *cell = c;
        }
    }

    /// Last drawn frame, one line per row
    pub fn to_text(&self) -> String {
        self.frame
            .iter()
            .map(|line| line.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Renderer for AsciiRenderer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, batch: &Batch) {
        for line in &mut self.frame {
            line.fill(' ');
        }

        for item in batch.items() {
            match item {
                DrawItem::Sprite { asset, bounds } => {
                    let glyph = Self::glyph(*asset);
                    // Right/top edges are exclusive so a sprite never bleeds a cell
                    let c0 = self.col(bounds.left());
                    let c1 = self.last_col(bounds.right()).max(c0);
                    let r1 = self.row(bounds.bottom());
                    let r0 = self.last_row(bounds.top()).min(r1);
                    for row in r0..=r1 {
                        for col in c0..=c1 {
                            self.put(col, row, glyph);
                        }
                    }
                }
                DrawItem::Label(label) => {
                    let len = label.text.chars().count() as isize;
                    let start = self.col(label.pos.x) - len / 2;
                    let row = self.row(label.pos.y);
                    for (i, c) in label.text.chars().enumerate() {
                        self.put(start + i as isize, row, c);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Label;
    use crate::sim::Rect;
    use glam::DVec2;

    #[test]
    fn test_sprites_and_labels_land_on_grid() {
        let mut renderer = AsciiRenderer::new(100, 100, 10, 10);
        let mut batch = Batch::new();
        batch.push_sprite(AssetTag::Wall, Rect::from_xywh(0.0, 0.0, 100.0, 10.0));
        batch.push_sprite(AssetTag::Ball, Rect::from_xywh(50.0, 50.0, 10.0, 10.0));
        batch.push_label(Label::new("hi", 12, DVec2::new(50.0, 95.0)));
        renderer.draw(&batch);

        let text = renderer.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "    hi");
        assert_eq!(lines[4], "     o");
        assert_eq!(lines[9], "==========");
    }

    #[test]
    fn test_offscreen_sprite_is_clipped() {
        let mut renderer = AsciiRenderer::new(100, 100, 10, 10);
        let mut batch = Batch::new();
        batch.push_sprite(AssetTag::Ball, Rect::from_xywh(-50.0, 200.0, 10.0, 10.0));
        renderer.draw(&batch);
        assert!(renderer.to_text().trim().is_empty());
    }
}
