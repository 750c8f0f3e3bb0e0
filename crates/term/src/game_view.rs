//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Tile pixel positions are scaled into
//! character cells, so a sliding tile moves smoothly across the board.

use crate::core::{GameSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GRID_COLS, GRID_ROWS};

/// Tile colours indexed by `log2(value) - 1`; larger values reuse the last.
pub const TILE_COLORS: [Rgb; 9] = [
    Rgb::new(237, 229, 218),
    Rgb::new(238, 225, 201),
    Rgb::new(243, 178, 122),
    Rgb::new(246, 150, 101),
    Rgb::new(247, 124, 95),
    Rgb::new(247, 95, 59),
    Rgb::new(237, 208, 115),
    Rgb::new(237, 204, 99),
    Rgb::new(236, 202, 80),
];

pub const BACKGROUND: Rgb = Rgb::new(205, 192, 180);
pub const OUTLINE: Rgb = Rgb::new(187, 173, 160);
pub const FONT: Rgb = Rgb::new(119, 110, 101);

const MIN_CELL_W: u16 = 4;
const MIN_CELL_H: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub fn tile_color(value: u32) -> Rgb {
    let index = value.max(2).ilog2().saturating_sub(1) as usize;
    TILE_COLORS[index.min(TILE_COLORS.len() - 1)]
}

/// Terminal renderer for the 2048 board.
pub struct GameView {
    /// Preferred grid cell width in terminal columns, outline included.
    cell_w: u16,
    /// Preferred grid cell height in terminal rows, outline included.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2:1 roughly squares a cell on common terminal fonts.
        Self {
            cell_w: 10,
            cell_h: 5,
        }
    }
}

/// Board placement inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoardRect {
    x: u16,
    y: u16,
    cell_w: u16,
    cell_h: u16,
}

impl BoardRect {
    fn width(&self) -> u16 {
        self.cell_w * GRID_COLS as u16 + 1
    }

    fn height(&self) -> u16 {
        self.cell_h * GRID_ROWS as u16 + 1
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(MIN_CELL_W),
            cell_h: cell_h.max(MIN_CELL_H),
        }
    }

    /// Cell size actually used for `viewport`: the preferred size, shrunk
    /// until the board fits or the minimum is reached.
    pub fn cell_size(&self, viewport: Viewport) -> (u16, u16) {
        let (mut w, mut h) = (self.cell_w, self.cell_h);
        let fits = |w: u16, h: u16| {
            w * GRID_COLS as u16 + 1 <= viewport.width && h * GRID_ROWS as u16 + 1 <= viewport.height
        };
        while !fits(w, h) && (w > MIN_CELL_W || h > MIN_CELL_H) {
            w = w.saturating_sub(2).max(MIN_CELL_W);
            h = h.saturating_sub(1).max(MIN_CELL_H);
        }
        (w, h)
    }

    fn board_rect(&self, viewport: Viewport) -> BoardRect {
        let (cell_w, cell_h) = self.cell_size(viewport);
        let mut rect = BoardRect {
            x: 0,
            y: 0,
            cell_w,
            cell_h,
        };
        rect.x = viewport.width.saturating_sub(rect.width()) / 2;
        rect.y = viewport.height.saturating_sub(rect.height()) / 2;
        rect
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let rect = self.board_rect(viewport);
        let background = CellStyle::new(FONT, BACKGROUND);
        fb.fill_rect(rect.x, rect.y, rect.width(), rect.height(), ' ', background);

        for tile in &snap.tiles {
            self.draw_tile(fb, snap, rect, tile);
        }

        // Outline goes on top, so sliding tiles pass under it.
        self.draw_outline(fb, rect);

        self.draw_side_panel(fb, snap, viewport, rect);

        if snap.lost {
            self.draw_game_over(fb, rect);
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Character offset of a pixel coordinate, relative to the board origin.
    fn scale(px: i32, extent: i32, cells: u16) -> u16 {
        let extent = extent.max(1) as i64;
        let scaled = (px.max(0) as i64) * (cells as i64) / extent;
        scaled.min(u16::MAX as i64) as u16
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, rect: BoardRect, tile: &TileSnapshot) {
        let geometry = snap.geometry;
        let x = rect.x + 1 + Self::scale(tile.x, geometry.cell_width, rect.cell_w);
        let y = rect.y + 1 + Self::scale(tile.y, geometry.cell_height, rect.cell_h);
        let (w, h) = (rect.cell_w - 1, rect.cell_h - 1);

        let style = CellStyle::new(FONT, tile_color(tile.value)).bold();
        fb.fill_rect(x, y, w, h, ' ', style);

        let mut digits = [0u8; 10];
        let text = format_value(tile.value, &mut digits);
        fb.put_str_centered(x, y + (h - 1) / 2, w, text, style);
    }

    fn draw_outline(&self, fb: &mut FrameBuffer, rect: BoardRect) {
        let style = CellStyle::new(OUTLINE, OUTLINE);
        for i in 0..=GRID_ROWS as u16 {
            fb.hline(rect.x, rect.y + i * rect.cell_h, rect.width(), ' ', style);
        }
        for i in 0..=GRID_COLS as u16 {
            fb.vline(rect.x + i * rect.cell_w, rect.y, rect.height(), ' ', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        rect: BoardRect,
    ) {
        let panel_x = rect.x.saturating_add(rect.width()).saturating_add(2);
        if panel_x.saturating_add(8) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::default();

        let mut y = rect.y;
        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.max_value, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.episode_id.wrapping_add(1), value);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, rect: BoardRect) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), FONT).bold();
        let mid_y = rect.y + rect.height() / 2;
        fb.hline(rect.x, mid_y.saturating_sub(1), rect.width(), ' ', style);
        fb.hline(rect.x, mid_y, rect.width(), ' ', style);
        fb.hline(rect.x, mid_y + 1, rect.width(), ' ', style);
        fb.put_str_centered(rect.x, mid_y.saturating_sub(1), rect.width(), "GAME OVER", style);
        fb.put_str_centered(rect.x, mid_y + 1, rect.width(), "r restart  q quit", style);
    }
}

fn format_value(value: u32, buf: &mut [u8; 10]) -> &str {
    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 || start == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[start..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_by_exponent() {
        assert_eq!(tile_color(2), TILE_COLORS[0]);
        assert_eq!(tile_color(4), TILE_COLORS[1]);
        assert_eq!(tile_color(512), TILE_COLORS[8]);
        assert_eq!(tile_color(4096), TILE_COLORS[8]);
    }

    #[test]
    fn value_formatting() {
        let mut buf = [0u8; 10];
        assert_eq!(format_value(2, &mut buf), "2");
        assert_eq!(format_value(2048, &mut buf), "2048");
        assert_eq!(format_value(u32::MAX, &mut buf), "4294967295");
    }

    #[test]
    fn preferred_cell_size_when_room() {
        let view = GameView::default();
        assert_eq!(view.cell_size(Viewport::new(80, 24)), (10, 5));
    }

    #[test]
    fn cells_shrink_in_small_viewports() {
        let view = GameView::default();
        assert_eq!(view.cell_size(Viewport::new(40, 20)), (8, 4));
        assert_eq!(view.cell_size(Viewport::new(10, 5)), (4, 2));
    }

    #[test]
    fn pixel_scaling() {
        assert_eq!(GameView::scale(0, 200, 10), 0);
        assert_eq!(GameView::scale(200, 200, 10), 10);
        assert_eq!(GameView::scale(600, 200, 10), 30);
        assert_eq!(GameView::scale(40, 200, 10), 2);
        assert_eq!(GameView::scale(-5, 200, 10), 0);
    }
}
