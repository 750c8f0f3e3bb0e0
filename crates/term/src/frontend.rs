//! Terminal frontend: the [`Renderer`] used by the interactive game.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::GameSnapshot;
use crate::engine::Renderer;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Where the frontend gets its viewport size from.
pub trait ViewportSource {
    fn viewport(&mut self) -> Viewport;
}

/// The real terminal size, falling back to 80x24 when it cannot be queried.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSize;

impl ViewportSource for TerminalSize {
    fn viewport(&mut self) -> Viewport {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        Viewport::new(w, h)
    }
}

impl ViewportSource for Viewport {
    fn viewport(&mut self) -> Viewport {
        *self
    }
}

pub struct TermFrontend<W: Write = io::Stdout, S: ViewportSource = TerminalSize> {
    view: GameView,
    term: TerminalRenderer<W>,
    size: S,
    fb: FrameBuffer,
}

impl TermFrontend {
    pub fn new() -> Self {
        Self::with_parts(TerminalRenderer::new(), TerminalSize)
    }
}

impl Default for TermFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, S: ViewportSource> TermFrontend<W, S> {
    pub fn with_parts(term: TerminalRenderer<W>, size: S) -> Self {
        Self {
            view: GameView::default(),
            term,
            size,
            fb: FrameBuffer::new(0, 0),
        }
    }

    pub fn terminal(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.term
    }

    /// Drop the diff state; the next frame is drawn in full.
    pub fn invalidate(&mut self) {
        self.term.invalidate();
    }
}

impl<W: Write, S: ViewportSource> Renderer for TermFrontend<W, S> {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let viewport = self.size.viewport();
        self.view.render_into(snapshot, viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::GameConfig;

    #[test]
    fn draws_tile_values_to_the_writer() {
        let game = GameState::from_layout(
            GameConfig::default(),
            [[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]],
        );
        let mut frontend = TermFrontend::with_parts(
            TerminalRenderer::with_writer(Vec::new()),
            Viewport::new(60, 24),
        );
        frontend.draw(&game.snapshot()).unwrap();

        let out = String::from_utf8_lossy(frontend.terminal().writer()).into_owned();
        assert!(out.contains("1024"));
        assert!(out.contains("MOVES"));
    }
}
