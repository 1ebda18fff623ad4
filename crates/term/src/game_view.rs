//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, LockPhase};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, PieceKind};

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

/// Driver state the snapshot does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlay {
    pub paused: bool,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Renders the playfield, a side panel, and overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board = &snap.board;
        let board_w = u16::from(board.width()) * self.cell_w;
        let board_h = u16::from(board.height()) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_w,
            board_h,
            ' ',
            Style::new(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            Style::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in 0..board.height() {
            for x in 0..board.width() {
                let Some(cell) = board.get(x as i8, y as i8) else {
                    continue;
                };
                let (ch, style) = cell_glyph(cell);
                let px = start_x + 1 + u16::from(x) * self.cell_w;
                let py = start_y + 1 + u16::from(y) * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if overlay.paused {
            draw_banner(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over {
            draw_banner(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.held {
            Some(kind) => {
                let style = if snap.swap_used { value.dim() } else { value };
                fb.put_str(panel_x, y, piece_letter(kind), style);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for kind in &snap.next {
            fb.put_char(panel_x, y, '■', Style::new(piece_color(*kind), PANEL_BG));
            fb.put_str(panel_x + 2, y, piece_letter(*kind), value);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "LINES", label);
        y += 1;
        fb.put_number(panel_x, y, snap.lines_cleared, value);
        y += 2;

        fb.put_str(panel_x, y, "PIECES", label);
        y += 1;
        fb.put_number(panel_x, y, snap.pieces_locked, value);
        y += 2;

        if snap.phase == LockPhase::Resting && snap.playable() {
            fb.put_str(panel_x, y, "LOCKING", value.dim());
        }
    }
}

fn cell_glyph(cell: Cell) -> (char, Style) {
    match cell {
        Cell::Empty => ('·', Style::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim()),
        Cell::Block(kind) => ('█', Style::new(piece_color(kind), PLAYFIELD_BG).bold()),
        Cell::Ghost(_) => ('░', Style::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim()),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_banner(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
    let ty = y.saturating_add(h / 2);
    let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(tx, ty, text, style);
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}
