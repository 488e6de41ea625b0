//! GameView: maps an engine [`Scene`] into a terminal framebuffer.
//!
//! The tower is shown from two orthographic side views: the front view looks
//! along z (columns are x), the side view looks along x (columns are z). Each
//! row is one block height; the camera height is pinned to a fixed row so the
//! tower scrolls down as it grows.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoxGeometry;
use crate::engine::Scene;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Axis, BlockState, GamePhase, BASE_DEPTH, BASE_WIDTH, BLOCK_HEIGHT};

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

const PANEL_W: u16 = 18;
const VIEW_GAP: u16 = 1;

const BG: Rgb = Rgb::new(20, 20, 28);

/// Inner area of one side view, in framebuffer coordinates.
#[derive(Debug, Clone, Copy)]
struct ViewFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    axis: Axis,
}

/// A lightweight terminal renderer for the stacking game.
pub struct GameView {
    /// Terminal columns per world unit.
    cols_per_unit: u16,
    /// World units visible either side of the base's centre.
    half_span: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // ±18 around the base centre covers a full-width block at either end
        // of its swing.
        Self {
            cols_per_unit: 1,
            half_span: 18,
        }
    }
}

impl GameView {
    pub fn new(cols_per_unit: u16, half_span: u16) -> Self {
        Self {
            cols_per_unit: cols_per_unit.max(1),
            half_span: half_span.max(1),
        }
    }

    /// Width of one framed view, borders included.
    pub fn frame_width(&self) -> u16 {
        self.half_span * 2 * self.cols_per_unit + 2
    }

    /// Render a scene into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, scene: &Scene, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        if viewport.width < 4 || viewport.height < 4 {
            return;
        }

        let frame_w = self.frame_width();
        let frame_h = viewport.height;
        let both = viewport.width >= frame_w * 2 + VIEW_GAP;
        let views_w = if both { frame_w * 2 + VIEW_GAP } else { frame_w };
        let total_w = views_w + 2 + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let title = CellStyle { bold: true, ..border };

        let mut frames = [None, None];
        let views = [(Axis::X, " FRONT "), (Axis::Z, " SIDE ")];
        for (i, (axis, name)) in views.iter().enumerate() {
            if i == 1 && !both {
                break;
            }
            let x = start_x + i as u16 * (frame_w + VIEW_GAP);
            self.draw_border(fb, x, 0, frame_w, frame_h, border);
            fb.put_str(x + 2, 0, name, title);
            let frame = ViewFrame {
                x: x + 1,
                y: 1,
                w: frame_w.saturating_sub(2),
                h: frame_h.saturating_sub(2),
                axis: *axis,
            };
            fb.fill_rect(frame.x, frame.y, frame.w, frame.h, ' ', CellStyle::fg(BG).with_bg(BG));
            frames[i] = Some(frame);
        }

        for frame in frames.iter().flatten() {
            self.draw_scene(fb, scene, *frame);
        }

        self.draw_side_panel(fb, scene, viewport, start_x + views_w + 2);

        let overlay = if scene.paused {
            Some("PAUSED")
        } else {
            match scene.game.phase {
                GamePhase::Ready => Some("PRESS SPACE"),
                GamePhase::Ended => Some("GAME OVER"),
                _ => None,
            }
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, start_x, views_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_scene(&self, fb: &mut FrameBuffer, scene: &Scene, frame: ViewFrame) {
        let cam = scene.camera_y;

        for g in &scene.game.blocks {
            self.draw_box(fb, frame, cam, g, '█', block_style(g.color, false, false));
        }
        for g in &scene.collapsing {
            self.draw_box(fb, frame, cam, g, '▓', block_style(g.color, false, true));
        }
        if let Some(current) = scene.game.current {
            let (ch, style) = match current.state {
                BlockState::Missed => ('▒', block_style(current.geometry.color, false, true)),
                _ => ('█', block_style(current.geometry.color, true, false)),
            };
            self.draw_box(fb, frame, cam, &current.geometry, ch, style);
        }
        for g in &scene.debris {
            self.draw_box(fb, frame, cam, g, '░', block_style(g.color, false, true));
        }
    }

    fn draw_box(
        &self,
        fb: &mut FrameBuffer,
        frame: ViewFrame,
        camera_y: f64,
        g: &BoxGeometry,
        ch: char,
        style: CellStyle,
    ) {
        let mid_y = g.position.y + g.dimension.height / 2.0;
        let Some(row) = self.row_for(frame, camera_y, mid_y) else {
            return;
        };
        let Some((left, right)) = self.cols_for(frame, g.min(frame.axis), g.max(frame.axis)) else {
            return;
        };
        fb.fill_rect(frame.x + left, frame.y + row, right - left, 1, ch, style);
    }

    /// Row (inside the frame) of something centred at world height `mid_y`.
    ///
    /// The tier just below the camera height lands on the row a third of the
    /// way down.
    fn row_for(&self, frame: ViewFrame, camera_y: f64, mid_y: f64) -> Option<u16> {
        let anchor = (frame.h / 3) as i64;
        let rel = ((mid_y - camera_y + BLOCK_HEIGHT / 2.0) / BLOCK_HEIGHT).round() as i64;
        let row = anchor - rel;
        if row < 0 || row >= frame.h as i64 {
            return None;
        }
        Some(row as u16)
    }

    /// Column span `[left, right)` (inside the frame) of world range `[min, max]`.
    fn cols_for(&self, frame: ViewFrame, min: f64, max: f64) -> Option<(u16, u16)> {
        if max <= min {
            return None;
        }
        let scale = self.cols_per_unit as f64;
        let center = match frame.axis {
            Axis::X => BASE_WIDTH / 2.0,
            Axis::Z => BASE_DEPTH / 2.0,
        };
        let origin = center - self.half_span as f64;
        let w = frame.w as f64;
        let left = ((min - origin) * scale).floor().clamp(0.0, w);
        let mut right = ((max - origin) * scale).ceil().clamp(0.0, w);
        if right <= left {
            if left >= w {
                return None;
            }
            right = left + 1.0;
        }
        Some((left as u16, right as u16))
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_side_panel(&self, fb: &mut FrameBuffer, scene: &Scene, viewport: Viewport, panel_x: u16) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let hint = CellStyle { dim: true, ..value };

        let mut y = 1;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, scene.display_score, value);
        y += 2;

        fb.put_str(panel_x, y, "HEIGHT", label);
        y += 1;
        fb.put_u32(panel_x, y, scene.game.tower_len as u32, value);
        y += 2;

        let status = if scene.paused {
            "PAUSED"
        } else {
            match scene.game.phase {
                GamePhase::Loading => "LOADING",
                GamePhase::Ready => "PRESS SPACE",
                GamePhase::Playing => "",
                GamePhase::Ended => "GAME OVER",
                GamePhase::Resetting => "RESETTING",
            }
        };
        fb.put_str(panel_x, y, status, label);
        y += 1;
        if scene.game.phase == GamePhase::Ended && !scene.paused {
            fb.put_str(panel_x, y, "SPACE TO RESET", hint);
        }
        y += 1;

        if scene.bonus_flash {
            let perfect = CellStyle {
                fg: Rgb::new(255, 215, 80),
                bg: Rgb::new(0, 0, 0),
                bold: true,
                dim: false,
            };
            fb.put_str(panel_x, y, "PERFECT!", perfect);
        }
        y += 2;

        let hint_phase = matches!(scene.game.phase, GamePhase::Ready | GamePhase::Playing);
        if scene.game.show_instructions && hint_phase {
            for line in ["SPACE / CLICK", "TO DROP BLOCK", "", "P PAUSE", "Q QUIT"] {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, hint);
                y += 1;
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, start_x: u16, views_w: u16, frame_h: u16, text: &str) {
        let mid_y = frame_h / 2;
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(views_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn block_style(color: Rgb, bold: bool, dim: bool) -> CellStyle {
    CellStyle {
        fg: color,
        bg: BG,
        bold,
        dim,
    }
}
