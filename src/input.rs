use glam::Vec2;
use web_sys as web;

/// Pointer travel (canvas px) beyond which a press counts as a drag, not a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// Tracks one pointer press so a release can be classified as click or drag.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub down: bool,
    pub last: Vec2,
    pub travel: f32,
}

impl PointerState {
    pub fn press(&mut self, at: Vec2) {
        self.down = true;
        self.last = at;
        self.travel = 0.0;
    }

    /// Record movement; returns the delta since the previous sample while pressed.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.down {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travel += delta.length();
        Some(delta)
    }

    /// End the press; `true` when it qualifies as a click.
    pub fn release(&mut self) -> bool {
        let was_click = self.down && self.travel <= CLICK_SLOP_PX;
        self.down = false;
        was_click
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    css_to_backing(x_css, y_css, rect.width() as f32, rect.height() as f32, canvas)
}

#[inline]
fn css_to_backing(
    x_css: f32,
    y_css: f32,
    css_w: f32,
    css_h: f32,
    canvas: &web::HtmlCanvasElement,
) -> Vec2 {
    if css_w <= 0.0 || css_h <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        x_css / css_w * canvas.width() as f32,
        y_css / css_h * canvas.height() as f32,
    )
}

/// Normalize wheel deltas to notches; pixel-mode deltas are ~100 per notch.
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    match delta_mode {
        0 => (delta_y / 100.0) as f32, // DOM_DELTA_PIXEL
        1 => (delta_y / 3.0) as f32,   // DOM_DELTA_LINE
        _ => delta_y as f32,           // DOM_DELTA_PAGE
    }
}
