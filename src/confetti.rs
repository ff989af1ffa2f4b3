use crate::constants::{CONFETTI_CANVAS_ID, CONFETTI_CANVAS_Z_INDEX, CONFETTI_TIMEOUT_MS};
use crate::core::{ConfettiRun, ConfettiStatus, CONFETTI_COUNT};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// One-shot confetti burst drawn on its own 2D canvas above the viewer.
pub struct ConfettiOverlay {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    run: ConfettiRun,
    raf: Option<i32>,
    tick: Option<Tick>,
    last_instant: Instant,
}

impl ConfettiOverlay {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let canvas = match document.get_element_by_id(CONFETTI_CANVAS_ID) {
            Some(el) => el
                .dyn_into::<web::HtmlCanvasElement>()
                .map_err(|e| anyhow::anyhow!("{:?}", e))?,
            None => {
                // the page may omit it; create a fixed full-viewport canvas
                let el = document
                    .create_element("canvas")
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                el.set_id(CONFETTI_CANVAS_ID);
                if let Some(body) = document.body() {
                    _ = body.append_child(&el);
                }
                el.dyn_into::<web::HtmlCanvasElement>()
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?
            }
        };
        let style = canvas.style();
        _ = style.set_property("position", "fixed");
        _ = style.set_property("inset", "0");
        _ = style.set_property("pointer-events", "none");
        _ = style.set_property("z-index", CONFETTI_CANVAS_Z_INDEX);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            canvas,
            ctx,
            run: ConfettiRun::default(),
            raf: None,
            tick: None,
            last_instant: Instant::now(),
        })
    }

    fn draw(&mut self) {
        let dt_sec = self.last_instant.elapsed().as_secs_f32();
        self.last_instant = Instant::now();
        let Some(field) = self.run.field_mut() else {
            return;
        };
        let (w, h) = field.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        if field.step(dt_sec) == ConfettiStatus::Finished {
            return;
        }
        for seg in field.segments() {
            self.ctx.begin_path();
            self.ctx.set_line_width(seg.line_width as f64);
            self.ctx.set_stroke_style_str(seg.color);
            self.ctx.move_to(seg.from[0] as f64, seg.from[1] as f64);
            self.ctx.line_to(seg.to[0] as f64, seg.to[1] as f64);
            self.ctx.stroke();
        }
    }

    fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

/// Start a burst. Ignored while one is already running.
pub fn launch(overlay: &Rc<RefCell<ConfettiOverlay>>) {
    let Some(window) = web::window() else {
        return;
    };
    {
        let mut o = overlay.borrow_mut();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as u32;
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as u32;
        if !o.run.start(&mut rand::thread_rng(), w as f32, h as f32) {
            log::debug!("[confetti] already running; trigger ignored");
            return;
        }
        o.canvas.set_width(w.max(1));
        o.canvas.set_height(h.max(1));
        o.last_instant = Instant::now();
    }

    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let overlay_tick = overlay.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut o = overlay_tick.borrow_mut();
        if !o.run.is_running() {
            return;
        }
        o.draw();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            o.raf = w.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
        }
    }) as Box<dyn FnMut()>));
    {
        let mut o = overlay.borrow_mut();
        if let Some(cb) = tick.borrow().as_ref() {
            o.raf = window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
        }
        o.tick = Some(tick);
    }

    let overlay_stop = overlay.clone();
    let stop_cb: JsValue = Closure::once_into_js(move || stop(&overlay_stop));
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        stop_cb.unchecked_ref(),
        CONFETTI_TIMEOUT_MS,
    );
    log::info!("[confetti] launched {} particles", CONFETTI_COUNT);
}

/// Cancel the frame loop and wipe the canvas.
fn stop(overlay: &Rc<RefCell<ConfettiOverlay>>) {
    let mut o = overlay.borrow_mut();
    if let (Some(id), Some(w)) = (o.raf.take(), web::window()) {
        _ = w.cancel_animation_frame(id);
    }
    o.run.stop();
    // drop the frame closure; it holds the only other reference to its cell
    if let Some(tick) = o.tick.take() {
        tick.borrow_mut().take();
    }
    o.clear();
    log::debug!("[confetti] finished");
}
