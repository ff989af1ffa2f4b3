use crate::frame::Viewer;
use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
struct PointerWiring {
    canvas: web::HtmlCanvasElement,
    viewer: Rc<RefCell<Viewer>>,
    state: Rc<RefCell<PointerState>>,
}

/// Orbit drag, wheel zoom and click-to-open on the viewer canvas.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, viewer: &Rc<RefCell<Viewer>>) {
    let w = PointerWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        state: Rc::new(RefCell::new(PointerState::default())),
    };
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let at = input::pointer_canvas_px(&ev, &w.canvas);
        w.state.borrow_mut().press(at);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let at = input::pointer_canvas_px(&ev, &w.canvas);
        let Some(delta) = w.state.borrow_mut().move_to(at) else {
            return;
        };
        let height = w.canvas.height() as f32;
        if let Some(orbit) = w.viewer.borrow_mut().camera.as_orbit_mut() {
            orbit.rotate_by_pixels(delta.x, delta.y, height);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &PointerWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let at = input::pointer_canvas_px(&ev, &w.canvas);
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        // presses only begin on the canvas, so a click here is a canvas click
        if w.state.borrow_mut().release() {
            w.viewer.borrow_mut().click(at);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let notches = input::wheel_notches(ev.delta_y(), ev.delta_mode());
        if let Some(orbit) = w.viewer.borrow_mut().camera.as_orbit_mut() {
            orbit.zoom(notches);
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
