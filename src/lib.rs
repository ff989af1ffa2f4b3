#![cfg(target_arch = "wasm32")]
use crate::core::ViewerConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod confetti;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;

fn wire_resize(viewer: &Rc<RefCell<frame::Viewer>>) {
    let viewer = viewer.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        viewer.borrow_mut().on_resize();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vault-viewer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = ViewerConfig::from_lookup(|name| canvas.get_attribute(name));
    log::info!(
        "[config] camera={:?} click_to_open={} initial={}",
        config.camera_mode,
        config.click_to_open,
        config.initial_variant
    );

    overlay::show_gate(&document);
    dom::sync_canvas_backing_size(&canvas);

    // Without WebGPU the UI still works; frames just skip drawing
    let gpu = frame::init_gpu(&canvas).await;
    let initial_variant = config.initial_variant.clone();
    let viewer = Rc::new(RefCell::new(frame::Viewer::new(config, canvas.clone(), gpu)));

    let confetti = match confetti::ConfettiOverlay::new(&document) {
        Ok(c) => Some(Rc::new(RefCell::new(c))),
        Err(e) => {
            log::warn!("[confetti] disabled: {:?}", e);
            None
        }
    };

    wire_resize(&viewer);
    events::wire_pointer_handlers(&canvas, &viewer);
    events::wire_controls(&document, &viewer);
    events::wire_entry_gate(&document, &viewer, confetti);

    loader::load_logo(&viewer);
    loader::load_variant(&viewer, &initial_variant);
    frame::start_loop(viewer);
    Ok(())
}
