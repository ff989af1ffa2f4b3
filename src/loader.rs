use crate::core::{decode_logo, logo_model, ModelCpu, LOGO_URL};
use crate::frame::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[inline]
fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Switch to `variant`: release the current model, abort any in-flight fetch,
/// then fetch, parse and attach the new asset in the background.
pub fn load_variant(viewer: &Rc<RefCell<Viewer>>, variant: &str) {
    let Some(ticket) = viewer.borrow_mut().request_variant(variant) else {
        log::debug!("[model] {} already selected", variant);
        return;
    };
    let abort = web::AbortController::new().ok();
    viewer.borrow_mut().replace_pending_fetch(abort.clone());

    let viewer = viewer.clone();
    spawn_local(async move {
        let signal = abort.as_ref().map(web::AbortController::signal);
        let result = match fetch_bytes(ticket.variant(), signal.as_ref()).await {
            Ok(bytes) => ModelCpu::from_glb(&bytes).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        viewer.borrow_mut().finish_load(&ticket, result);
    });
}

/// Fetch the logo image and hand its plane to the viewer once decoded.
pub fn load_logo(viewer: &Rc<RefCell<Viewer>>) {
    let viewer = viewer.clone();
    spawn_local(async move {
        let result = match fetch_bytes(LOGO_URL, None).await {
            Ok(bytes) => decode_logo(&bytes)
                .map_err(anyhow::Error::from)
                .and_then(|tex| {
                    logo_model(tex).ok_or_else(|| anyhow::anyhow!("{} has zero size", LOGO_URL))
                }),
            Err(e) => Err(e),
        };
        viewer.borrow_mut().attach_logo(result);
    });
}

async fn fetch_bytes(url: &str, signal: Option<&web::AbortSignal>) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let init = web::RequestInit::new();
    init.set_method("GET");
    init.set_signal(signal);
    let request = web::Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into::<web::Response>()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} fetching {}", resp.status(), url);
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
