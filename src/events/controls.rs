use crate::confetti::{self, ConfettiOverlay};
use crate::constants::{
    ENTRY_BUTTON_ID, SETTINGS_BUTTON_ID, TOGGLE_ANIMATION_ID, VARIANT_ATTRIBUTE,
    VARIANT_BUTTON_SELECTOR,
};
use crate::core::Control;
use crate::dom;
use crate::frame::Viewer;
use crate::loader;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Settings panel, parameter inputs, the open/close button and variant buttons.
pub fn wire_controls(document: &web::Document, viewer: &Rc<RefCell<Viewer>>) {
    wire_settings_panel(document);

    for control in Control::ALL {
        let viewer = viewer.clone();
        let doc = document.clone();
        dom::add_input_listener(document, control.element_id(), move |value| {
            viewer.borrow_mut().apply_control(control, &value);
            if control == Control::Background {
                if let Some(body) = doc.body() {
                    _ = body.style().set_property("background", &value);
                }
            }
        });
    }

    let viewer_toggle = viewer.clone();
    dom::add_click_listener(document, TOGGLE_ANIMATION_ID, move || {
        viewer_toggle.borrow_mut().toggle_animation();
    });

    wire_variant_buttons(document, viewer);
}

fn wire_settings_panel(document: &web::Document) {
    let doc_toggle = document.clone();
    dom::add_click_listener(document, SETTINGS_BUTTON_ID, move || {
        overlay::toggle_settings(&doc_toggle);
    });

    // any click outside the panel and its button closes it
    let doc_outside = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Node>().ok())
            .map(|node| overlay::within_settings(&doc_outside, &node))
            .unwrap_or(false);
        if !inside {
            overlay::close_settings(&doc_outside);
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_variant_buttons(document: &web::Document, viewer: &Rc<RefCell<Viewer>>) {
    let Ok(buttons) = document.query_selector_all(VARIANT_BUTTON_SELECTOR) else {
        return;
    };
    let mut wired = 0;
    for i in 0..buttons.length() {
        let Some(el) = buttons
            .item(i)
            .and_then(|n| n.dyn_into::<web::Element>().ok())
        else {
            continue;
        };
        let Some(variant) = el.get_attribute(VARIANT_ATTRIBUTE).filter(|v| !v.is_empty()) else {
            log::warn!("[ui] variant button without {}", VARIANT_ATTRIBUTE);
            continue;
        };
        let viewer = viewer.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            loader::load_variant(&viewer, &variant);
        }) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        wired += 1;
    }
    log::info!("[ui] wired {} variant buttons", wired);
}

/// Entry button: dismiss the gate, size the now-visible canvas and celebrate.
pub fn wire_entry_gate(
    document: &web::Document,
    viewer: &Rc<RefCell<Viewer>>,
    confetti: Option<Rc<RefCell<ConfettiOverlay>>>,
) {
    let doc = document.clone();
    let viewer = viewer.clone();
    dom::add_click_listener(document, ENTRY_BUTTON_ID, move || {
        overlay::enter(&doc);
        viewer.borrow_mut().on_resize();
        if let Some(c) = &confetti {
            confetti::launch(c);
        }
    });
}
