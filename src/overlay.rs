use crate::constants::{
    CANVAS_ID, CONTROL_PANEL_SELECTOR, ENTRY_OVERLAY_ID, PANEL_ACTIVE_CLASS, SETTINGS_PANEL_ID,
};
use crate::dom;
use web_sys as web;

fn control_panel(document: &web::Document) -> Option<web::Element> {
    document.query_selector(CONTROL_PANEL_SELECTOR).ok().flatten()
}

/// Entry gate up: overlay visible, viewer canvas and control panel hidden.
pub fn show_gate(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ENTRY_OVERLAY_ID) {
        dom::set_display(&el, "flex");
    } else {
        log::warn!("[ui] missing #{}; entering directly", ENTRY_OVERLAY_ID);
        return;
    }
    if let Some(el) = document.get_element_by_id(CANVAS_ID) {
        dom::set_display(&el, "none");
    }
    if let Some(el) = control_panel(document) {
        dom::set_display(&el, "none");
    }
}

/// Dismiss the gate and reveal the viewer.
pub fn enter(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ENTRY_OVERLAY_ID) {
        dom::set_display(&el, "none");
    }
    if let Some(el) = document.get_element_by_id(CANVAS_ID) {
        dom::set_display(&el, "block");
    }
    if let Some(el) = control_panel(document) {
        dom::set_display(&el, "block");
    }
    log::info!("[ui] entered viewer");
}

#[inline]
pub fn toggle_settings(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(SETTINGS_PANEL_ID) {
        _ = el.class_list().toggle(PANEL_ACTIVE_CLASS);
    }
}

#[inline]
pub fn close_settings(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(SETTINGS_PANEL_ID) {
        _ = el.class_list().remove_1(PANEL_ACTIVE_CLASS);
    }
}

/// Whether `target` sits inside the settings panel or its toggle button.
pub fn within_settings(document: &web::Document, target: &web::Node) -> bool {
    [SETTINGS_PANEL_ID, crate::constants::SETTINGS_BUTTON_ID]
        .iter()
        .filter_map(|id| document.get_element_by_id(id))
        .any(|el| el.contains(Some(target)))
}
