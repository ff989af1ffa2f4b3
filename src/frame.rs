use crate::camera::{self, CameraRig, Projection};
use crate::core::{
    raycast_model, AnimationController, ClipPlayer, Control, Drift, LoadOutcome, LoadTicket,
    ModelCpu, ModelSlot, Normalization, Release, SceneParams, Spin, ViewerConfig,
};
use crate::dom;
use crate::render::{self, FrameView, GpuModel};
use glam::{EulerRot, Mat4, Vec2};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The displayed model: CPU hierarchy for posing/picking plus its GPU copy.
pub struct SceneModel {
    pub cpu: ModelCpu,
    pub gpu: GpuModel,
    pub normalization: Normalization,
}

impl Release for SceneModel {
    fn release(&mut self) {
        self.gpu.release();
    }
}

impl SceneModel {
    /// World matrix for each mesh part given the root transform and clip time.
    fn part_world(&self, root: Mat4, clip_time: Option<f32>) -> Vec<Mat4> {
        let globals = self.cpu.pose(clip_time);
        self.cpu
            .part_matrices(&globals)
            .into_iter()
            .map(|m| root * m)
            .collect()
    }
}

pub struct Viewer {
    pub config: ViewerConfig,
    pub params: SceneParams,
    pub animation: AnimationController,
    pub drift: Drift,
    pub spin: Spin,
    pub camera: CameraRig,
    pub projection: Projection,
    pub slot: ModelSlot<SceneModel>,
    /// Logo plane and its fixed world matrices; never animated or picked.
    backdrop: Option<(GpuModel, Vec<Mat4>)>,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pending_fetch: Option<web::AbortController>,
    last_instant: Instant,
}

impl Viewer {
    pub fn new(config: ViewerConfig, canvas: web::HtmlCanvasElement, gpu: Option<render::GpuState>) -> Self {
        let params = SceneParams::default();
        let aspect = dom::viewport_aspect();
        let mut drift = Drift::default();
        drift.resize(aspect);
        Self {
            camera: CameraRig::new(config.camera_mode, params.camera_distance, params.camera_height),
            animation: AnimationController::new(params.animation_speed),
            projection: Projection::new(aspect),
            drift,
            spin: Spin::default(),
            slot: ModelSlot::new(),
            backdrop: None,
            gpu,
            canvas,
            pending_fetch: None,
            last_instant: Instant::now(),
            config,
            params,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.animation.advance(dt_sec);
        if self.slot.current().is_some() {
            self.spin
                .step(self.params.rotation_speed_x_deg, self.params.rotation_speed_y_deg);
            self.drift.step(self.params.movement_speed, dt_sec);
        }
        self.camera.update(dt_sec);

        let model_pos = self.drift.position3();
        let (eye, target) = self.camera.eye_target(model_pos);
        let view_proj = self.projection.matrix() * Mat4::look_at_rh(eye, target, glam::Vec3::Y);

        let root = self.root_matrix();
        let clip_time = self.animation.clip_time();
        let matrices = self
            .slot
            .current()
            .map(|m| m.part_world(root * m.normalization.matrix(), clip_time));

        let (w, h) = (self.canvas.width(), self.canvas.height());
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            g.set_background(self.params.background);
            let view = FrameView {
                view_proj,
                eye,
                model: self
                    .slot
                    .current()
                    .zip(matrices.as_deref())
                    .map(|(m, mats)| (&m.gpu, mats)),
                backdrop: self
                    .backdrop
                    .as_ref()
                    .map(|(gpu, mats)| (gpu, mats.as_slice())),
            };
            if let Err(e) = g.render(&view, &self.params) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    /// Drift translation and spin; normalization is applied per model.
    fn root_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.drift.position3())
            * Mat4::from_euler(EulerRot::XYZ, self.spin.x, self.spin.y, 0.0)
    }

    /// Release the current model and start tracking a load of `variant`.
    /// Returns `None` when `variant` is already selected.
    pub fn request_variant(&mut self, variant: &str) -> Option<LoadTicket> {
        let ticket = self.slot.request(variant)?;
        self.animation.unbind();
        Some(ticket)
    }

    /// Swap in the abort handle of a new fetch, aborting the one it supersedes.
    pub fn replace_pending_fetch(&mut self, next: Option<web::AbortController>) {
        if let Some(prev) = std::mem::replace(&mut self.pending_fetch, next) {
            prev.abort();
        }
    }

    pub fn finish_load(&mut self, ticket: &LoadTicket, result: anyhow::Result<ModelCpu>) {
        if !self.slot.is_current(ticket) {
            // never uploaded, so there is nothing to release
            log::debug!("[model] ignoring superseded load of {}", ticket.variant());
            return;
        }
        self.pending_fetch = None;
        let built = result.and_then(|cpu| {
            let gpu = self
                .gpu
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("renderer unavailable"))?;
            let uploaded = gpu.upload_model(&cpu);
            log::debug!(
                "[model] uploaded {} draws for {}",
                uploaded.draw_count(),
                ticket.variant()
            );
            Ok(SceneModel {
                normalization: cpu.normalization(),
                gpu: uploaded,
                cpu,
            })
        });
        let outcome = self.slot.complete(ticket, built.map_err(|e| format!("{:#}", e)));
        if outcome == LoadOutcome::Attached {
            let player = self
                .slot
                .current()
                .and_then(|m| m.cpu.clip.as_ref())
                .map(|clip| ClipPlayer::new(clip.duration));
            if player.is_none() {
                log::info!("[anim] {} has no animation clip", ticket.variant());
            }
            self.animation.bind(player);
        }
    }

    /// Upload the logo plane. Failures only cost the backdrop.
    pub fn attach_logo(&mut self, result: anyhow::Result<ModelCpu>) {
        let cpu = match result {
            Ok(cpu) => cpu,
            Err(e) => {
                log::warn!("[logo] not shown: {:#}", e);
                return;
            }
        };
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        let matrices = cpu.part_matrices(&cpu.pose(None));
        if let Some((mut old, _)) = self.backdrop.replace((gpu.upload_model(&cpu), matrices)) {
            old.release();
        }
        log::info!("[logo] attached");
    }

    /// Toggle the open/close playback; no-op while one is running.
    pub fn toggle_animation(&mut self) {
        if !self.animation.trigger() {
            log::debug!("[anim] trigger ignored in {:?}", self.animation.state());
        }
    }

    /// Click at canvas pixel `at`: open/close when the ray hits the model.
    pub fn click(&mut self, at: Vec2) {
        if !self.config.click_to_open || self.animation.is_playing() {
            return;
        }
        let Some(model) = self.slot.current() else {
            return;
        };
        let (eye, target) = self.camera.eye_target(self.drift.position3());
        let (ro, rd) = camera::screen_to_world_ray(
            at.x,
            at.y,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
            eye,
            target,
            &self.projection,
        );
        let world = model.part_world(
            self.root_matrix() * model.normalization.matrix(),
            self.animation.clip_time(),
        );
        if raycast_model(&model.cpu, &world, ro, rd).is_some() {
            self.toggle_animation();
        }
    }

    pub fn apply_control(&mut self, control: Control, raw: &str) {
        if let Err(e) = self.params.apply(control, raw) {
            log::warn!("[ui] {}", e);
            return;
        }
        match control {
            Control::CameraDistance => self.camera.set_distance(self.params.camera_distance),
            Control::CameraHeight => self.camera.set_height(self.params.camera_height),
            Control::AnimationSpeed => self.animation.set_speed(self.params.animation_speed),
            _ => {}
        }
    }

    pub fn on_resize(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        let aspect = dom::viewport_aspect();
        self.projection.aspect = aspect;
        self.drift.resize(aspect);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(viewer: Rc<RefCell<Viewer>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        viewer.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
