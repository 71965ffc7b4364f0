//! Application shell.
//!
//! [`HatApp`] wires the winit event loop to the core: pointer input drives
//! the orbit camera, keyboard edits go through `validate` → `generate` →
//! `set_mesh` before the next frame renders, and every accepted edit is
//! persisted through the configured [`ConfigStore`].
//!
//! Keys: `1`–`5` pick the archetype, up/down adjust crown height,
//! left/right adjust brim size, `C` cycles color presets, `R` resets,
//! `E` exports a PNG snapshot.

pub mod input;

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use self::input::Input;
use crate::camera::OrbitCamera;
use crate::config::{COLOR_PRESETS, HatConfig, RawHatConfig, validate};
use crate::errors::Result;
use crate::geometry;
use crate::renderer::{Renderer, RendererSettings};
use crate::store::ConfigStore;
use crate::utils::Timer;

/// Parameter change per arrow-key press.
const PARAM_STEP: f32 = 0.1;

/// Single-threaded tick source for the frame loop, with explicit state
/// instead of a nullable callback handle. Pausing stops redraw requests;
/// resuming restarts exactly one loop (requests coalesce in winit).
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
}

impl FrameScheduler {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

pub struct HatApp {
    window: Option<Arc<Window>>,
    renderer: Renderer,
    camera: OrbitCamera,
    config: HatConfig,
    store: Option<Box<dyn ConfigStore>>,
    timer: Timer,
    scheduler: FrameScheduler,
    input: Input,
    color_index: usize,
}

impl HatApp {
    #[must_use]
    pub fn new(config: HatConfig) -> Self {
        Self {
            window: None,
            renderer: Renderer::new(RendererSettings::default()),
            camera: OrbitCamera::new(),
            config,
            store: None,
            timer: Timer::new(),
            scheduler: FrameScheduler::default(),
            input: Input::new(),
            color_index: 0,
        }
    }

    /// Persist accepted edits through this store.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    /// Validates an edit, regenerates the mesh, and uploads it. Completes
    /// fully before the next frame renders; if regeneration or upload
    /// fails the previous mesh stays on screen and the edit is discarded.
    fn apply_config(&mut self, raw: &RawHatConfig) {
        let next = validate(raw);
        let mesh = geometry::generate(next.hat_type, next.crown_height, next.brim_size);
        match self.renderer.set_mesh(&mesh, next.rgb()) {
            Ok(()) => {
                if next != self.config {
                    log::info!(
                        "hat: {} crown {:.2} brim {:.2} color {}",
                        next.hat_type.params().label,
                        next.crown_height,
                        next.brim_size,
                        next.color
                    );
                }
                self.config = next;
                if let Some(window) = &self.window {
                    window.set_title(&format!(
                        "Hat Customizer - {}",
                        self.config.hat_type.params().label
                    ));
                }
                if let Some(store) = &self.store
                    && let Err(e) = store.save(&self.config)
                {
                    log::warn!("failed to persist configuration: {e}");
                }
            }
            Err(e) => log::warn!("keeping previous hat: {e}"),
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut RawHatConfig)) {
        let mut raw = RawHatConfig::from(&self.config);
        f(&mut raw);
        self.apply_config(&raw);
    }

    fn handle_key(&mut self, key: &Key) {
        match key.as_ref() {
            Key::Character("1") => self.edit(|raw| raw.hat_type = Some("fedora".into())),
            Key::Character("2") => self.edit(|raw| raw.hat_type = Some("bowler".into())),
            Key::Character("3") => self.edit(|raw| raw.hat_type = Some("baseball".into())),
            Key::Character("4") => self.edit(|raw| raw.hat_type = Some("beanie".into())),
            Key::Character("5") => self.edit(|raw| raw.hat_type = Some("tophat".into())),
            Key::Named(NamedKey::ArrowUp) => {
                let crown = self.config.crown_height + PARAM_STEP;
                self.edit(|raw| raw.crown_height = Some(crown));
            }
            Key::Named(NamedKey::ArrowDown) => {
                let crown = self.config.crown_height - PARAM_STEP;
                self.edit(|raw| raw.crown_height = Some(crown));
            }
            Key::Named(NamedKey::ArrowRight) => {
                let brim = self.config.brim_size + PARAM_STEP;
                self.edit(|raw| raw.brim_size = Some(brim));
            }
            Key::Named(NamedKey::ArrowLeft) => {
                let brim = self.config.brim_size - PARAM_STEP;
                self.edit(|raw| raw.brim_size = Some(brim));
            }
            Key::Character("c") | Key::Character("C") => {
                self.color_index = (self.color_index + 1) % COLOR_PRESETS.len();
                let color = COLOR_PRESETS[self.color_index].to_string();
                self.edit(|raw| raw.color = Some(color));
            }
            Key::Character("r") | Key::Character("R") => {
                self.camera = OrbitCamera::new();
                let raw = RawHatConfig::from(&HatConfig::default());
                self.apply_config(&raw);
            }
            Key::Character("e") | Key::Character("E") => self.export_snapshot(),
            _ => {}
        }
    }

    fn export_snapshot(&mut self) {
        match self.renderer.snapshot(&self.camera) {
            Ok(image) => {
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map_or(0, |d| d.as_secs());
                let path = format!("hat-{stamp}.png");
                match image.save(&path) {
                    Ok(()) => log::info!("exported snapshot to {path}"),
                    Err(e) => log::error!("failed to write snapshot: {e}"),
                }
            }
            Err(e) => log::error!("snapshot failed: {e}"),
        }
    }
}

impl ApplicationHandler for HatApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Hat Customizer")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("initializing renderer backend");
        if let Err(e) = pollster::block_on(self.renderer.init(window)) {
            // Unrecoverable startup error: no context or no valid program.
            log::error!("fatal renderer error: {e}");
            event_loop.exit();
            return;
        }

        // First hat must be uploaded before the first frame renders.
        let raw = RawHatConfig::from(&self.config);
        self.apply_config(&raw);
        self.scheduler.start();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.scheduler.stop();
                self.renderer.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if !self.scheduler.is_running() {
                    return;
                }
                self.timer.tick();
                self.camera.tick(self.timer.dt_seconds());
                if let Err(e) = self
                    .renderer
                    .render_frame(&self.camera, self.timer.elapsed_seconds())
                {
                    log::warn!("frame error: {e}");
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let cursor = self.input.handle_cursor_move(position.x, position.y);
                self.camera.drag_move(cursor.x, cursor.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            let cursor = self.input.cursor_position;
                            self.camera.drag_start(cursor.x, cursor.y);
                        }
                        ElementState::Released => self.camera.drag_end(),
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.camera.zoom(Input::wheel_lines(delta));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.handle_key(&event.logical_key);
                }
            }
            WindowEvent::Occluded(occluded) => {
                // Mirror of the browser visibility pause: stop issuing
                // frames while hidden, restart exactly one loop when shown.
                if occluded {
                    log::debug!("window occluded; pausing frame loop");
                    self.scheduler.stop();
                } else if self.renderer.is_ready() {
                    log::debug!("window visible; resuming frame loop");
                    self.timer.tick();
                    self.scheduler.start();
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.scheduler.is_running()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
