//! Application controller and coordination layer
//!
//! The controller sits between the platform window and the drawing session.
//! It converts view-space input into scene space, feeds the tap recognizer,
//! routes key commands and caches the last rendered frame until the scene
//! or the status line changes.

use tiny_skia::Pixmap;

use crate::app::session::DrawingSession;
use crate::app::state::PathState;
use crate::config::{ConfigError, DrawingConfig};
use crate::domain::core::Size;
use crate::input::{InputEvent, InputKind, KeyCommand, TapRecognizer};
use crate::ui::renderer::{FrameOptions, RendererError, SceneRenderer};
use crate::ui::scene::Scene;

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Renderer(#[from] RendererError),

    #[cfg(windows)]
    #[error("Window error: {0}")]
    Window(#[from] crate::ui::window::WindowError),
}

/// Main application controller
#[derive(Debug)]
pub struct AppController {
    session: DrawingSession,
    scene: Scene,
    recognizer: TapRecognizer,
    renderer: SceneRenderer,
    show_ruler: bool,
    /// Last rendered frame, dropped whenever it goes stale
    frame: Option<Pixmap>,
}

impl AppController {
    /// Creates a controller from a validated configuration
    ///
    /// # Returns
    /// AppController instance or AppError if the configuration is invalid or
    /// the background image or font cannot be loaded
    pub fn new(config: &DrawingConfig) -> Result<Self, AppError> {
        config.validate()?;
        let renderer = SceneRenderer::new(config)?;

        log::info!(
            "Canvas {}x{}, spot radius {}, double tap interval {:?}",
            config.canvas_width,
            config.canvas_height,
            config.spot_radius,
            config.double_tap_interval()
        );

        Ok(Self {
            session: DrawingSession::new(config),
            scene: Scene::new(),
            recognizer: TapRecognizer::new(&config.tap),
            renderer,
            show_ruler: config.ruler.enabled,
            frame: None,
        })
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn path_state(&self) -> PathState {
        self.session.path_state()
    }

    pub fn canvas_size(&self) -> Size {
        self.renderer.size()
    }

    pub fn show_ruler(&self) -> bool {
        self.show_ruler
    }

    /// Handles a raw input event in view coordinates
    ///
    /// # Returns
    /// true if the window needs to be repainted
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let size = self.canvas_size();
        let mut event = event;

        // Bounds are checked in view space, where the client area is [0, H)
        if !size.contains(&event.point) {
            match event.kind {
                // A contact lifted off-canvas must not commit a point
                InputKind::TouchUp => event.kind = InputKind::TouchCancelled,
                InputKind::TouchCancelled => {}
                _ => {
                    log::debug!(
                        "Ignoring {:?} outside the canvas at ({}, {})",
                        event.kind,
                        event.point.x,
                        event.point.y
                    );
                    return false;
                }
            }
        }

        let event = event.in_scene(size.height);
        let before = self.session.path_state();

        self.session.handle_event(&event, &mut self.scene);
        if let Some(tap) = self.recognizer.observe(&event) {
            self.session.handle_event(&tap, &mut self.scene);
        }

        if self.session.path_state() != before {
            self.frame = None;
        }
        self.refresh_dirty()
    }

    /// Handles a keyboard command
    ///
    /// # Returns
    /// false if the application should quit
    pub fn handle_key(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Quit => {
                log::info!("Quit requested");
                return false;
            }
            KeyCommand::ToggleRuler => {
                self.show_ruler = !self.show_ruler;
                log::debug!("Ruler {}", if self.show_ruler { "shown" } else { "hidden" });
                self.frame = None;
            }
            KeyCommand::Clear => {
                if !self.session.clear(&mut self.scene) {
                    log::debug!("Clear ignored while a path is open");
                }
            }
        }
        true
    }

    /// Returns true if the next call to [`Self::frame`] will render
    pub fn needs_redraw(&mut self) -> bool {
        self.refresh_dirty()
    }

    /// Returns the current frame, rendering it if it is stale
    pub fn frame(&mut self) -> Result<&Pixmap, AppError> {
        self.refresh_dirty();

        let pixmap = match self.frame.take() {
            Some(pixmap) => pixmap,
            None => {
                let options = FrameOptions {
                    show_ruler: self.show_ruler,
                    status: Some(self.session.path_state().hint()),
                };
                self.renderer.render(&self.scene, options)?
            }
        };

        Ok(self.frame.insert(pixmap))
    }

    fn refresh_dirty(&mut self) -> bool {
        if self.scene.take_dirty() {
            self.frame = None;
        }
        self.frame.is_none()
    }
}
