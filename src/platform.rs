//! Fabrique winit + Servo de la paire fenêtre/surface.
//!
//! winit 0.30 n'autorise la création de fenêtres que depuis un
//! `ActiveEventLoop`, c'est-à-dire à l'intérieur de `resumed()`. Une
//! [`ServoPlatform`] ne vit donc que le temps de cet appel.

use servo::ServoBuilder;
use tracing::debug;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::window::Window;

use crate::config::EngineConfig;
use crate::error::LaunchError;
use crate::lifecycle::{Platform, WindowSize};
use crate::preferences;
use crate::rendering;
use crate::resources;
use crate::servo_glue::Waker;
use crate::surface::WebSurface;
use crate::window::ServoWindow;

pub struct ServoPlatform<'a> {
    event_loop: &'a ActiveEventLoop,
    waker: Waker,
    engine: &'a EngineConfig,
}

impl<'a> ServoPlatform<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, waker: Waker, engine: &'a EngineConfig) -> Self {
        Self {
            event_loop,
            waker,
            engine,
        }
    }
}

impl Platform for ServoPlatform<'_> {
    type Surface = WebSurface;
    type Window = ServoWindow;

    fn create_window(&self, title: &str, size: WindowSize) -> Result<ServoWindow, LaunchError> {
        let display_handle = self
            .event_loop
            .display_handle()
            .map_err(|e| LaunchError::PlatformInit(format!("no display handle: {e}")))?;

        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(size.width(), size.height()))
            .with_visible(false);

        let window = self
            .event_loop
            .create_window(window_attributes)
            .map_err(|e| LaunchError::PlatformInit(format!("cannot create window: {e}")))?;

        let rendering_context = {
            let window_handle = window
                .window_handle()
                .map_err(|e| LaunchError::PlatformInit(format!("no window handle: {e}")))?;
            rendering::create_rendering_context(display_handle, window_handle, window.inner_size())?
        };

        debug!(%size, scale = window.scale_factor(), "Fenêtre winit créée");
        Ok(ServoWindow::new(window, rendering_context, title.to_string()))
    }

    fn create_surface(&self) -> Result<WebSurface, LaunchError> {
        resources::init(self.engine.resources_path.as_deref())?;

        // Servo utilise rustls : le provider doit être installé avant toute
        // opération TLS. Déjà installé = rien à faire.
        if rustls::crypto::aws_lc_rs::default_provider()
            .install_default()
            .is_err()
        {
            debug!("Provider crypto rustls déjà installé");
        }

        let servo = ServoBuilder::default()
            .preferences(preferences::build_servo_preferences(self.engine))
            .event_loop_waker(Box::new(self.waker.clone()))
            .build();

        debug!("Instance Servo construite");
        Ok(WebSurface::new(servo))
    }
}
