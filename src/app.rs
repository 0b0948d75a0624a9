//! Handler winit qui pilote le [`Controller`].
//!
//! ## Cycle de vie
//!
//! winit 0.30 impose que les fenêtres soient créées dans `resumed()`. C'est
//! donc là que le contrôleur passe `Uninitialized → Constructed → Running` :
//!
//! ```text
//! resumed()  ──construct()──▶ Constructed ──start()──▶ Running
//!                 │
//!                 └─ échec ──▶ failure = Some(err), event_loop.exit()
//! ```
//!
//! ## Fermeture
//!
//! ```text
//! WindowEvent::CloseRequested
//!     └─ controller.close_requested() → handler de fermeture (une fois)
//!           └─ Waker::request_exit() → UiEvent::ExitRequested
//!                 └─ user_event() → controller.terminate() → event_loop.exit()
//! ```

use tracing::{debug, error};
use webrender_api::units::DevicePoint;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

use crate::config::EngineConfig;
use crate::error::LaunchError;
use crate::input;
use crate::lifecycle::{Controller, LaunchSettings, Phase};
use crate::platform::ServoPlatform;
use crate::servo_glue::{UiEvent, Waker};
use crate::surface::WebSurface;
use crate::window::ServoWindow;

pub type ServoController = Controller<ServoWindow, WebSurface>;

pub struct App {
    controller: ServoController,
    engine: EngineConfig,
    waker: Waker,
    /// Erreur de construction, rendue par [`App::into_failure`] après la boucle.
    failure: Option<LaunchError>,
    cursor: DevicePoint,
}

impl App {
    pub fn new(
        event_loop: &EventLoop<UiEvent>,
        settings: LaunchSettings,
        engine: EngineConfig,
    ) -> Self {
        Self {
            controller: Controller::new(settings),
            engine,
            waker: Waker::new(event_loop),
            failure: None,
            cursor: DevicePoint::zero(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// Erreur de construction éventuelle, une fois `run_app()` revenu.
    pub fn into_failure(self) -> Option<LaunchError> {
        self.failure
    }

    fn spin(&self) {
        if let Some(surface) = self.controller.surface() {
            surface.spin();
        }
    }

    fn forward(&self, event: servo::InputEvent) {
        if let Some(surface) = self.controller.surface() {
            surface.notify_input(event);
        }
    }
}

impl ApplicationHandler<UiEvent> for App {
    /// Appelé par winit quand l'application peut créer des fenêtres. Peut être
    /// rappelé (Android, iOS) : seul le premier appel construit.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.phase() != Phase::Uninitialized {
            return;
        }

        let platform = ServoPlatform::new(event_loop, self.waker.clone(), &self.engine);
        if let Err(e) = self.controller.construct(&platform) {
            error!(error = %e, "Démarrage impossible, la fenêtre ne sera pas affichée");
            self.failure = Some(e);
            event_loop.exit();
            return;
        }

        let waker = self.waker.clone();
        self.controller.start(Box::new(move || waker.request_exit()));
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UiEvent) {
        match event {
            UiEvent::Wake => self.spin(),
            UiEvent::ExitRequested => {
                if self.controller.terminate() {
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        // Toujours faire tourner la boucle Servo en premier.
        self.spin();

        let Some(window) = self.controller.window() else {
            return;
        };
        if window.id() != window_id {
            debug!(?window_id, "Événement pour une fenêtre inconnue");
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.controller.close_requested(),

            WindowEvent::RedrawRequested => {
                if let Some(surface) = self.controller.surface() {
                    surface.paint();
                    window.present();
                }
            }

            WindowEvent::Resized(new_size) => {
                // Contexte GL puis webview, pour que la page remplisse la zone client.
                if self.controller.resized(new_size.width, new_size.height)
                    && let Some(window) = self.controller.window()
                {
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = input::device_point(position);
                self.forward(input::mouse_move(self.cursor));
            }

            WindowEvent::CursorLeft { .. } => self.forward(input::mouse_left()),

            WindowEvent::MouseInput { state, button, .. } => {
                self.forward(input::mouse_button(state, button, self.cursor));
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(input::wheel(delta, self.cursor));
            }

            _ => (),
        }
    }
}
