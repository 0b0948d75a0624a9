//! Couche d'intégration entre Servo, winit et le contrôleur.
//!
//! 1. **[`UiEvent`] / [`Waker`]** : les deux seuls messages qui arrivent dans la
//!    boucle winit depuis l'extérieur. `Wake` vient des threads internes de
//!    Servo ; `ExitRequested` vient du handler de fermeture de la fenêtre.
//!
//! 2. **[`SurfaceDelegate`]** : callbacks Servo par webview (nouveau frame,
//!    URL, titre). Il ne garde qu'une référence faible vers la fenêtre.

use std::rc::Weak;

use servo::{WebView, WebViewDelegate};
use tracing::{debug, warn};
use url::Url;
use winit::event_loop::{EventLoop, EventLoopProxy};
use winit::window::Window;

// ─────────────────────────────────────────────────────────────────────────────
// Waker : pont Servo → Winit, et demande de sortie
// ─────────────────────────────────────────────────────────────────────────────

/// Événement utilisateur de la boucle winit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Un thread Servo a du travail pour le thread UI : `spin_event_loop()`.
    Wake,
    /// La fenêtre a été fermée : la boucle doit se terminer.
    ExitRequested,
}

/// Émetteur `Send + Sync` vers la boucle d'événements du thread UI.
///
/// `Waker` est `Clone + Send + Sync` car `EventLoopProxy` l'est, ce qui est
/// requis par le trait `EventLoopWaker: 'static + Send + Sync`.
#[derive(Clone)]
pub struct Waker(EventLoopProxy<UiEvent>);

impl Waker {
    pub fn new(event_loop: &EventLoop<UiEvent>) -> Self {
        Self(event_loop.create_proxy())
    }

    /// Demande la fin de la boucle. Si elle est déjà fermée, rien ne se passe.
    pub fn request_exit(&self) {
        if self.0.send_event(UiEvent::ExitRequested).is_err() {
            debug!("Boucle d'événements déjà fermée, demande de sortie ignorée");
        }
    }
}

impl embedder_traits::EventLoopWaker for Waker {
    fn clone_box(&self) -> Box<dyn embedder_traits::EventLoopWaker> {
        Box::new(Self(self.0.clone()))
    }

    fn wake(&self) {
        if let Err(error) = self.0.send_event(UiEvent::Wake) {
            warn!(?error, "Échec du réveil de la boucle d'événements Winit");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WebViewDelegate
// ─────────────────────────────────────────────────────────────────────────────

/// Delegate de l'unique webview.
///
/// La référence vers la fenêtre est faible : la surface ne prolonge jamais la
/// vie de sa fenêtre parente.
pub struct SurfaceDelegate {
    window: Weak<Window>,
    app_title: String,
}

impl SurfaceDelegate {
    pub fn new(window: Weak<Window>, app_title: String) -> Self {
        Self { window, app_title }
    }
}

impl WebViewDelegate for SurfaceDelegate {
    /// Servo a composité un frame : on demande un redraw à winit, qui
    /// déclenchera `RedrawRequested` → `paint()` + `present()`.
    fn notify_new_frame_ready(&self, _webview: WebView) {
        if let Some(window) = self.window.upgrade() {
            window.request_redraw();
        }
    }

    fn notify_url_changed(&self, _webview: WebView, url: Url) {
        debug!(%url, "URL de la page modifiée");
    }

    fn notify_page_title_changed(&self, _webview: WebView, title: Option<String>) {
        if let Some(window) = self.window.upgrade() {
            window.set_title(&window_title(&self.app_title, title.as_deref()));
        }
    }
}

/// Titre de fenêtre : `"<page> — <app>"`, ou juste `<app>` sans titre de page.
pub fn window_title(app_title: &str, page_title: Option<&str>) -> String {
    match page_title.map(str::trim) {
        Some(page) if !page.is_empty() => format!("{page} — {app_title}"),
        _ => app_title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title_with_page_title() {
        assert_eq!(
            window_title("webpane", Some("Example Domain")),
            "Example Domain — webpane"
        );
    }

    #[test]
    fn test_window_title_without_page_title() {
        assert_eq!(window_title("webpane", None), "webpane");
        assert_eq!(window_title("webpane", Some("   ")), "webpane");
    }
}
