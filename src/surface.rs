//! Surface de contenu web adossée à Servo, implémentation de [`ContentSurface`].
//!
//! La surface possède l'instance Servo et, une fois attachée à sa fenêtre,
//! l'unique `WebView`. Un `load()` reçu avant l'attachement est mis en
//! attente ([`Navigation`]) et devient l'URL initiale de la webview.

use std::rc::{Rc, Weak};

use euclid::Scale;
use servo::{InputEvent, RenderingContext, Servo, WebView, WebViewBuilder, WindowRenderingContext};
use tracing::{debug, info, warn};
use url::Url;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::lifecycle::{ContentSurface, WindowSize};
use crate::servo_glue::SurfaceDelegate;

// ─────────────────────────────────────────────────────────────────────────────
// Navigation en attente
// ─────────────────────────────────────────────────────────────────────────────

/// Cible de navigation de la surface, et URL en attente tant que la webview
/// n'existe pas.
#[derive(Debug, Default)]
pub struct Navigation {
    target: Option<Url>,
    pending: Option<Url>,
    attached: bool,
}

impl Navigation {
    /// Enregistre `url` comme cible. Renvoie l'URL à transmettre tout de suite
    /// à la webview, ou `None` si elle reste en attente de l'attachement. Une
    /// nouvelle demande avant l'attachement remplace la précédente.
    pub fn request(&mut self, url: &Url) -> Option<Url> {
        self.target = Some(url.clone());
        if self.attached {
            Some(url.clone())
        } else {
            self.pending = Some(url.clone());
            None
        }
    }

    /// Marque la webview comme créée et rend l'URL en attente, une seule fois.
    pub fn attach(&mut self) -> Option<Url> {
        self.attached = true;
        self.pending.take()
    }

    pub fn target(&self) -> Option<&Url> {
        self.target.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Surface Servo
// ─────────────────────────────────────────────────────────────────────────────

pub struct WebSurface {
    // La webview est déclarée avant Servo : elle est détruite en premier.
    webview: Option<WebView>,
    servo: Servo,
    navigation: Navigation,
}

impl WebSurface {
    pub(crate) fn new(servo: Servo) -> Self {
        Self {
            webview: None,
            servo,
            navigation: Navigation::default(),
        }
    }

    /// Construit la webview sur le contexte de rendu de la fenêtre.
    /// Appelé une seule fois, par [`crate::window::ServoWindow`].
    pub(crate) fn attach(
        &mut self,
        window: Weak<Window>,
        rendering_context: Rc<WindowRenderingContext>,
        scale_factor: f64,
        app_title: String,
    ) {
        if self.webview.is_some() {
            warn!("Surface déjà attachée, rattachement ignoré");
            return;
        }

        let delegate = Rc::new(SurfaceDelegate::new(window, app_title));
        let mut builder = WebViewBuilder::new(
            &self.servo,
            rendering_context as Rc<dyn RenderingContext>,
        )
        .hidpi_scale_factor(Scale::new(scale_factor as f32))
        .delegate(delegate);

        if let Some(url) = self.navigation.attach() {
            debug!(%url, "Navigation en attente transmise à la webview");
            builder = builder.url(url);
        }

        self.webview = Some(builder.build());
        info!("Webview attachée à la fenêtre");
    }

    pub fn is_attached(&self) -> bool {
        self.webview.is_some()
    }

    /// Laisse Servo traiter ses messages internes.
    pub fn spin(&self) {
        self.servo.spin_event_loop();
    }

    /// Peint le dernier frame composité dans le contexte de la fenêtre.
    pub fn paint(&self) {
        if let Some(webview) = &self.webview {
            webview.paint();
        }
    }

    pub fn notify_input(&self, event: InputEvent) {
        if let Some(webview) = &self.webview {
            webview.notify_input_event(event);
        }
    }
}

impl ContentSurface for WebSurface {
    fn load(&mut self, url: &Url) {
        if let Some(url) = self.navigation.request(url) {
            match &self.webview {
                Some(webview) => webview.load(url),
                None => warn!(%url, "Navigation sans webview, ignorée"),
            }
        }
        debug!(%url, attached = self.webview.is_some(), "Navigation demandée");
    }

    fn target_url(&self) -> Option<&Url> {
        self.navigation.target()
    }

    /// La webview remplit toute la zone client : même taille que la fenêtre.
    fn resize(&mut self, size: WindowSize) {
        if let Some(webview) = &self.webview {
            webview.resize(PhysicalSize::new(size.width(), size.height()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_load_before_attach_is_handed_over_once() {
        let mut nav = Navigation::default();

        assert_eq!(nav.request(&url("https://example.com/")), None);
        assert_eq!(nav.target(), Some(&url("https://example.com/")));

        assert_eq!(nav.attach(), Some(url("https://example.com/")));
        assert_eq!(nav.attach(), None);
        assert!(nav.is_attached());
    }

    #[test]
    fn test_load_after_attach_is_forwarded() {
        let mut nav = Navigation::default();
        assert_eq!(nav.attach(), None);

        assert_eq!(
            nav.request(&url("https://example.com/next")),
            Some(url("https://example.com/next"))
        );
        assert_eq!(nav.attach(), None);
    }

    #[test]
    fn test_latest_load_before_attach_wins() {
        let mut nav = Navigation::default();
        nav.request(&url("https://example.com/first"));
        nav.request(&url("https://example.com/second"));

        assert_eq!(nav.target(), Some(&url("https://example.com/second")));
        assert_eq!(nav.attach(), Some(url("https://example.com/second")));
    }

    #[test]
    fn test_no_target_until_first_load() {
        let mut nav = Navigation::default();
        assert_eq!(nav.target(), None);
        assert_eq!(nav.attach(), None);
        assert_eq!(nav.target(), None);
    }
}
