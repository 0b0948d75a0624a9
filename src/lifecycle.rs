//! Cycle de vie fenêtre + surface, indépendant du backend de fenêtrage.
//!
//! ```text
//! Uninitialized ──construct()──▶ Constructed ──start()──▶ Running ──terminate()──▶ Terminated
//!       │                                                                              ▲
//!       └──────────────────────── échec de construction ──────────────────────────────┘
//! ```
//!
//! Le [`Controller`] ne parle au backend qu'à travers trois traits étroits :
//! [`Platform`] construit les pièces, [`NativeWindow`] et [`ContentSurface`]
//! les pilotent. Les implémentations winit/Servo sont dans [`crate::window`],
//! [`crate::surface`] et [`crate::platform`] ; les tests utilisent une
//! implémentation en mémoire.
//!
//! Tout ici tourne sur le thread UI. Le handler de fermeture ne touche jamais
//! le contrôleur : il envoie une demande de sortie à la boucle d'événements,
//! qui appelle [`Controller::terminate`] au dispatch suivant.

use std::fmt;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::LaunchError;

// ─────────────────────────────────────────────────────────────────────────────
// Types valeur
// ─────────────────────────────────────────────────────────────────────────────

/// Taille en pixels, les deux côtés non nuls.
///
/// Logique pour la taille demandée à la création, physique pour les
/// redimensionnements rapportés par l'OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    width: u32,
    height: u32,
}

impl WindowSize {
    /// `None` si l'un des côtés est nul.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Ce que le contrôleur construit, fixé pour tout le run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub title: String,
    pub size: WindowSize,
    pub url: Url,
}

/// État du contrôleur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Constructed,
    Running,
    Terminated,
}

// ─────────────────────────────────────────────────────────────────────────────
// Enregistrement du handler de fermeture
// ─────────────────────────────────────────────────────────────────────────────

/// Appelé quand l'utilisateur ou l'OS demande la fermeture de la fenêtre.
pub type CloseCallback = Box<dyn FnOnce()>;

/// Garde le handler de fermeture de la fenêtre et garantit qu'il ne s'exécute
/// qu'une fois.
#[derive(Default)]
pub struct CloseSlot {
    callback: Option<CloseCallback>,
    fired: bool,
}

impl CloseSlot {
    /// Enregistre le handler, en remplaçant un précédent pas encore exécuté.
    pub fn register(&mut self, callback: CloseCallback) {
        if self.fired {
            warn!("Handler de fermeture enregistré après la fermeture, ignoré");
            return;
        }
        if self.callback.replace(callback).is_some() {
            warn!("Handler de fermeture remplacé");
        }
    }

    /// Exécute le handler s'il est armé. Ne renvoie `true` que pour l'appel
    /// qui l'a réellement exécuté.
    pub fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(callback) => {
                self.fired = true;
                callback();
                true
            }
            None => {
                debug!(already_fired = self.fired, "Demande de fermeture sans handler armé");
                false
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for CloseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseSlot")
            .field("armed", &self.is_armed())
            .field("fired", &self.fired)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Contrats du backend
// ─────────────────────────────────────────────────────────────────────────────

/// Fenêtre native de premier niveau. Thread UI uniquement.
pub trait NativeWindow {
    /// Le type de surface que cette fenêtre peut héberger.
    type Content: ContentSurface;

    /// Fait de `content` l'unique enfant de la fenêtre, sur toute la zone client.
    fn set_content(&mut self, content: &mut Self::Content);

    /// Enregistre le handler de fermeture. Il s'exécute au plus une fois.
    fn on_close(&mut self, callback: CloseCallback);

    /// Rend la fenêtre visible. Idempotent.
    fn show(&mut self);

    fn is_visible(&self) -> bool;

    fn client_size(&self) -> WindowSize;

    /// Adapte la surface de dessin de la zone client à la nouvelle taille
    /// physique.
    fn resize(&mut self, size: WindowSize);

    /// Transmet une demande de fermeture native au handler enregistré.
    fn close_requested(&mut self);
}

/// Surface web embarquée.
pub trait ContentSurface {
    /// Lance la navigation vers `url` et rend la main immédiatement. Les
    /// erreurs de chargement sont affichées par le moteur, jamais remontées.
    fn load(&mut self, url: &Url);

    /// La dernière URL passée à [`ContentSurface::load`].
    fn target_url(&self) -> Option<&Url>;

    /// Nouvelle taille physique de la zone client que la surface remplit.
    fn resize(&mut self, size: WindowSize);
}

/// Fabrique de la paire fenêtre/surface.
pub trait Platform {
    type Surface: ContentSurface;
    type Window: NativeWindow<Content = Self::Surface>;

    fn create_window(&self, title: &str, size: WindowSize) -> Result<Self::Window, LaunchError>;

    fn create_surface(&self) -> Result<Self::Surface, LaunchError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Contrôleur
// ─────────────────────────────────────────────────────────────────────────────

/// Possède l'unique fenêtre et l'unique surface du processus.
pub struct Controller<W, S>
where
    W: NativeWindow<Content = S>,
    S: ContentSurface,
{
    settings: LaunchSettings,
    phase: Phase,
    // Les champs sont détruits dans l'ordre de déclaration : la surface avant
    // sa fenêtre.
    surface: Option<S>,
    window: Option<W>,
}

impl<W, S> Controller<W, S>
where
    W: NativeWindow<Content = S>,
    S: ContentSurface,
{
    pub fn new(settings: LaunchSettings) -> Self {
        Self {
            settings,
            phase: Phase::Uninitialized,
            surface: None,
            window: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &LaunchSettings {
        &self.settings
    }

    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// `Uninitialized → Constructed` : fenêtre, surface, attachement,
    /// chargement initial.
    ///
    /// En cas d'échec le contrôleur passe directement à `Terminated` et
    /// l'erreur est renvoyée ; rien n'est affiché. Les appels suivants ne font
    /// rien.
    pub fn construct<P>(&mut self, platform: &P) -> Result<(), LaunchError>
    where
        P: Platform<Window = W, Surface = S>,
    {
        if self.phase != Phase::Uninitialized {
            debug!(phase = ?self.phase, "construct() ignoré, déjà construit");
            return Ok(());
        }

        match Self::build(platform, &self.settings) {
            Ok((window, surface)) => {
                self.window = Some(window);
                self.surface = Some(surface);
                self.phase = Phase::Constructed;
                info!(
                    size = %self.settings.size,
                    url = %self.settings.url,
                    "Fenêtre et surface construites"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Échec de la construction");
                self.phase = Phase::Terminated;
                Err(e)
            }
        }
    }

    fn build<P>(platform: &P, settings: &LaunchSettings) -> Result<(W, S), LaunchError>
    where
        P: Platform<Window = W, Surface = S>,
    {
        let mut window = platform.create_window(&settings.title, settings.size)?;
        let mut surface = platform.create_surface()?;
        window.set_content(&mut surface);
        surface.load(&settings.url);
        Ok((window, surface))
    }

    /// `Constructed → Running` : enregistre `on_close` et affiche la fenêtre.
    ///
    /// Renvoie `false` (sans rien faire) depuis toute autre phase : la boucle
    /// ne peut jamais être lancée deux fois.
    pub fn start(&mut self, on_close: CloseCallback) -> bool {
        if self.phase != Phase::Constructed {
            warn!(phase = ?self.phase, "start() refusé");
            return false;
        }
        let Some(window) = self.window.as_mut() else {
            return false;
        };

        window.on_close(on_close);
        window.show();
        self.phase = Phase::Running;
        info!("Fenêtre affichée, boucle d'événements en cours");
        true
    }

    /// Propage un redimensionnement de l'OS à la fenêtre puis à la surface,
    /// pour que la surface continue de remplir la zone client.
    ///
    /// Une taille nulle (fenêtre minimisée) est ignorée. Renvoie `true` si le
    /// redimensionnement a été appliqué.
    pub fn resized(&mut self, width: u32, height: u32) -> bool {
        let Some(size) = WindowSize::new(width, height) else {
            debug!(width, height, "Taille nulle ignorée");
            return false;
        };
        let (Some(window), Some(surface)) = (self.window.as_mut(), self.surface.as_mut()) else {
            return false;
        };

        window.resize(size);
        surface.resize(size);
        debug!(%size, "Zone client redimensionnée");
        true
    }

    /// Transmet une demande de fermeture native au handler de la fenêtre.
    pub fn close_requested(&mut self) {
        match self.window.as_mut() {
            Some(window) => window.close_requested(),
            None => debug!("Demande de fermeture sans fenêtre"),
        }
    }

    /// `Running → Terminated`. Ne renvoie `true` que pour la transition
    /// elle-même ; l'appelant arrête alors la boucle d'événements.
    pub fn terminate(&mut self) -> bool {
        if self.phase != Phase::Running {
            debug!(phase = ?self.phase, "terminate() ignoré");
            return false;
        }
        self.phase = Phase::Terminated;
        info!("Sortie demandée, fin de la boucle d'événements");
        true
    }
}
