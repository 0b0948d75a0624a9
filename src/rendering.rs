//! Factory pour le contexte de rendu GPU.
//!
//! Isole la création du `WindowRenderingContext` (surfman/OpenGL) du reste de
//! l'application. Le contexte appartient à la fenêtre : Servo y peint
//! directement la webview, sans FBO intermédiaire.

use std::rc::Rc;

use servo::{RenderingContext, WindowRenderingContext};
use winit::dpi::PhysicalSize;
use winit::raw_window_handle::{DisplayHandle, WindowHandle};

use crate::error::LaunchError;

/// Crée un contexte de rendu lié à la fenêtre winit et le rend courant.
///
/// Un échec ici (pas de driver GL compatible, handles invalides) est traité
/// comme une indisponibilité du sous-système de fenêtrage.
pub fn create_rendering_context(
    display_handle: DisplayHandle<'_>,
    window_handle: WindowHandle<'_>,
    size: PhysicalSize<u32>,
) -> Result<Rc<WindowRenderingContext>, LaunchError> {
    let rendering_context = WindowRenderingContext::new(display_handle, window_handle, size)
        .map_err(|e| {
            LaunchError::PlatformInit(format!("cannot create GL rendering context: {e:?}"))
        })?;

    rendering_context.make_current().map_err(|e| {
        LaunchError::PlatformInit(format!("cannot make GL context current: {e:?}"))
    })?;

    Ok(Rc::new(rendering_context))
}
