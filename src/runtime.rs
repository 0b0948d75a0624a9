//! Runtime UI du processus : l'unique boucle d'événements winit.
//!
//! Initialisé une fois au démarrage, détruit à la sortie. winit refuse
//! lui-même de créer une seconde boucle dans le même processus.

use std::fmt;

use tracing::{info, warn};
use winit::event_loop::EventLoop;

use crate::app::App;
use crate::config::EngineConfig;
use crate::error::LaunchError;
use crate::lifecycle::LaunchSettings;
use crate::servo_glue::UiEvent;

pub struct UiRuntime {
    event_loop: EventLoop<UiEvent>,
}

impl UiRuntime {
    /// Crée la boucle d'événements. Échoue sans serveur d'affichage.
    pub fn init() -> Result<Self, LaunchError> {
        let event_loop = EventLoop::with_user_event()
            .build()
            .map_err(|e| LaunchError::PlatformInit(format!("cannot create event loop: {e}")))?;
        Ok(Self { event_loop })
    }

    /// Construit la fenêtre et la surface, puis bloque jusqu'à la fermeture.
    pub fn run(self, settings: LaunchSettings, engine: EngineConfig) -> Result<(), LaunchError> {
        let mut app = App::new(&self.event_loop, settings, engine);

        let outcome = self.event_loop.run_app(&mut app);

        info!(phase = ?app.phase(), "Boucle d'événements terminée");
        settle(outcome, app.into_failure())
    }
}

/// Résultat final du run. Une erreur de construction enregistrée l'emporte
/// sur une erreur de la boucle, qui n'en est souvent que la conséquence.
fn settle<E: fmt::Display>(
    outcome: Result<(), E>,
    failure: Option<LaunchError>,
) -> Result<(), LaunchError> {
    match (outcome, failure) {
        (Err(e), Some(failure)) => {
            warn!(error = %e, "Erreur de la boucle d'événements après un échec de construction");
            Err(failure)
        }
        (Ok(()), Some(failure)) => Err(failure),
        (Err(e), None) => Err(LaunchError::PlatformInit(format!("event loop failed: {e}"))),
        (Ok(()), None) => Ok(()),
    }
}

/// Point d'entrée de la bibliothèque : runtime, construction, boucle.
pub fn launch(settings: LaunchSettings, engine: EngineConfig) -> Result<(), LaunchError> {
    UiRuntime::init()?.run(settings, engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_exit_is_success() {
        assert_eq!(settle::<String>(Ok(()), None), Ok(()));
    }

    #[test]
    fn test_construction_failure_is_reported() {
        let failure = LaunchError::EngineInit("resources/ not found".into());
        let err = settle::<String>(Ok(()), Some(failure.clone())).unwrap_err();
        assert_eq!(err, failure);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_loop_error_keeps_construction_failure() {
        let failure = LaunchError::EngineInit("resources/ not found".into());
        let err = settle(Err("exit failed".to_string()), Some(failure.clone())).unwrap_err();
        assert_eq!(err, failure);
    }

    #[test]
    fn test_loop_error_alone_is_platform_failure() {
        let err = settle(Err("exit failed".to_string()), None).unwrap_err();
        assert_eq!(err, LaunchError::PlatformInit("event loop failed: exit failed".into()));
        assert_eq!(err.exit_code(), 2);
    }
}
