//! Erreurs de démarrage.
//!
//! Seule la construction de la fenêtre et du moteur peut échouer. Ces erreurs
//! sont fatales : elles remontent jusqu'à `main` qui les convertit en code de
//! sortie non nul. Les erreurs de chargement de page (DNS, TLS, HTTP) ne
//! passent jamais par ici, le moteur les affiche lui-même dans la page.

use std::process::ExitCode;

/// Échec pendant la transition `Uninitialized → Constructed`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    /// Le sous-système de fenêtrage est indisponible (pas de serveur
    /// d'affichage, pas de contexte GL, boucle d'événements en échec).
    #[error("windowing subsystem unavailable: {0}")]
    PlatformInit(String),

    /// Le moteur web n'a pas pu démarrer (ressources manquantes, etc.).
    #[error("browser engine unavailable: {0}")]
    EngineInit(String),
}

impl LaunchError {
    /// Code de sortie du processus associé à cette erreur. Jamais 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PlatformInit(_) => 2,
            Self::EngineInit(_) => 3,
        }
    }
}

impl From<LaunchError> for ExitCode {
    fn from(error: LaunchError) -> Self {
        ExitCode::from(error.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_non_zero_and_distinct() {
        let platform = LaunchError::PlatformInit("no display".into());
        let engine = LaunchError::EngineInit("no resources".into());
        assert_ne!(platform.exit_code(), 0);
        assert_ne!(engine.exit_code(), 0);
        assert_ne!(platform.exit_code(), engine.exit_code());
    }

    #[test]
    fn test_display_names_the_subsystem() {
        let err = LaunchError::PlatformInit("no display".into());
        assert_eq!(err.to_string(), "windowing subsystem unavailable: no display");

        let err = LaunchError::EngineInit("resources/ not found".into());
        assert_eq!(err.to_string(), "browser engine unavailable: resources/ not found");
    }

    #[test]
    fn test_process_exit_code_matches_error() {
        for err in [
            LaunchError::PlatformInit("no display".into()),
            LaunchError::EngineInit("no resources".into()),
        ] {
            let expected = format!("{:?}", ExitCode::from(err.exit_code()));
            let code = ExitCode::from(err);
            assert_eq!(format!("{code:?}"), expected);
            assert_ne!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
        }
    }
}
