//! Lecteur de ressources Servo.
//!
//! Servo a besoin d'un ensemble de fichiers de ressources (préférences,
//! certificats, domaines publics, etc.) pour fonctionner. L'embedder fournit
//! une implémentation de `ResourceReaderMethods` enregistrée via
//! `servo::resources::set()`.
//!
//! Le dossier `resources/` est cherché une seule fois, au démarrage du moteur :
//! 1. Chemin explicite `[engine] resources_path` de la configuration
//! 2. À côté de l'exécutable (`<exe_dir>/resources/`)
//! 3. À la racine du projet si l'exécutable est dans `target/{debug,release}/`
//! 4. Dans le répertoire courant (`./resources/`)
//!
//! S'il est introuvable, le moteur ne peut pas démarrer.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};

use servo::resources::{self, Resource};
use tracing::{error, info};

use crate::error::LaunchError;

/// Dossier résolu et canonique, fixé au premier `init()` réussi.
static RESOURCES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Localise `resources/` et enregistre le lecteur auprès de Servo.
///
/// **Doit être appelé avant `ServoBuilder::build()`**. Les appels suivants
/// ne font rien.
pub fn init(explicit: Option<&Path>) -> Result<(), LaunchError> {
    if RESOURCES_DIR.get().is_some() {
        return Ok(());
    }

    let dir = first_existing_dir(candidate_dirs(explicit)).ok_or_else(|| {
        LaunchError::EngineInit(
            "Servo resources/ directory not found (set [engine] resources_path)".to_string(),
        )
    })?;
    let dir = dir.canonicalize().map_err(|e| {
        LaunchError::EngineInit(format!("cannot resolve {}: {e}", dir.display()))
    })?;

    info!(path = %dir.display(), "Ressources Servo trouvées");
    let dir = RESOURCES_DIR.get_or_init(|| dir);
    resources::set(Box::new(ResourceReader { dir: dir.clone() }));
    Ok(())
}

struct ResourceReader {
    dir: PathBuf,
}

impl resources::ResourceReaderMethods for ResourceReader {
    fn read(&self, file: Resource) -> Vec<u8> {
        let path = self.dir.join(file.filename());

        // Le chemin résolu doit rester dans resources/ (pas de "../", pas de lien
        // symbolique qui en sort).
        let canonical = match path.canonicalize() {
            Ok(p) if p.starts_with(&self.dir) => p,
            Ok(p) => {
                error!(path = %p.display(), "Ressource hors du dossier resources/");
                panic!("La ressource {:?} sort de {}", file.filename(), self.dir.display());
            }
            Err(e) => panic!("Ressource Servo {:?} introuvable: {e}", file.filename()),
        };

        fs::read(&canonical).unwrap_or_else(|e| {
            panic!(
                "Impossible de lire la ressource Servo {:?} (chemin: {}): {}",
                file.filename(),
                canonical.display(),
                e
            )
        })
    }

    fn sandbox_access_files_dirs(&self) -> Vec<PathBuf> {
        vec![self.dir.clone()]
    }

    fn sandbox_access_files(&self) -> Vec<PathBuf> {
        vec![]
    }
}

/// Emplacements candidats, dans l'ordre de priorité.
fn candidate_dirs(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }

    if let Ok(exe_path) = env::current_exe()
        && let Ok(canonical) = exe_path.canonicalize()
        && let Some(exe_dir) = canonical.parent()
    {
        candidates.push(exe_dir.join("resources"));

        // Pendant le développement avec cargo : target/{debug,release}/ → racine.
        if let Some(target_dir) = exe_dir.parent()
            && target_dir.file_name().is_some_and(|n| n == "target")
            && let Some(project_root) = target_dir.parent()
        {
            candidates.push(project_root.join("resources"));
        }
    }

    candidates.push(PathBuf::from("resources"));
    candidates
}

fn first_existing_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_comes_first() {
        let explicit = PathBuf::from("/opt/servo/resources");
        let candidates = candidate_dirs(Some(&explicit));
        assert_eq!(candidates.first(), Some(&explicit));
        assert_eq!(candidates.last(), Some(&PathBuf::from("resources")));
    }

    #[test]
    fn test_first_existing_dir_skips_missing() {
        let existing = env::temp_dir();
        let missing = existing.join("webpane-definitely-missing-dir");
        let found = first_existing_dir(vec![missing, existing.clone()]);
        assert_eq!(found, Some(existing));
    }

    #[test]
    fn test_first_existing_dir_none_when_nothing_exists() {
        let missing = env::temp_dir().join("webpane-definitely-missing-dir");
        assert_eq!(first_existing_dir(vec![missing]), None);
    }
}
