use crate::errors::ResolverError;
use crate::project_config::ProjectConfig;
use crate::registry::RegistryLoader;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directories searched for rule-set definitions, in priority order
    pub registry_directories: Vec<PathBuf>,
    /// Whether the sets shipped with the resolver are registered
    pub include_builtin_sets: bool,
    /// Project file in use, if one was given or discovered
    pub project_config_path: Option<PathBuf>,
    /// Parsed project file with paths already made absolute
    pub project_config: Option<ProjectConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            registry_directories: vec![default_user_registry_directory()],
            include_builtin_sets: true,
            project_config_path: None,
            project_config: None,
        }
    }
}

/// `~/.ruleset-resolver/sets`
pub fn default_user_registry_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ruleset-resolver")
        .join("sets")
}

impl ServiceConfig {
    /// Attach a project file, either the one given or the first found walking
    /// up from `start_dir`. Its registry directories take priority over the
    /// ones already configured.
    pub fn with_project_config(
        mut self,
        explicit_path: Option<&Path>,
        start_dir: &Path,
    ) -> Result<Self, ResolverError> {
        let found = match explicit_path {
            Some(path) => Some((path.to_path_buf(), ProjectConfig::from_file(path)?)),
            None => ProjectConfig::discover(start_dir)?,
        };

        if let Some((path, mut project)) = found {
            if let Some(config_dir) = path.parent() {
                project.resolve_paths(config_dir);
            }
            debug!("Using project configuration {}", path.display());

            let mut directories = project.registry_dirs.clone();
            directories.append(&mut self.registry_directories);
            self.registry_directories = directories;
            self.project_config_path = Some(path);
            self.project_config = Some(project);
        }

        Ok(self)
    }

    pub fn registry_loader(&self) -> RegistryLoader {
        RegistryLoader::new(self.registry_directories.clone())
            .with_builtin(self.include_builtin_sets)
    }
}
