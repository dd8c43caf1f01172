use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/aksara`, or the platform data dir without `$HOME`
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("aksara"),
            )
        } else {
            ProjectDirs::from("", "", "aksara")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn store_path() -> Option<PathBuf> {
        Self::state_dir().map(|d| d.join("store.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|d| d.join("aksara.log"))
    }

    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "aksara") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("aksara_config.json")
        }
    }

    /// Default destination for saved drawings
    pub fn export_dir() -> PathBuf {
        ProjectDirs::from("", "", "aksara")
            .map(|pd| pd.data_dir().join("drawings"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_state_dir() {
        if let Some(state) = AppDirs::state_dir() {
            assert_eq!(AppDirs::store_path(), Some(state.join("store.db")));
            assert_eq!(AppDirs::log_path(), Some(state.join("aksara.log")));
        }
    }

    #[test]
    fn test_config_path_is_json() {
        let path = AppDirs::config_path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.ends_with(".json"));
    }
}
