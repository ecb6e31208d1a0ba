//! Runtime configuration resolved from flags and platform defaults.

use crate::cli::Cli;
use std::path::{Path, PathBuf};
use todolist_core::default_log_level;

const APP_DIR_NAME: &str = "todolist";
const FALLBACK_DATA_DIR: &str = ".todolist";
const DB_FILE_NAME: &str = "todolist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    pub fn resolve(cli: &Cli) -> Self {
        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| default_data_dir(dirs::data_dir().as_deref()));
        Self::with_data_dir(data_dir, cli.log_dir.clone(), cli.log_level.clone())
    }

    fn with_data_dir(data_dir: PathBuf, log_dir: Option<PathBuf>, log_level: Option<String>) -> Self {
        let data_dir = absolutize(data_dir);
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_dir: log_dir
                .map(absolutize)
                .unwrap_or_else(|| data_dir.join("logs")),
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
            data_dir,
        }
    }
}

fn default_data_dir(platform_dir: Option<&Path>) -> PathBuf {
    match platform_dir {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from(FALLBACK_DATA_DIR),
    }
}

// Log directories must be absolute.
fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::{default_data_dir, CliConfig};
    use std::path::{Path, PathBuf};

    #[test]
    fn default_data_dir_uses_platform_dir_or_fallback() {
        assert_eq!(
            default_data_dir(Some(Path::new("/home/u/.local/share"))),
            PathBuf::from("/home/u/.local/share/todolist")
        );
        assert_eq!(default_data_dir(None), PathBuf::from(".todolist"));
    }

    #[test]
    fn derived_paths_live_under_data_dir() {
        let config = CliConfig::with_data_dir(PathBuf::from("/srv/todo"), None, None);
        assert_eq!(config.db_path, PathBuf::from("/srv/todo/todolist.sqlite3"));
        assert_eq!(config.log_dir, PathBuf::from("/srv/todo/logs"));
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn relative_dirs_become_absolute() {
        let config = CliConfig::with_data_dir(
            PathBuf::from("data"),
            Some(PathBuf::from("logs")),
            Some("warn".to_string()),
        );
        assert!(config.data_dir.is_absolute());
        assert!(config.log_dir.is_absolute());
        assert_eq!(config.log_level, "warn");
    }
}
