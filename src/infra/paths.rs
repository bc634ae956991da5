// src/infra/paths.rs — Path management
//
// All paths respect the LESSONSMITH_HOME environment variable for isolation.
// When set, config and data live under that directory; otherwise config uses
// ~/.lessonsmith/ and data uses the platform data dir.

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::OnceLock;

static PROJECT_DIRS: OnceLock<ProjectDirs> = OnceLock::new();

fn project_dirs() -> &'static ProjectDirs {
    PROJECT_DIRS.get_or_init(|| {
        ProjectDirs::from("", "", "lessonsmith").expect("Could not determine home directory")
    })
}

fn lessonsmith_home() -> Option<PathBuf> {
    std::env::var_os("LESSONSMITH_HOME").map(PathBuf::from)
}

/// Configuration directory: $LESSONSMITH_HOME/ or ~/.lessonsmith/
pub fn config_dir() -> PathBuf {
    if let Some(home) = lessonsmith_home() {
        return home;
    }
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .join(".lessonsmith")
}

/// Data directory: $LESSONSMITH_HOME/data/ or the platform-local data dir.
pub fn data_dir() -> PathBuf {
    if let Some(home) = lessonsmith_home() {
        return home.join("data");
    }
    project_dirs().data_local_dir().to_path_buf()
}

/// Database path
pub fn db_path() -> PathBuf {
    data_dir().join("lessonsmith.db")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Ensure required directories exist.
pub fn ensure_dirs() -> anyhow::Result<()> {
    for dir in [config_dir(), data_dir()] {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
