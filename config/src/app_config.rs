use directories::ProjectDirs;
use std::{
    env,
    path::PathBuf,
};

const CONFIG_DIR_ENV: &str = "EXPORTER_CONFIG_DIR";

/// Directory searched for `config.yaml` when no explicit file is given.
///
/// `EXPORTER_CONFIG_DIR` overrides the platform default.
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV) {
        PathBuf::from(dir)
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "beaconcha", env!("CARGO_PKG_NAME"))
}
