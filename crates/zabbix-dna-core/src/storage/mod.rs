//! Local storage for session tokens and shell history.

pub mod history;
pub mod session;

pub use history::History;
pub use session::{Session, SessionStore};

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "zabbix-dna")
}

/// Platform config directory, searched when no local config file exists.
pub fn default_config_dir() -> Option<std::path::PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}
