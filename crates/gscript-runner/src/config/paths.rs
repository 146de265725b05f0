use std::path::PathBuf;

/// Where gscript keeps its config and data.
///
/// Follows the XDG base directory layout on Unix-like systems and
/// `%APPDATA%` on Windows:
/// - Config: `$XDG_CONFIG_HOME/{app}` (default `~/.config/{app}`)
/// - Data: `$XDG_DATA_HOME/{app}` (default `~/.local/share/{app}`)
pub struct ProjectPaths {
    app: String,
}

impl ProjectPaths {
    /// Returns `None` when no home directory can be determined
    pub fn new(app: &str) -> Option<Self> {
        home_dir()?;
        Some(ProjectPaths {
            app: app.to_string(),
        })
    }

    pub fn config_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            windows_appdata(&self.app)
        }

        #[cfg(not(target_os = "windows"))]
        {
            xdg_dir("XDG_CONFIG_HOME", &[".config"]).join(&self.app)
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            windows_appdata(&self.app)
        }

        #[cfg(not(target_os = "windows"))]
        {
            xdg_dir("XDG_DATA_HOME", &[".local", "share"]).join(&self.app)
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

/// `$var` if set, otherwise `~/<fallback...>`
#[cfg(not(target_os = "windows"))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    std::env::var(var).ok().map(PathBuf::from).unwrap_or_else(|| {
        let base = home_dir().unwrap_or_default();
        fallback.iter().fold(base, |path, segment| path.join(segment))
    })
}

#[cfg(target_os = "windows")]
fn windows_appdata(app: &str) -> PathBuf {
    std::env::var("APPDATA")
        .ok()
        .map(|p| PathBuf::from(p).join(app))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", app)))
}
