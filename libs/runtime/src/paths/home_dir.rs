use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine the user's home directory")]
    NoHome,

    #[error("home_dir must be absolute or start with '~' (got: {0})")]
    NotAbsolute(String),

    #[error("failed to create home_dir {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Platform base directory for defaults: `%APPDATA%` on Windows, `$HOME` elsewhere.
fn platform_base() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    let base = dirs::config_dir();
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir();

    base.ok_or(HomeDirError::NoHome)
}

fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return dirs::home_dir().ok_or(HomeDirError::NoHome);
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        let home = dirs::home_dir().ok_or(HomeDirError::NoHome)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the application home directory.
///
/// - `None` falls back to `<platform base>/<default_subdir>`.
/// - `~` and `~/...` are expanded against the user's home.
/// - Anything else must already be absolute.
///
/// With `create == true` the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match configured {
        Some(raw) => {
            let p = expand_tilde(raw.trim())?;
            if !p.is_absolute() {
                return Err(HomeDirError::NotAbsolute(raw));
            }
            p
        }
        None => platform_base()?.join(default_subdir),
    };

    if create {
        ensure_dir(&path)?;
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<(), HomeDirError> {
    std::fs::create_dir_all(path).map_err(|source| HomeDirError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absolute_path_is_kept_and_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("nested").join("home");

        let resolved =
            resolve_home_dir(Some(target.to_string_lossy().into_owned()), ".x", true).unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = resolve_home_dir(Some("relative/dir".into()), ".x", false).unwrap_err();
        assert!(matches!(err, HomeDirError::NotAbsolute(_)));
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            let resolved = resolve_home_dir(Some("~/.contacts_tilde".into()), ".x", false).unwrap();
            assert_eq!(resolved, home.join(".contacts_tilde"));
        }
    }
}
