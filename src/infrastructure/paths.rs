//! Data directory resolution.
//!
//! Traces and the default seed file live in one per-user directory, following
//! the XDG base directory convention.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "hireflow";

/// Returns the directory hireflow stores its data in.
///
/// Resolution order:
///
/// 1. `override_dir`, with `~` expanded
/// 2. `$XDG_DATA_HOME/hireflow`
/// 3. `$HOME/.local/share/hireflow`
/// 4. `./.hireflow`
///
/// The directory is not created.
#[must_use]
pub fn get_data_dir(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(expand_tilde(dir.trim()));
    }
    resolve_data_dir(
        std::env::var_os("XDG_DATA_HOME").as_deref().map(Path::new),
        std::env::var_os("HOME").as_deref().map(Path::new),
    )
}

fn resolve_data_dir(xdg_data_home: Option<&Path>, home: Option<&Path>) -> PathBuf {
    // XDG requires an absolute path; anything else is ignored
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR);
    }
    home.filter(|p| !p.as_os_str().is_empty()).map_or_else(
        || PathBuf::from(".").join(format!(".{APP_DIR}")),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use hireflow::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match std::env::var("HOME") {
        Ok(home) => expand_tilde_with(path, &home),
        Err(_) => path.to_string(),
    }
}

fn expand_tilde_with(path: &str, home: &str) -> String {
    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("~", "/home/ada")]
    #[case("~/seeds.json", "/home/ada/seeds.json")]
    #[case("/var/lib/hireflow", "/var/lib/hireflow")]
    #[case("~other/x", "~other/x")]
    #[case("relative/~/x", "relative/~/x")]
    fn expands_only_leading_tilde(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(expand_tilde_with(input, "/home/ada/"), expected);
    }

    #[test]
    fn xdg_data_home_wins_over_home() {
        let dir = resolve_data_dir(Some(Path::new("/xdg")), Some(Path::new("/home/ada")));
        assert_eq!(dir, PathBuf::from("/xdg/hireflow"));
    }

    #[test]
    fn relative_xdg_is_ignored() {
        let dir = resolve_data_dir(Some(Path::new("data")), Some(Path::new("/home/ada")));
        assert_eq!(dir, PathBuf::from("/home/ada/.local/share/hireflow"));
    }

    #[test]
    fn falls_back_to_working_directory() {
        assert_eq!(resolve_data_dir(None, None), PathBuf::from("./.hireflow"));
    }

    #[test]
    fn override_is_used_verbatim() {
        assert_eq!(get_data_dir(Some("/tmp/hf")), PathBuf::from("/tmp/hf"));
    }
}
