//! Loading resolve options from disk.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dirs_next::home_dir;
use tracing::debug;

use super::model::{ConfigError, ResolveOptions};

/// Environment variable naming a JSON options file.
pub const OPTIONS_PATH_ENV: &str = "VALUE_SOURCE_OPTIONS";

/// Returns the options file named by `VALUE_SOURCE_OPTIONS`, if set.
pub fn default_options_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(OPTIONS_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Some(expand_tilde(&path));
    }
    None
}

/// Loads options from the default path, falling back to defaults when no path
/// is configured.
pub fn load_options() -> Result<ResolveOptions, ConfigError> {
    match default_options_path() {
        Some(path) => load_options_from_path(&path),
        None => Ok(ResolveOptions::default()),
    }
}

/// Loads options from a specific JSON file. A missing file yields defaults.
pub fn load_options_from_path(path: &Path) -> Result<ResolveOptions, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "options file missing; using defaults");
            return Ok(ResolveOptions::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let options = ResolveOptions::from_json_str(&content)?;
    debug!(
        path = %path.display(),
        maps = options.maps.len(),
        sets = options.sets.len(),
        arrays = options.arrays.len(),
        "options loaded"
    );
    Ok(options)
}

fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeRefs;

    #[test]
    fn missing_file_yields_defaults() {
        let directory = tempfile::tempdir().expect("temp dir");
        let options = load_options_from_path(&directory.path().join("absent.json")).expect("load");
        assert_eq!(options, ResolveOptions::default());
    }

    #[test]
    fn file_contents_are_parsed() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("options.json");
        fs::write(&path, r#"{"reflectObj": true, "maps": ["Registry"]}"#).expect("write");
        let options = load_options_from_path(&path).expect("load");
        assert!(options.include_non_enumerable);
        assert_eq!(options.maps, TypeRefs::from(["Registry"]));
    }

    #[test]
    fn malformed_file_reports_json_error() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("options.json");
        fs::write(&path, "{ not json").expect("write");
        let error = load_options_from_path(&path).unwrap_err();
        assert!(matches!(error, ConfigError::Json(_)));
    }

    #[test]
    fn directory_path_reports_io_error() {
        let directory = tempfile::tempdir().expect("temp dir");
        let error = load_options_from_path(directory.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn default_path_honors_environment_override() {
        temp_env::with_var(OPTIONS_PATH_ENV, Some("~/value-source/options.json"), || {
            let path = default_options_path().expect("path");
            assert_eq!(path, expand_tilde("~/value-source/options.json"));
            assert!(path.ends_with("value-source/options.json"));
        });
        temp_env::with_var(OPTIONS_PATH_ENV, Some("   "), || {
            assert!(default_options_path().is_none());
        });
    }

    #[test]
    fn load_options_without_env_uses_defaults() {
        temp_env::with_var_unset(OPTIONS_PATH_ENV, || {
            assert_eq!(load_options().expect("load"), ResolveOptions::default());
        });
    }
}
