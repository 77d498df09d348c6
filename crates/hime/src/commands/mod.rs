//! CLI command implementations.

mod diff;
mod inspect;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use hime_config::{CliSettings, Config};

use crate::GlobalArgs;
use crate::error::CliError;

pub(crate) use diff::{DiffArgs, HighlightArgs};
pub(crate) use inspect::{DetectArgs, SummaryArgs};
pub(crate) use render::{BatchArgs, RenderArgs};

/// Title used when neither the page nor its file name gives one.
const UNTITLED: &str = "Untitled";

/// Load configuration, applying the global CLI overrides.
fn load_config(global: &GlobalArgs, summary_length: Option<usize>) -> Result<Config, CliError> {
    let cli_settings = CliSettings {
        format: global.format,
        summary_length,
    };
    Ok(Config::load(global.config.as_deref(), Some(&cli_settings))?)
}

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Fallback page title: the explicit title, else the file stem.
fn fallback_title(explicit: Option<&str>, path: Option<&PathBuf>) -> String {
    explicit
        .map(str::to_owned)
        .or_else(|| {
            path.and_then(|p| p.file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| UNTITLED.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fallback_title_prefers_explicit() {
        let path = PathBuf::from("pages/FrontPage.wiki");
        assert_eq!(fallback_title(Some("Home"), Some(&path)), "Home");
    }

    #[test]
    fn test_fallback_title_uses_file_stem() {
        let path = PathBuf::from("pages/FrontPage.wiki");
        assert_eq!(fallback_title(None, Some(&path)), "FrontPage");
    }

    #[test]
    fn test_fallback_title_untitled() {
        assert_eq!(fallback_title(None, None), "Untitled");
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.wiki");
        std::fs::write(&path, "= Hello =\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "= Hello =\n");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.wiki");
        let err = read_input(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("missing.wiki"));
    }
}
