//! IO helpers for discovering and reading config layers from disk.

use crate::ConfigError;
use ini::{Ini, ParseOption};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Suffix appended to the base config path to form the drop-in directory.
const DROP_IN_SUFFIX: &str = ".d";

/// Drop-in directory for a base config path (`<path>.d`).
pub fn drop_in_dir(config_path: impl AsRef<Path>) -> PathBuf {
    let mut dir = OsString::from(config_path.as_ref().as_os_str());
    dir.push(DROP_IN_SUFFIX);
    PathBuf::from(dir)
}

/// List drop-in layers for a base config path, in precedence order.
///
/// Only direct entries of the drop-in directory are returned, sorted by
/// byte-wise file name. Nested directories are skipped. A missing directory
/// yields no layers; any other listing failure is an error.
pub fn discover_drop_ins(config_path: impl AsRef<Path>) -> Result<Vec<PathBuf>, ConfigError> {
    let dir = drop_in_dir(config_path);
    let read_dir = match fs::read_dir(&dir) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("no drop-in directory (path={})", dir.display());
            return Ok(Vec::new());
        }
        Err(source) => return Err(ConfigError::DropInDir { path: dir, source }),
    };

    let dir_error = |source| ConfigError::DropInDir {
        path: dir.clone(),
        source,
    };
    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(dir_error)?;
        if entry.file_type().map_err(dir_error)?.is_dir() {
            debug!("skipping nested drop-in directory (path={})", entry.path().display());
            continue;
        }
        names.push(entry.file_name());
    }
    names.sort();

    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// A parsed INI file: `(section, key, value)` entries in file order.
///
/// Keys before any section header have no section name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct ParsedLayer {
    entries: Vec<(Option<String>, String, String)>,
}

impl ParsedLayer {
    pub(super) fn entries(&self) -> impl Iterator<Item = (Option<&str>, &str, &str)> {
        self.entries
            .iter()
            .map(|(section, key, value)| (section.as_deref(), key.as_str(), value.as_str()))
    }
}

/// Read and parse a single INI layer.
pub(super) fn read_layer(path: &Path) -> Result<ParsedLayer, ConfigError> {
    debug!("loading config layer (path={})", path.display());
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layer(&contents).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse INI contents.
///
/// Backslashes are kept literally. Inline `#`/`;` comments are cut from
/// unquoted values, then one pair of surrounding quotes is stripped.
/// Values wrapped in `"""` or backticks are taken verbatim.
pub(super) fn parse_layer(contents: &str) -> Result<ParsedLayer, ini::ParseError> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(contents, options)?;

    let mut entries = Vec::new();
    for (section, properties) in ini.iter() {
        for (key, value) in properties.iter() {
            entries.push((
                section.map(ToString::to_string),
                key.to_string(),
                normalize_value(value),
            ));
        }
    }
    Ok(ParsedLayer { entries })
}

fn normalize_value(raw: &str) -> String {
    let raw = raw.trim();
    for quote in ["\"\"\"", "`"] {
        if let Some(end) = raw.strip_prefix(quote).and_then(|rest| rest.rfind(quote)) {
            return raw[quote.len()..quote.len() + end].to_string();
        }
    }

    let value = match raw.find(['#', ';']) {
        Some(index) => raw[..index].trim_end(),
        None => raw,
    };
    strip_surrounding_quotes(value).to_string()
}

fn strip_surrounding_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2
            && value.starts_with(quote)
            && value.ends_with(quote)
            && value.matches(quote).count() == 2
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}
