//! Error types for config loading and owner registration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading the layered broker config.
///
/// Any of these aborts the whole load; no partially merged config is ever
/// handed back to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The drop-in directory exists but could not be listed.
    #[error("failed to read drop-in directory {}: {source}", .path.display())]
    DropInDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A base or drop-in file is missing or unreadable.
    #[error("failed to read config {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A base or drop-in file is not valid INI.
    #[error("failed to parse config {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },
    /// One or more merged values still contain template placeholders.
    #[error(
        "config file has invalid values, did you edit the file \"{}\"?\n{}",
        .path.display(),
        render_offenses(.offenses)
    )]
    Placeholders {
        path: PathBuf,
        offenses: Vec<PlaceholderOffense>,
    },
}

/// Errors returned while persisting the owner registration layer.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The bundled template could not be compiled.
    #[error("failed to load owner registration template: {0}")]
    TemplateLoad(#[from] handlebars::TemplateError),
    /// The registration file could not be created.
    #[error("failed to create owner registration file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Rendering into the registration file failed.
    #[error("failed to write owner registration file {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: handlebars::RenderError,
    },
}

/// A single (section, key) pair whose value looks like an unfilled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderOffense {
    pub section: String,
    pub key: String,
}

impl fmt::Display for PlaceholderOffense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found invalid character in section {:?}, key {:?}",
            self.section, self.key
        )
    }
}

fn render_offenses(offenses: &[PlaceholderOffense]) -> String {
    offenses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
