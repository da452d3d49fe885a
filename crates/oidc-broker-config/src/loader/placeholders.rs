//! Detection of unfilled template placeholders in merged values.

use super::merge::MergedConfig;
use crate::{ConfigError, PlaceholderOffense};
use log::warn;
use std::path::Path;

/// Fail if any merged value still contains both `<` and `>`.
///
/// The check is positional-agnostic: `a>b<c` is flagged too. Values with
/// only one of the two characters pass. Every offending key is reported.
pub(super) fn ensure_no_placeholders(
    merged: &MergedConfig,
    config_path: &Path,
) -> Result<(), ConfigError> {
    let offenses = find_placeholders(merged);
    if offenses.is_empty() {
        return Ok(());
    }
    warn!(
        "config {} still contains {} template placeholder(s)",
        config_path.display(),
        offenses.len()
    );
    Err(ConfigError::Placeholders {
        path: config_path.to_path_buf(),
        offenses,
    })
}

fn find_placeholders(merged: &MergedConfig) -> Vec<PlaceholderOffense> {
    merged
        .sections()
        .flat_map(|section| {
            merged
                .entries(section)
                .filter(|(_, value)| is_placeholder(value))
                .map(move |(key, _)| PlaceholderOffense {
                    section: section.to_string(),
                    key: key.to_string(),
                })
        })
        .collect()
}

fn is_placeholder(value: &str) -> bool {
    value.contains('<') && value.contains('>')
}
