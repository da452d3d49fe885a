//! Projection of the merged key space onto the broker config model.

use super::merge::MergedConfig;
use crate::{BrokerConfig, OWNER_USER, OidcConfig, UsersConfig};
use std::collections::BTreeSet;

const OIDC_SECTION: &str = "oidc";
const ISSUER_KEY: &str = "issuer";
const CLIENT_ID_KEY: &str = "client_id";
const CLIENT_SECRET_KEY: &str = "client_secret";

const USERS_SECTION: &str = "users";
const ALLOWED_USERS_KEY: &str = "allowed_users";
const OWNER_KEY: &str = "owner";
const HOME_BASE_DIR_KEY: &str = "home_base_dir";
const SSH_SUFFIXES_KEY: &str = "ssh_allowed_suffixes";

pub(super) fn project(merged: &MergedConfig) -> BrokerConfig {
    BrokerConfig {
        oidc: project_oidc(merged),
        users: project_users(merged),
    }
}

fn project_oidc(merged: &MergedConfig) -> OidcConfig {
    let value = |key| merged.get(OIDC_SECTION, key).unwrap_or_default().to_string();
    OidcConfig {
        issuer_url: value(ISSUER_KEY),
        client_id: value(CLIENT_ID_KEY),
        client_secret: value(CLIENT_SECRET_KEY),
    }
}

fn project_users(merged: &MergedConfig) -> UsersConfig {
    let value = |key| merged.get(USERS_SECTION, key).unwrap_or_default();

    let mut allowed_users: BTreeSet<String> =
        split_list(value(ALLOWED_USERS_KEY)).into_iter().collect();
    if allowed_users.is_empty() {
        allowed_users.insert(OWNER_USER.to_string());
    }

    UsersConfig {
        allowed_users,
        owner: merged
            .get(USERS_SECTION, OWNER_KEY)
            .map(ToString::to_string),
        home_base_dir: value(HOME_BASE_DIR_KEY).to_string(),
        // Split verbatim: an empty value keeps a single empty suffix.
        allowed_ssh_suffixes: value(SSH_SUFFIXES_KEY)
            .split(',')
            .map(ToString::to_string)
            .collect(),
    }
}

/// Comma-separated list with each entry trimmed.
///
/// Every delimiter closes an entry, so blanks between or before commas are
/// kept as empty strings; only an empty remainder after the last comma is
/// dropped. `\,` is a literal comma and `\\` a literal backslash.
fn split_list(value: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next @ (',' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => {}
            },
            ',' => {
                entries.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        entries.push(current.trim().to_string());
    }
    entries
}
