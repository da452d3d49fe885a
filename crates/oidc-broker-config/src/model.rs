//! Resolved broker configuration and access policy queries.

use std::collections::BTreeSet;

/// Allowed-users entry that admits every user.
pub const ALL_USERS: &str = "ALL";
/// Allowed-users entry that admits only the machine owner.
pub const OWNER_USER: &str = "OWNER";

/// Effective broker configuration, rebuilt from disk on every load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokerConfig {
    /// Identity provider connection parameters from `[oidc]`.
    pub oidc: OidcConfig,
    /// User and access-control parameters from `[users]`.
    pub users: UsersConfig,
}

/// Identity provider connection parameters.
///
/// Missing keys project to empty strings; checking for required values is
/// left to the provider client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OidcConfig {
    pub issuer_url: String,
    pub client_id: String,
    pub client_secret: String,
}

/// User and access-control parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersConfig {
    /// Literal user names plus the `ALL` / `OWNER` sentinels.
    pub allowed_users: BTreeSet<String>,
    /// `None` until an owner is registered; `Some("")` is a registered
    /// empty owner, which matches no real user.
    pub(crate) owner: Option<String>,
    pub home_base_dir: String,
    /// Empty entries mean "no suffix restriction" and are kept as-is.
    pub allowed_ssh_suffixes: Vec<String>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            allowed_users: BTreeSet::from([OWNER_USER.to_string()]),
            owner: None,
            home_base_dir: String::new(),
            allowed_ssh_suffixes: vec![String::new()],
        }
    }
}

impl UsersConfig {
    /// Build a users config with an explicit owner.
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Registered owner, if any.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether `user` is literally listed in `allowed_users`.
    ///
    /// Sentinels are matched like any other name.
    pub fn is_user_allowed(&self, user: &str) -> bool {
        self.allowed_users.contains(user)
    }

    pub fn all_users_allowed(&self) -> bool {
        self.is_user_allowed(ALL_USERS)
    }

    pub fn owner_user_allowed(&self) -> bool {
        self.is_user_allowed(OWNER_USER)
    }

    /// Whether `user` is the owner. While no owner is registered the first
    /// user to log in is provisionally the owner, so this is true for anyone.
    pub fn is_owner(&self, user: &str) -> bool {
        match self.owner.as_deref() {
            None => true,
            Some(owner) => owner == user,
        }
    }

    pub fn owner_is_unset(&self) -> bool {
        self.owner.is_none()
    }
}
