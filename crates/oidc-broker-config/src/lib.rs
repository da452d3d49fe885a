//! Layered configuration for the OIDC identity broker.
//!
//! This crate resolves the broker's effective configuration from a base INI
//! file plus its `<path>.d/` drop-in layers, rejects files that still carry
//! template placeholders, answers access-policy questions about users, and
//! persists the auto-registered machine owner as an extra drop-in layer.

mod error;
mod loader;
mod model;
mod registration;

/// Public error types returned by config loading and owner registration.
pub use error::{ConfigError, PlaceholderOffense, RegistrationError};
/// Layered config types and drop-in discovery helpers.
pub use loader::{
    ConfigLayer, ConfigLayerSource, LayeredBrokerConfig, MergedConfig, discover_drop_ins,
    drop_in_dir,
};
/// Configuration models and access policy.
pub use model::*;
/// File name used for the auto-registered owner layer.
pub use registration::OWNER_REGISTRATION_FILE;
