//! Persistence of the auto-registered machine owner.
//!
//! The owner is written as its own drop-in layer so the next load picks it
//! up through the normal layered read path.

use crate::loader::drop_in_dir;
use crate::{RegistrationError, UsersConfig};
use handlebars::Handlebars;
use log::{error, info};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// File name of the owner registration layer inside `<path>.d/`.
pub const OWNER_REGISTRATION_FILE: &str = "20-owner-autoregistration.conf";

const TEMPLATE_NAME: &str = "owner-autoregistration";
const TEMPLATE: &str = include_str!("../templates/20-owner-autoregistration.conf.hbs");

#[derive(Serialize)]
struct TemplateEnv<'a> {
    owner: &'a str,
}

impl UsersConfig {
    /// Record `user` as the owner and persist it as a drop-in layer.
    ///
    /// Only this in-memory instance sees the new owner immediately; other
    /// callers observe it on their next load. Any existing registration file
    /// is truncated and rewritten. The drop-in directory must already exist.
    /// Concurrent calls for the same config path are not serialized here.
    pub fn persist_owner(
        &mut self,
        config_path: impl AsRef<Path>,
        user: &str,
    ) -> Result<(), RegistrationError> {
        self.owner = Some(user.to_string());
        let path = drop_in_dir(config_path).join(OWNER_REGISTRATION_FILE);

        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        if let Err(err) = handlebars.register_template_string(TEMPLATE_NAME, TEMPLATE) {
            error!("failed to load owner registration template: {err}");
            return Err(err.into());
        }

        let file = match File::create(&path) {
            Ok(file) => file,
            Err(source) => {
                error!(
                    "failed to create owner registration file {}: {source}",
                    path.display()
                );
                return Err(RegistrationError::Create { path, source });
            }
        };

        let env = TemplateEnv { owner: user };
        if let Err(source) = handlebars.render_to_write(TEMPLATE_NAME, &env, file) {
            error!(
                "failed to write owner registration file {}: {source}",
                path.display()
            );
            return Err(RegistrationError::Render { path, source });
        }

        info!("registered owner {user:?} in {}", path.display());
        Ok(())
    }
}
