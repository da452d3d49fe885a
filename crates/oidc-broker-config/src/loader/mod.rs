//! Layered configuration loader.
//!
//! Reads the base INI file and every drop-in layer from `<path>.d/`, merges
//! them key-by-key in file-name order, rejects leftover template
//! placeholders, and projects the result onto a `BrokerConfig`.

mod layer_io;
mod merge;
mod placeholders;
mod projection;


pub use layer_io::{discover_drop_ins, drop_in_dir};
pub use merge::MergedConfig;

use crate::{BrokerConfig, ConfigError};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Label used in errors for configs loaded from memory.
const INLINE_LABEL: &str = "<inline>";

/// Effective config plus metadata about which layers were applied.
#[derive(Debug, Clone)]
pub struct LayeredBrokerConfig {
    /// The merged, validated config.
    pub config: BrokerConfig,
    /// Every layer applied, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
    /// Raw merged key space the config was projected from.
    pub merged: MergedConfig,
}

/// Origin of a single layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// The caller-supplied base file.
    Base,
    /// A file from the `<path>.d/` directory.
    DropIn,
}

/// Metadata about a config layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

impl BrokerConfig {
    /// Load the effective config for a base path and its drop-ins.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::load_layered(path)?.config)
    }

    /// Load the effective config and report every layer that was applied.
    ///
    /// Precedence (low -> high): base file, then drop-ins in byte-wise
    /// file-name order. Any discovery, read, parse or placeholder error
    /// aborts the whole load.
    pub fn load_layered(path: impl AsRef<Path>) -> Result<LayeredBrokerConfig, ConfigError> {
        let path = path.as_ref();
        info!("loading broker config (path={})", path.display());

        let drop_ins = layer_io::discover_drop_ins(path)?;
        let mut layers = Vec::with_capacity(drop_ins.len() + 1);
        layers.push(ConfigLayer {
            source: ConfigLayerSource::Base,
            path: path.to_path_buf(),
        });
        layers.extend(drop_ins.into_iter().map(|path| ConfigLayer {
            source: ConfigLayerSource::DropIn,
            path,
        }));

        let mut merged = MergedConfig::default();
        for layer in &layers {
            let parsed = layer_io::read_layer(&layer.path)?;
            merged.apply(&parsed);
            debug!(
                "applied layer (source={:?}, path={})",
                layer.source,
                layer.path.display()
            );
        }

        let config = config_from_merged(&merged, path)?;
        info!("broker config loaded (layers={})", layers.len());
        Ok(LayeredBrokerConfig {
            config,
            layers,
            merged,
        })
    }

    /// Load a config from INI contents held in memory (no drop-ins).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading broker config from raw contents (len={})", contents.len());
        let label = Path::new(INLINE_LABEL);
        let parsed = layer_io::parse_layer(contents).map_err(|source| ConfigError::ParseFailed {
            path: label.to_path_buf(),
            source,
        })?;
        let mut merged = MergedConfig::default();
        merged.apply(&parsed);
        config_from_merged(&merged, label)
    }
}

fn config_from_merged(merged: &MergedConfig, path: &Path) -> Result<BrokerConfig, ConfigError> {
    placeholders::ensure_no_placeholders(merged, path)?;
    Ok(projection::project(merged))
}
