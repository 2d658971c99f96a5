use crate::error::{AppraisalError, Result};
use crate::types::config::AppraisalConfig;
use std::path::{Path, PathBuf};

pub const CYCLE_CONFIG_FILE: &str = "appraisal.toml";
pub const LOCAL_CONFIG_FILE: &str = ".appraisal/local.toml";
pub const GLOBAL_CONFIG_FILE: &str = ".config/appraisal/config.toml";

/// Where a configuration layer came from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    Global,
    Cycle,
    Local,
}

impl ConfigLayer {
    pub fn label(self) -> &'static str {
        match self {
            ConfigLayer::Global => "global",
            ConfigLayer::Cycle => "cycle",
            ConfigLayer::Local => "local",
        }
    }
}

/// Effective configuration plus the files that produced it.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: AppraisalConfig,
    pub layers: Vec<(ConfigLayer, PathBuf)>,
}

/// Loads the global, cycle and local layers found next to `cycle_dir`.
/// Missing files are skipped; an empty result means built-in defaults.
pub fn load_config(cycle_dir: &Path) -> Result<LoadedConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(GLOBAL_CONFIG_FILE));
    load_config_with_global(cycle_dir, global.as_deref())
}

pub(crate) fn load_config_with_global(
    cycle_dir: &Path,
    global_path: Option<&Path>,
) -> Result<LoadedConfig> {
    let mut candidates = Vec::with_capacity(3);
    if let Some(path) = global_path {
        candidates.push((ConfigLayer::Global, path.to_path_buf()));
    }
    candidates.push((ConfigLayer::Cycle, cycle_dir.join(CYCLE_CONFIG_FILE)));
    candidates.push((ConfigLayer::Local, cycle_dir.join(LOCAL_CONFIG_FILE)));

    let mut loaded = LoadedConfig::default();
    for (layer, path) in candidates {
        if !path.is_file() {
            continue;
        }
        let layer_config = read_layer(&path)?;
        loaded.config = loaded.config.overlay(layer_config);
        loaded.layers.push((layer, path));
    }

    loaded.config.validate()?;
    Ok(loaded)
}

fn read_layer(path: &Path) -> Result<AppraisalConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AppraisalError::ConfigParse(format!("{}: {}", path.display(), e)))
}
