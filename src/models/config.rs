use crate::{
    builder::{CardOptions, FieldPolicy},
    errors::ConfigError,
};
use derive_getters::Getters;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, Default, Deserialize, Getters)]
pub struct Config {
    #[serde(default = "bool::default")]
    with_actions: bool,
    #[serde(default)]
    field_policy: FieldPolicy,
    #[serde(default = "bool::default")]
    pretty: bool,
    default_external_url: Option<String>,
}

impl Config {
    /// Loads the config from `filename`, or from `./config.json` when no file
    /// is given. A missing default file falls back to built-in defaults.
    pub fn load(filename: Option<String>) -> Result<Self, ConfigError> {
        let filename = match filename {
            Some(x) => {
                log::debug!("Using argument for config file: '{x}'.");
                x
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                log::debug!("Using default config file path, ./{DEFAULT_CONFIG_FILE}");
                DEFAULT_CONFIG_FILE.to_string()
            }
            None => {
                log::debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
        };

        let config_file =
            File::open(&filename).map_err(|e| ConfigError::Io(filename.clone(), e))?;
        let config_reader = BufReader::new(config_file);
        serde_json::from_reader(config_reader).map_err(|e| ConfigError::BadJson(filename, e))
    }

    pub fn card_options(&self) -> CardOptions {
        CardOptions {
            with_actions: self.with_actions,
            field_policy: self.field_policy,
            fallback_external_url: self.default_external_url.clone(),
        }
    }
}
