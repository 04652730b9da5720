use std::path::Path;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::{company_profile::WatchlistEntry, headline::Tone};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub http: HttpSettings,
    pub forensic: ForensicSettings,
    pub regulators: Vec<RegulatorSettings>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct HttpSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ForensicSettings {
    /// Root of the financial data site, e.g. `https://www.screener.in`.
    pub base_url: String,
    pub default_company: String,
    #[serde(default)]
    pub watchlist: Vec<WatchlistEntry>,
}

/// One regulator page to scrape for investigation headlines.
#[derive(Deserialize, Clone, Debug)]
pub struct RegulatorSettings {
    pub name: String,
    pub title: String,
    pub url: String,
    pub tone: Tone,
    pub keywords: Vec<String>,
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No current directory: {}", e)))?;
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());

    load_settings(
        &base_path.join("configuration"),
        environment,
        config::Environment::with_prefix("APP"),
    )
}

/// Layers `base.yaml`, `<environment>.yaml` and `overrides`, in that order.
pub fn load_settings(
    configuration_directory: &Path,
    environment: String,
    overrides: config::Environment,
) -> Result<Settings, config::ConfigError> {
    let environment: Environment = environment
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // APP_APPLICATION__PORT=5001 sets `Settings.application.port`
        .add_source(overrides.prefix_separator("_").separator("__"))
        .build()?;

    settings.try_deserialize::<Settings>()
}
