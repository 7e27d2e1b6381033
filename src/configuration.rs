use crate::authentication::Credentials;
use secrecy::Secret;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub target: TargetSettings,
    pub credentials: CredentialSettings,
    pub runner: RunnerSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TargetSettings {
    pub base_url: String,
    /// Falls back to the HTTP client's defaults when absent.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_milliseconds: Option<u64>,
}

impl TargetSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CredentialSettings {
    pub username: String,
    pub password: Secret<String>,
}

impl CredentialSettings {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct RunnerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_concurrency: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scenario_timeout_seconds: u64,
}

impl RunnerSettings {
    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_secs(self.scenario_timeout_seconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `hosted` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "hosted".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_TARGET__BASE_URL=http://127.0.0.1:3001` would set `Settings.target.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environments for the suite.
#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Hosted,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Hosted => "hosted",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "hosted" => Ok(Self::Hosted),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `hosted`.",
                other
            )),
        }
    }
}
