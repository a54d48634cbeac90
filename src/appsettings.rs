use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MapsSettings {
    pub api_key: String,
    #[serde(default = "default_maps_base_url")]
    pub base_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RideSettings {
    #[serde(default = "default_ride_base_url")]
    pub base_url: String,
    #[serde(default = "default_product_name")]
    pub product_name: String,
}

impl Default for RideSettings {
    fn default() -> Self {
        Self {
            base_url: default_ride_base_url(),
            product_name: default_product_name(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_access_token_url")]
    pub access_token_url: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EmailSettings {
    pub api_key: String,
    pub sender: String,
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    #[serde(default)]
    pub http: HttpSettings,
    pub maps: MapsSettings,
    #[serde(default)]
    pub ride: RideSettings,
    pub oauth: OAuthSettings,
    pub email: EmailSettings,
}

impl AppSettings {
    /// Layers `appsettings`, `appsettings.local` and `APP_*` variables
    /// (`APP_MAPS__API_KEY` sets `maps.api_key`).
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("appsettings").required(true))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_maps_base_url() -> String {
    "https://maps.googleapis.com/maps/api/distancematrix/json".to_owned()
}

fn default_ride_base_url() -> String {
    "https://api.uber.com/v1.2".to_owned()
}

fn default_product_name() -> String {
    "uberGO".to_owned()
}

fn default_authorize_url() -> String {
    "https://login.uber.com/oauth/v2/authorize".to_owned()
}

fn default_access_token_url() -> String {
    "https://login.uber.com/oauth/v2/token".to_owned()
}

fn default_email_base_url() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_owned()
}

fn default_subject() -> String {
    "Time to book your ride!".to_owned()
}
