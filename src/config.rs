use log::LevelFilter;
use serde::Deserialize;

use crate::error::Error;
use crate::ranking::ResultLimit;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Runtime settings. The page can hand these over as a plain object, missing
/// keys fall back to the defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub default_limit: ResultLimit,
    #[serde(deserialize_with = "deserialize_level")]
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_limit: ResultLimit::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn validate(self) -> Result<Self, Error> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidConfig(format!("base_url `{}`: {e}", self.base_url)))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base_url `{}` cannot be used as a base",
                self.base_url
            )));
        }
        Ok(self)
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter, Error> {
    level
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("unknown log level `{level}`")))
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    parse_level(&level).map_err(serde::de::Error::custom)
}
