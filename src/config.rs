use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::http::headers::{HeaderMap, USER_AGENT};
use crate::http::user_agent::{UserAgent, UserAgentConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fetcher settings, usually read from a TOML file:
///
/// ```toml
/// [user_agent]
/// agent_name = "mycrawler"
/// email_address = "mycrawler@mydomain.com"
///
/// [headers]
/// Accept-Language = ["en", "fr"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub user_agent: UserAgentConfig,

    /// Extra request headers, sent with every request.
    pub headers: IndexMap<String, Vec<String>>,
}

impl FetcherConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<FetcherConfig>(content)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`FetcherConfig::from_file`], falling back to the default config on error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}");
                warn!("Fall back to default config");
                FetcherConfig::default()
            }
        }
    }

    pub fn user_agent(&self) -> UserAgent {
        UserAgent::from(self.user_agent.clone())
    }

    /// Configured headers plus `User-Agent`, which replaces any configured value.
    pub fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::from_map(self.headers.clone());
        headers.set(USER_AGENT, Some(self.user_agent().user_agent_string()));
        headers
    }
}
