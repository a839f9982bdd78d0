//! `User-Agent` header value for crawlers.
//!
//! A [`UserAgent`] describes the identity of a fetcher agent:
//! - `agent_name`: primary agent name,
//! - `email_address`: the agent owner's email address,
//! - `web_address`: a web page describing the agent,
//! - `browser_version`: browser token used for compatibility,
//! - `crawler_version`: version of the agent itself, defaults to the version of
//!   this library,
//! - `user_agent_string`: optional full value that replaces the derived one.
//!
//! The header value is computed once, when the [`UserAgent`] is built, and never
//! changes afterwards. [`UserAgentConfig`] carries the optional fields and is also
//! the builder:
//!
//! ```
//! use crawlhttp::UserAgent;
//!
//! let ua = UserAgent::builder()
//!     .agent_name("MyCrawler")
//!     .crawler_version("1.0")
//!     .web_address("www.mycrawler.com/bot.html")
//!     .build();
//!
//! assert_eq!(
//!     ua.user_agent_string(),
//!     "Mozilla/5.0 (compatible; MyCrawler/1.0; +www.mycrawler.com/bot.html)"
//! );
//! ```

use std::fmt;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_BROWSER_VERSION: &str = "Mozilla/5.0";
pub const DEFAULT_CRAWLER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity fields of a fetcher agent.
///
/// Missing fields in a TOML table take the values of [`UserAgentConfig::default`].
/// `crawler_version = false` drops the crawler version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub agent_name: String,
    pub email_address: Option<String>,
    pub web_address: Option<String>,
    pub browser_version: String,
    #[serde(
        serialize_with = "serialize_crawler_version",
        deserialize_with = "deserialize_crawler_version"
    )]
    pub crawler_version: Option<String>,
    pub user_agent_string: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            agent_name: String::new(),
            email_address: None,
            web_address: None,
            browser_version: DEFAULT_BROWSER_VERSION.to_string(),
            crawler_version: Some(DEFAULT_CRAWLER_VERSION.to_string()),
            user_agent_string: None,
        }
    }
}

impl UserAgentConfig {
    pub fn agent_name(mut self, agent_name: impl Into<String>) -> Self {
        self.agent_name = agent_name.into();
        self
    }

    pub fn email_address(mut self, email_address: impl Into<String>) -> Self {
        self.email_address = Some(email_address.into());
        self
    }

    pub fn web_address(mut self, web_address: impl Into<String>) -> Self {
        self.web_address = Some(web_address.into());
        self
    }

    pub fn browser_version(mut self, browser_version: impl Into<String>) -> Self {
        self.browser_version = browser_version.into();
        self
    }

    pub fn crawler_version(mut self, crawler_version: impl Into<String>) -> Self {
        self.crawler_version = Some(crawler_version.into());
        self
    }

    /// Drops the crawler version, so no `/version` follows the agent name.
    pub fn without_crawler_version(mut self) -> Self {
        self.crawler_version = None;
        self
    }

    /// Uses `user_agent_string` verbatim instead of deriving the value.
    pub fn user_agent_string(mut self, user_agent_string: impl Into<String>) -> Self {
        self.user_agent_string = Some(user_agent_string.into());
        self
    }

    pub fn build(self) -> UserAgent {
        UserAgent::from(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CrawlerVersion {
    Version(String),
    Enabled(bool),
}

fn serialize_crawler_version<S>(version: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match version {
        Some(version) => serializer.serialize_str(version),
        None => serializer.serialize_bool(false),
    }
}

fn deserialize_crawler_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CrawlerVersion::deserialize(deserializer)? {
        CrawlerVersion::Version(version) => Some(version),
        CrawlerVersion::Enabled(true) => Some(DEFAULT_CRAWLER_VERSION.to_string()),
        CrawlerVersion::Enabled(false) => None,
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Derives the header value from `config`, ignoring any override string.
///
/// Format: `<browser> (compatible; <agent>[/<crawler>][; +<web>][; <email>])`.
/// Empty web and email addresses count as unset.
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    let web_address = config.web_address.as_deref().filter(|s| !s.is_empty());
    let email_address = config.email_address.as_deref().filter(|s| !s.is_empty());

    let mut result = String::with_capacity(64);
    result.push_str(&config.browser_version);
    result.push_str(" (compatible; ");
    result.push_str(&config.agent_name);
    if let Some(crawler_version) = &config.crawler_version {
        result.push('/');
        result.push_str(crawler_version);
    }

    if web_address.is_some() || email_address.is_some() {
        result.push_str("; ");
    }
    if let Some(web_address) = web_address {
        result.push('+');
        result.push_str(web_address);
    }
    if let Some(email_address) = email_address {
        if web_address.is_some() {
            result.push_str("; ");
        }
        result.push_str(email_address);
    }

    result.push(')');
    result
}

/// Immutable description of a fetcher agent and its `User-Agent` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserAgentConfig", into = "UserAgentConfig")]
pub struct UserAgent {
    config: UserAgentConfig,
    user_agent_string: String,
}

impl UserAgent {
    /// Uses the default browser and crawler versions.
    pub fn new(agent_name: &str, email_address: &str, web_address: &str) -> Self {
        Self::with_browser_version(agent_name, email_address, web_address, DEFAULT_BROWSER_VERSION)
    }

    /// Uses the default crawler version.
    pub fn with_browser_version(
        agent_name: &str,
        email_address: &str,
        web_address: &str,
        browser_version: &str,
    ) -> Self {
        Self::with_versions(
            agent_name,
            email_address,
            web_address,
            browser_version,
            Some(DEFAULT_CRAWLER_VERSION),
        )
    }

    /// Empty email and web addresses are stored as unset.
    pub fn with_versions(
        agent_name: &str,
        email_address: &str,
        web_address: &str,
        browser_version: &str,
        crawler_version: Option<&str>,
    ) -> Self {
        UserAgentConfig {
            agent_name: agent_name.to_string(),
            email_address: non_empty(email_address),
            web_address: non_empty(web_address),
            browser_version: browser_version.to_string(),
            crawler_version: crawler_version.map(str::to_string),
            user_agent_string: None,
        }
        .build()
    }

    pub fn builder() -> UserAgentConfig {
        UserAgentConfig::default()
    }

    pub fn agent_name(&self) -> &str {
        &self.config.agent_name
    }

    pub fn email_address(&self) -> Option<&str> {
        self.config.email_address.as_deref()
    }

    pub fn web_address(&self) -> Option<&str> {
        self.config.web_address.as_deref()
    }

    pub fn browser_version(&self) -> &str {
        &self.config.browser_version
    }

    pub fn crawler_version(&self) -> Option<&str> {
        self.config.crawler_version.as_deref()
    }

    /// Value to send in the `User-Agent` request header.
    pub fn user_agent_string(&self) -> &str {
        &self.user_agent_string
    }
}

impl From<UserAgentConfig> for UserAgent {
    fn from(config: UserAgentConfig) -> Self {
        let user_agent_string = match &config.user_agent_string {
            Some(user_agent_string) => {
                debug!("using user agent override: {user_agent_string}");
                user_agent_string.clone()
            }
            None => {
                let user_agent_string = format_user_agent(&config);
                debug!("derived user agent: {user_agent_string}");
                user_agent_string
            }
        };

        Self {
            config,
            user_agent_string,
        }
    }
}

impl From<UserAgent> for UserAgentConfig {
    fn from(user_agent: UserAgent) -> Self {
        user_agent.config
    }
}

impl AsRef<str> for UserAgent {
    fn as_ref(&self) -> &str {
        &self.user_agent_string
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_agent_string)
    }
}
