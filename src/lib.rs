//! Support types for HTTP fetchers used by crawlers.
//!
//! Two independent pieces live here:
//! - [`UserAgent`](crate::http::user_agent::UserAgent), which formats the
//!   `User-Agent` request header from the crawler identity,
//! - [`HeaderMap`](crate::http::headers::HeaderMap), a case-sensitive
//!   multi-value header container.
//!
//! [`config`] ties them together for fetchers configured from a TOML file.

pub mod config;
pub mod http;

pub use config::{ConfigError, FetcherConfig};
pub use http::error::HeaderError;
pub use http::headers::HeaderMap;
pub use http::user_agent::{UserAgent, UserAgentConfig};
