//! Errors returned by the typed header accessors of
//! [`HeaderMap`](crate::http::headers::HeaderMap).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("invalid content length: {0:?}")]
    InvalidContentLength(String),

    #[error("invalid http date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: httpdate::Error,
    },
}
