//! HTTP headers container for fetchers.
//!
//! A header name maps to one or more values, kept in the order they were added.
//! Names are stored as given: no case folding happens, so `Content-Type` and
//! `content-type` are two distinct headers. Neither names nor values are
//! validated against the HTTP grammar.
//!
//! Names are kept in an ordered map so that enumeration and the diagnostic
//! [`Display`](std::fmt::Display) output follow insertion order.
//!
//! A name is either absent or bound to at least one value; the container never
//! holds a name with an empty value list.

use std::fmt;
use std::time::SystemTime;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::http::error::HeaderError;

pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_LANGUAGE: &str = "Content-Language";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_LOCATION: &str = "Content-Location";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
pub const CONTENT_MD5: &str = "Content-MD5";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const LAST_MODIFIED: &str = "Last-Modified";
pub const LOCATION: &str = "Location";
pub const USER_AGENT: &str = "User-Agent";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Vec<String>>",
    into = "IndexMap<String, Vec<String>>"
)]
pub struct HeaderMap {
    headers: IndexMap<String, Vec<String>>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a container holding the supplied headers.
    ///
    /// Names mapped to an empty list are skipped.
    pub fn from_map(headers: IndexMap<String, Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .collect();
        Self { headers }
    }

    /// Returns all header names.
    pub fn names(&self) -> Vec<&str> {
        self.headers.keys().map(String::as_str).collect()
    }

    /// Returns the first value of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value of `name`, or an empty slice when it is absent.
    pub fn get_values(&self, name: &str) -> &[String] {
        self.headers.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_multi_valued(&self, name: &str) -> bool {
        self.get_values(name).len() > 1
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Appends `value` to the values of `name`.
    pub fn add(&mut self, name: &str, value: &str) {
        match self.headers.get_mut(name) {
            Some(values) => values.push(value.to_string()),
            None => {
                self.headers.insert(name.to_string(), vec![value.to_string()]);
            }
        }
    }

    /// Replaces the values of `name` with `value`.
    ///
    /// `None` removes the header entirely.
    pub fn set(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.headers.insert(name.to_string(), vec![value.to_string()]);
            }
            None => {
                self.headers.shift_remove(name);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.headers.shift_remove(name)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Plain mapping view of the headers.
    pub fn as_map(&self) -> &IndexMap<String, Vec<String>> {
        &self.headers
    }

    /// Parses the first `Content-Length` value.
    pub fn content_length(&self) -> Result<Option<u64>, HeaderError> {
        self.get(CONTENT_LENGTH)
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| HeaderError::InvalidContentLength(value.to_string()))
            })
            .transpose()
    }

    /// Parses the first `Last-Modified` value as an HTTP date.
    pub fn last_modified(&self) -> Result<Option<SystemTime>, HeaderError> {
        self.get(LAST_MODIFIED)
            .map(|value| {
                httpdate::parse_http_date(value.trim()).map_err(|source| HeaderError::InvalidDate {
                    value: value.to_string(),
                    source,
                })
            })
            .transpose()
    }
}

impl From<IndexMap<String, Vec<String>>> for HeaderMap {
    fn from(headers: IndexMap<String, Vec<String>>) -> Self {
        Self::from_map(headers)
    }
}

impl From<HeaderMap> for IndexMap<String, Vec<String>> {
    fn from(headers: HeaderMap) -> Self {
        headers.headers
    }
}

impl<N: AsRef<str>, V: AsRef<str>> Extend<(N, V)> for HeaderMap {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.add(name.as_ref(), value.as_ref());
        }
    }
}

impl<N: AsRef<str>, V: AsRef<str>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut headers = HeaderMap::with_capacity(iter.size_hint().0);
        headers.extend(iter);
        headers
    }
}

/// Diagnostic form, `name=value ` for every value. Not an HTTP serialization.
impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in &self.headers {
            for value in values {
                write!(f, "{}={} ", name, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_add_keeps_order() {
        let mut headers = HeaderMap::new();
        headers.add("X", "a");
        headers.add("X", "b");

        assert_eq!(headers.get_values("X"), ["a", "b"]);
        assert_eq!(headers.get("X"), Some("a"));
        assert!(headers.is_multi_valued("X"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_set_replaces_and_removes() {
        let mut headers = HeaderMap::new();
        headers.add("X", "a");
        headers.add("X", "b");

        headers.set("X", Some("c"));
        assert_eq!(headers.get_values("X"), ["c"]);
        assert!(!headers.is_multi_valued("X"));

        headers.set("X", None);
        assert_eq!(headers.get("X"), None);
        assert!(!headers.names().contains(&"X"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let headers = HeaderMap::new();
        assert_eq!(headers.get("Missing"), None);
        assert!(headers.get_values("Missing").is_empty());
        assert!(!headers.is_multi_valued("Missing"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut headers = HeaderMap::new();
        headers.set(CONTENT_TYPE, Some("text/html"));
        headers.set("content-type", Some("text/plain"));

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Type"), Some("text/html"));
        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), None);
    }

    #[test]
    fn test_display() {
        let mut headers = HeaderMap::new();
        headers.add("A", "1");
        headers.add("B", "2");
        headers.add("A", "3");

        assert_eq!(headers.to_string(), "A=1 A=3 B=2 ");
        assert_eq!(HeaderMap::new().to_string(), "");
    }

    #[test]
    fn test_from_map_drops_empty_lists() {
        let mut map = IndexMap::new();
        map.insert("Location".to_string(), vec!["/next".to_string()]);
        map.insert("Empty".to_string(), Vec::new());

        let headers = HeaderMap::from_map(map);
        assert_eq!(headers.names(), ["Location"]);
        assert_eq!(headers.get(LOCATION), Some("/next"));
    }

    #[test]
    fn test_content_length() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.content_length().unwrap(), None);

        headers.set(CONTENT_LENGTH, Some(" 1024 "));
        assert_eq!(headers.content_length().unwrap(), Some(1024));

        headers.set(CONTENT_LENGTH, Some("lots"));
        assert!(matches!(
            headers.content_length(),
            Err(HeaderError::InvalidContentLength(value)) if value == "lots"
        ));
    }

    #[test]
    fn test_last_modified() {
        let mut headers = HeaderMap::new();
        headers.set(LAST_MODIFIED, Some("Sun, 06 Nov 1994 08:49:37 GMT"));
        assert_eq!(
            headers.last_modified().unwrap(),
            Some(UNIX_EPOCH + Duration::from_secs(784111777))
        );

        headers.set(LAST_MODIFIED, Some("yesterday"));
        assert!(matches!(
            headers.last_modified(),
            Err(HeaderError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_deserialize_drops_empty_lists() {
        let headers: HeaderMap = toml::from_str(
            r#"
            X = []
            Accept = ["text/html", "application/xhtml+xml"]
            "#,
        )
        .unwrap();

        assert_eq!(headers.names(), ["Accept"]);
        assert!(!headers.contains("X"));
        assert!(headers.is_multi_valued("Accept"));
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let mut headers = HeaderMap::with_capacity(4);
        assert!(headers.is_empty());

        headers.add(LOCATION, "/a");
        assert_eq!(headers.len(), 1);
    }
}
