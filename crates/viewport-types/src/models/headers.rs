//! Read-only request header mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Case-insensitive string header mapping as seen by the detector.
///
/// Keys are stored lowercased; a later insert for the same name replaces the
/// earlier value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "BTreeMap<String, String>")]
pub struct RequestHeaders(BTreeMap<String, String>);

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Header value by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(value) => Some(value.as_str()),
            None => self.0.get(&name.to_ascii_lowercase()).map(String::as_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for RequestHeaders {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RequestHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let headers: RequestHeaders = [("User-Agent", "curl/8.0")].into_iter().collect();
        assert_eq!(headers.get("user-agent"), Some("curl/8.0"));
        assert_eq!(headers.get("USER-AGENT"), Some("curl/8.0"));
        assert_eq!(headers.get("cookie"), None);
    }

    #[test]
    fn test_deserialize_lowercases_keys() {
        let headers: RequestHeaders =
            serde_json::from_str(r#"{"CF-Device-Type":"tablet"}"#).unwrap();
        assert_eq!(headers.get("cf-device-type"), Some("tablet"));
    }
}
