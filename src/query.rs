//! Query-string editing on absolute URLs.
//!
//! Mirrors the small set of operations the player pages need: look a key up, set it,
//! append to it, or drop it, then hand back an href to navigate to.

use crate::error::{PlayerError, Result};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUrl {
    url: Url,
}

impl QueryUrl {
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|source| PlayerError::InvalidUrl {
            url: href.to_string(),
            source,
        })?;
        Ok(Self { url })
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn href(&self) -> String {
        self.url.to_string()
    }

    /// Decoded query pairs in order. Two URLs whose pairs are equal load the same page
    /// even when their encodings differ.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn write_pairs(&mut self, pairs: Vec<(String, String)>) {
        if pairs.is_empty() {
            self.url.set_query(None);
            return;
        }
        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    pub fn has(&self, key: &str) -> bool {
        self.url.query_pairs().any(|(k, _)| k == key)
    }

    /// First value for `key`, if any.
    pub fn first(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn values(&self, key: &str) -> Vec<String> {
        self.url
            .query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    /// Replace every occurrence of `key` with a single pair, keeping the position of
    /// the first occurrence. Appends when the key is absent.
    pub fn set(&mut self, key: &str, value: &str) {
        if self.values(key) == [value] {
            return;
        }
        let mut seen = false;
        let mut pairs = Vec::new();
        for (k, v) in self.pairs() {
            if k != key {
                pairs.push((k, v));
            } else if !seen {
                seen = true;
                pairs.push((k, value.to_string()));
            }
        }
        if !seen {
            pairs.push((key.to_string(), value.to_string()));
        }
        self.write_pairs(pairs);
    }

    pub fn append(&mut self, key: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        if !self.has(key) {
            return;
        }
        let pairs = self.pairs().into_iter().filter(|(k, _)| k != key).collect();
        self.write_pairs(pairs);
    }

    /// Drop only the `key=value` pairs, leaving other values of `key` in place.
    pub fn remove_value(&mut self, key: &str, value: &str) {
        if !self.values(key).iter().any(|v| v == value) {
            return;
        }
        let pairs = self
            .pairs()
            .into_iter()
            .filter(|(k, v)| !(k == key && v == value))
            .collect();
        self.write_pairs(pairs);
    }
}

impl std::fmt::Display for QueryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
