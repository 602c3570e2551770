//! Query-string backed filter state
//!
//! The navigable location's query string is the source of truth for the
//! current filters, the sort label and the page number. [`QueryParams`] is
//! that query string; [`FilterState`] is the total view of it a list page
//! works with.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Reserved filter key holding the human-readable sort label
pub const SORT_KEY: &str = "sort";

/// Query parameter holding the 1-based page number
pub const PAGE_KEY: &str = "page";

/// Parse a 1-based page parameter; missing, non-numeric, zero or negative values yield 1
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// A parsed query string
///
/// Serializes with filter keys in sorted order and `page` last, so the same
/// parameters always produce the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`
    ///
    /// Later occurrences of a key win.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(pair), String::new()),
            })
            .collect();
        Self { params }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The 1-based page number, defaulting to 1
    pub fn page(&self) -> u32 {
        parse_page(self.get(PAGE_KEY))
    }

    /// Set a key; an empty value removes it
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.params.remove(&key);
        } else {
            self.params.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Copy with one filter set (or removed when empty) and the page reset to 1
    pub fn with_filter(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.set(key, value);
        next.params.insert(PAGE_KEY.to_string(), "1".to_string());
        next
    }

    /// Copy with the page set to `page`
    pub fn with_page(&self, page: u32) -> Self {
        let mut next = self.clone();
        next.params.insert(PAGE_KEY.to_string(), page.to_string());
        next
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters = self.params.iter().filter(|(k, _)| k.as_str() != PAGE_KEY);
        let page = self.params.get_key_value(PAGE_KEY);

        for (i, (key, value)) in filters.chain(page).enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

/// Current value of every filter a list page knows about
///
/// Every known key is always present; an empty string means "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    /// Read `keys` from the query string, defaulting missing ones to empty
    pub fn from_params(params: &QueryParams, keys: &[&str]) -> Self {
        let values = keys
            .iter()
            .map(|key| {
                (
                    key.to_string(),
                    params.get(key).unwrap_or_default().to_string(),
                )
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Optional non-empty value of a filter
    pub fn value(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn sort_label(&self) -> &str {
        self.get(SORT_KEY)
    }

    /// Non-empty filters, excluding the sort label
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(k, v)| k.as_str() != SORT_KEY && !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Query string representation, omitting empty values
    pub fn to_params(&self) -> QueryParams {
        QueryParams::from_pairs(
            self.values
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}
