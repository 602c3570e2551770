//! Per-resource services over the HTTP client facade
//!
//! Services validate input, build paths and query pairs, and normalize list
//! responses. They never catch errors.

mod auth;
mod books;
mod clients;
mod employees;
mod orders;

pub use auth::AuthService;
pub use books::BookService;
pub use clients::ClientService;
pub use employees::EmployeeService;
pub use orders::OrderService;

use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};
use bookstore_core::{PageMeta, PageRequest, PageResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Percent-encode a single path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `{meta: {...}, <resource>: [...]}` list envelope
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    meta: PageMeta,

    #[serde(flatten)]
    collections: serde_json::Map<String, serde_json::Value>,
}

impl ListEnvelope {
    fn into_page<T: DeserializeOwned>(
        mut self,
        resource: &str,
        page_size: u32,
    ) -> ClientResult<PageResult<T>> {
        let items: Vec<T> = match self.collections.remove(resource) {
            Some(value) if !value.is_null() => serde_json::from_value(value)?,
            _ => Vec::new(),
        };
        Ok(PageResult::new(items, self.meta.total_count, page_size))
    }
}

/// GET a paginated list and normalize it
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    http: &HttpClient,
    path: &str,
    resource: &str,
    request: &PageRequest,
    filters: Vec<(String, String)>,
) -> ClientResult<PageResult<T>> {
    let options = RequestOptions::new()
        .query(filters)
        .query(request.query_pairs());
    let envelope: ListEnvelope = http.get(path, options).await?;
    envelope.into_page(resource, request.page_size)
}

/// Non-empty filters other than the sort label, sent as-is
pub(crate) fn passthrough_filters(request: &PageRequest) -> Vec<(String, String)> {
    request
        .filter
        .active()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
