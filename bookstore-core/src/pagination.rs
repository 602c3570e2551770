//! Pagination and sorting types shared by every list endpoint

use crate::error::{ValidationError, ValidationResult};
use crate::filter::FilterState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of items requested per page, shared by every list view
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed to hold `total_count` items
///
/// Returns 0 when `page_size` is 0.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete sort sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    #[serde(rename = "sortBy")]
    pub field: String,
    #[serde(rename = "sortOrder")]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    /// Value of the `sort` query parameter, e.g. `name,asc`
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.field, self.order)
    }
}

/// Maps human-readable sort labels to concrete sorts
///
/// Labels keep their insertion order so they can be listed as choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOptionMap {
    options: Vec<(String, SortSpec)>,
}

impl SortOptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label, replacing any previous mapping for it
    pub fn with(mut self, label: impl Into<String>, spec: SortSpec) -> Self {
        let label = label.into();
        match self.options.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = spec,
            None => self.options.push((label, spec)),
        }
        self
    }

    /// Resolve a label; empty or unknown labels resolve to no sort
    pub fn resolve(&self, label: &str) -> Option<&SortSpec> {
        self.options
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, spec)| spec)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SortSpec)> {
        self.options.iter().map(|(l, s)| (l.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// One page worth of request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    pub page_size: u32,
    pub filter: FilterState,
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> ValidationResult<Self> {
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(Self {
            page,
            page_size,
            filter: FilterState::default(),
            sort: None,
        })
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// `page`, `size` and (when resolved) `sort` query pairs
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.page_size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.to_query_value()));
        }
        pairs
    }
}

/// Pagination metadata as returned by list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

/// Normalized page of results, independent of resource kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    /// Build a page, enforcing `items.len() <= page_size` and the page count invariant
    pub fn new(mut items: Vec<T>, total_count: u64, page_size: u32) -> Self {
        if page_size > 0 && items.len() > page_size as usize {
            tracing::warn!(
                received = items.len(),
                page_size,
                "Server returned more items than requested, truncating"
            );
            items.truncate(page_size as usize);
        }
        Self {
            items,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}
