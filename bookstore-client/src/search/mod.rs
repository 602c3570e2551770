//! Generic paginated search controller
//!
//! Separates how a resource is fetched, filtered and sorted (a
//! [`SearchSource`]) from how a page of results is shown. The query string
//! drives everything: each cycle re-reads the page and filters from it.
//!
//! Cycles may overlap. Each one takes a generation number and only the
//! latest generation is allowed to write its result; older responses are
//! dropped.

mod sources;

pub use sources::{
    BookSearchSource, ClientListing, ClientSearchSource, EmployeeSearchSource, OrderScope,
    OrderSearchSource,
};

use crate::error::ClientResult;
use async_trait::async_trait;
use bookstore_core::{
    FilterState, PageRequest, PageResult, QueryParams, SortOptionMap, PAGE_SIZE,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// How one resource kind is searched
#[async_trait]
pub trait SearchSource: Send + Sync {
    type Item: Clone + Send + Sync;

    /// Total: every known filter key is present, missing ones are empty
    fn filter_from_params(&self, params: &QueryParams) -> FilterState;

    /// Resolves the `sort` filter label to a concrete sort
    fn sort_options(&self) -> &SortOptionMap;

    async fn fetch_page(&self, request: PageRequest) -> ClientResult<PageResult<Self::Item>>;
}

/// What a results page renders from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState<T> {
    pub loading: bool,
    pub error: bool,
    pub error_message: Option<String>,
    /// 1-based page shown
    pub current_page: u32,
    /// 1-based page of the latest cycle
    pub page_to_fetch: u32,
    pub total_pages: u32,
    pub total_results: u64,
    /// Kept on failure, so the last good results stay visible
    pub items: Vec<T>,
    pub filter: FilterState,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: false,
            error_message: None,
            current_page: 1,
            page_to_fetch: 1,
            total_pages: 0,
            total_results: 0,
            items: Vec::new(),
            filter: FilterState::default(),
        }
    }
}

struct Inner<T> {
    state: SearchState<T>,
    generation: u64,
    location: Option<QueryParams>,
    refresh_trigger: u64,
}

pub struct SearchController<S: SearchSource> {
    source: S,
    page_size: u32,
    inner: Mutex<Inner<S::Item>>,
}

impl<S: SearchSource> SearchController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            page_size: PAGE_SIZE,
            inner: Mutex::new(Inner {
                state: SearchState::default(),
                generation: 0,
                location: None,
                refresh_trigger: 0,
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> SearchState<S::Item> {
        self.inner.lock().await.state.clone()
    }

    /// First cycle, when the results page is opened
    pub async fn mount(&self, params: &QueryParams) {
        self.fetch(params).await;
    }

    /// Refetch if the query string differs from the last one seen; returns whether it did
    pub async fn location_changed(&self, params: &QueryParams) -> bool {
        if self.inner.lock().await.location.as_ref() == Some(params) {
            return false;
        }
        self.fetch(params).await;
        true
    }

    /// Refetch with the last query string whenever `trigger` changes
    ///
    /// Used after a create, update or delete made elsewhere.
    pub async fn set_refresh_trigger(&self, trigger: u64) -> bool {
        let params = {
            let mut inner = self.inner.lock().await;
            if inner.refresh_trigger == trigger {
                return false;
            }
            inner.refresh_trigger = trigger;
            inner.location.clone().unwrap_or_default()
        };
        self.fetch(&params).await;
        true
    }

    /// Run one fetch cycle for `params`
    ///
    /// Never fails: errors end up in the state.
    pub async fn fetch(&self, params: &QueryParams) {
        let page = params.page();
        let filter = self.source.filter_from_params(params);
        let sort = self
            .source
            .sort_options()
            .resolve(filter.sort_label())
            .cloned();

        let generation = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            inner.location = Some(params.clone());

            let state = &mut inner.state;
            state.loading = true;
            state.error = false;
            state.error_message = None;
            state.current_page = page;
            state.page_to_fetch = page;
            state.filter = filter.clone();
            inner.generation
        };

        let request = PageRequest {
            page: page - 1,
            page_size: self.page_size,
            filter,
            sort,
        };
        debug!(generation, page, "Fetching results page");
        let result = self.source.fetch_page(request).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!(
                generation,
                latest = inner.generation,
                "Discarding superseded response"
            );
            return;
        }

        let state = &mut inner.state;
        state.loading = false;
        match result {
            Ok(page) => {
                state.error = false;
                state.items = page.items;
                state.total_pages = page.total_pages;
                state.total_results = page.total_count;
            }
            Err(e) => {
                warn!(error = %e, "Loading results failed");
                state.error = true;
                state.error_message = Some(e.user_message());
            }
        }
    }

    /// Query string with one filter changed; always returns to page 1
    pub fn set_filter(&self, params: &QueryParams, key: &str, value: &str) -> QueryParams {
        params.with_filter(key, value)
    }

    /// Query string pointing at `page`; the caller keeps it within `[1, total_pages]`
    pub fn select_page(&self, params: &QueryParams, page: u32) -> QueryParams {
        params.with_page(page.max(1))
    }

    /// Query string for the next page, never past the last one
    pub async fn show_more(&self, params: &QueryParams) -> QueryParams {
        let inner = self.inner.lock().await;
        let last = inner.state.total_pages.max(1);
        let next = inner.state.page_to_fetch.saturating_add(1).min(last);
        params.with_page(next)
    }
}
