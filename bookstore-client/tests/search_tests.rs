//! SearchController tests against an in-memory source
//!
//! Tests for:
//! - Query string to request translation
//! - Out-of-range pages
//! - Keeping results visible after a failure
//! - Discarding superseded responses
//! - Refresh triggers and location changes

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bookstore_client::{ClientError, ClientResult, SearchController, SearchSource};
use bookstore_core::{
    FilterState, PageRequest, PageResult, QueryParams, SortOptionMap, SortSpec, PAGE_SIZE,
};

const KEYS: &[&str] = &["genre", "sort"];

/// Serves `total` numbered items; pages listed in `slow_pages` answer late
struct FakeSource {
    total: u32,
    sort_options: SortOptionMap,
    requests: Arc<Mutex<Vec<PageRequest>>>,
    slow_pages: Vec<u32>,
    failing: Arc<Mutex<bool>>,
}

impl FakeSource {
    fn new(total: u32) -> Self {
        Self {
            total,
            sort_options: SortOptionMap::new().with("name (A-Z)", SortSpec::asc("name")),
            requests: Arc::new(Mutex::new(Vec::new())),
            slow_pages: Vec::new(),
            failing: Arc::new(Mutex::new(false)),
        }
    }
}

#[async_trait]
impl SearchSource for FakeSource {
    type Item = u32;

    fn filter_from_params(&self, params: &QueryParams) -> FilterState {
        FilterState::from_params(params, KEYS)
    }

    fn sort_options(&self) -> &SortOptionMap {
        &self.sort_options
    }

    async fn fetch_page(&self, request: PageRequest) -> ClientResult<PageResult<u32>> {
        self.requests.lock().unwrap().push(request.clone());
        if self.slow_pages.contains(&request.page) {
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        if *self.failing.lock().unwrap() {
            return Err(ClientError::http(500, ""));
        }
        let start = request.page * request.page_size;
        let items = (start..self.total.min(start + request.page_size)).collect();
        Ok(PageResult::new(items, self.total as u64, request.page_size))
    }
}

#[tokio::test]
async fn test_fetch_translates_query_string() {
    let source = FakeSource::new(23);
    let requests = source.requests.clone();
    let controller = SearchController::new(source);

    controller
        .mount(&QueryParams::parse("genre=Fiction&sort=name%20(A-Z)&page=2"))
        .await;

    let request = requests.lock().unwrap()[0].clone();
    assert_eq!(request.page, 1);
    assert_eq!(request.page_size, PAGE_SIZE);
    assert_eq!(request.filter.get("genre"), "Fiction");
    assert_eq!(request.sort, Some(SortSpec::asc("name")));

    let state = controller.state().await;
    assert_eq!(state.items, (10..20).collect::<Vec<_>>());
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.total_results, 23);
    assert_eq!(state.current_page, 2);
    assert_eq!(state.filter.get("genre"), "Fiction");
}

#[tokio::test]
async fn test_unknown_sort_label_sends_no_sort() {
    let source = FakeSource::new(5);
    let requests = source.requests.clone();
    let controller = SearchController::new(source);

    controller.mount(&QueryParams::parse("sort=shuffle")).await;

    assert_eq!(requests.lock().unwrap()[0].sort, None);
}

#[tokio::test]
async fn test_invalid_page_falls_back_to_first() {
    let source = FakeSource::new(5);
    let requests = source.requests.clone();
    let controller = SearchController::new(source);

    controller.mount(&QueryParams::parse("page=abc")).await;
    controller.fetch(&QueryParams::parse("page=-3")).await;

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].page, 0);
    assert_eq!(requests[1].page, 0);
}

#[tokio::test]
async fn test_out_of_range_page_is_fetched_and_empty() {
    let controller = SearchController::new(FakeSource::new(23));

    controller.mount(&QueryParams::parse("page=4")).await;

    let state = controller.state().await;
    assert!(state.items.is_empty());
    assert!(!state.error);
    assert!(!state.loading);
    assert_eq!(state.current_page, 4);
    assert_eq!(state.total_pages, 3);
}

#[tokio::test]
async fn test_failure_keeps_previous_items() {
    let source = FakeSource::new(23);
    let failing = source.failing.clone();
    let controller = SearchController::new(source);

    controller.mount(&QueryParams::parse("page=1")).await;
    *failing.lock().unwrap() = true;
    controller.fetch(&QueryParams::parse("page=2")).await;

    let state = controller.state().await;
    assert!(state.error);
    assert!(!state.loading);
    assert_eq!(state.error_message.as_deref(), Some("The server ran into a problem"));
    assert_eq!(state.items, (0..10).collect::<Vec<_>>());

    *failing.lock().unwrap() = false;
    controller.fetch(&QueryParams::parse("page=2")).await;
    let state = controller.state().await;
    assert!(!state.error);
    assert_eq!(state.error_message, None);
    assert_eq!(state.items, (10..20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let mut source = FakeSource::new(23);
    source.slow_pages = vec![0];
    let controller = SearchController::new(source);

    // Page 1 answers after page 2; only page 2 may land
    let first = QueryParams::parse("page=1");
    let second = QueryParams::parse("page=2");
    tokio::join!(controller.fetch(&first), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.fetch(&second).await;
    });

    let state = controller.state().await;
    assert_eq!(state.page_to_fetch, 2);
    assert_eq!(state.items, (10..20).collect::<Vec<_>>());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_location_changed_only_refetches_on_change() {
    let source = FakeSource::new(23);
    let requests = source.requests.clone();
    let controller = SearchController::new(source);

    let params = QueryParams::parse("genre=Fiction");
    controller.mount(&params).await;
    assert!(!controller.location_changed(&params).await);
    assert!(
        controller
            .location_changed(&params.with_filter("genre", "Poetry"))
            .await
    );

    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_refresh_trigger_refetches_last_location() {
    let source = FakeSource::new(23);
    let requests = source.requests.clone();
    let controller = SearchController::new(source);

    controller.mount(&QueryParams::parse("page=3")).await;
    assert!(controller.set_refresh_trigger(1).await);
    assert!(!controller.set_refresh_trigger(1).await);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].page, 2);
}

#[tokio::test]
async fn test_navigation_helpers() {
    let controller = SearchController::new(FakeSource::new(23));
    let params = QueryParams::parse("genre=Fiction&page=2");
    controller.mount(&params).await;

    let filtered = controller.set_filter(&params, "genre", "Poetry");
    assert_eq!(filtered.to_string(), "genre=Poetry&page=1");

    let selected = controller.select_page(&params, 3);
    assert_eq!(selected.page(), 3);

    assert_eq!(controller.show_more(&params).await.page(), 3);
    controller.fetch(&QueryParams::parse("page=3")).await;
    assert_eq!(controller.show_more(&params).await.page(), 3);
}
