//! Search sources for each listable resource

use super::SearchSource;
use crate::error::ClientResult;
use crate::services::{BookService, ClientService, EmployeeService, OrderService};
use async_trait::async_trait;
use bookstore_core::types::{
    account_sort_options, book_sort_options, order_sort_options, ACCOUNT_FILTER_KEYS,
    BOOK_FILTER_KEYS, ORDER_FILTER_KEYS,
};
use bookstore_core::{
    Book, Client, Employee, FilterState, Order, PageRequest, PageResult, QueryParams,
    SortOptionMap,
};

/// Catalog search; uses `/books/search` once any filter is set
#[derive(Debug, Clone)]
pub struct BookSearchSource {
    books: BookService,
    sort_options: SortOptionMap,
}

impl BookSearchSource {
    pub fn new(books: BookService) -> Self {
        Self {
            books,
            sort_options: book_sort_options(),
        }
    }

    pub fn with_sort_options(mut self, sort_options: SortOptionMap) -> Self {
        self.sort_options = sort_options;
        self
    }
}

#[async_trait]
impl SearchSource for BookSearchSource {
    type Item = Book;

    fn filter_from_params(&self, params: &QueryParams) -> FilterState {
        FilterState::from_params(params, BOOK_FILTER_KEYS)
    }

    fn sort_options(&self) -> &SortOptionMap {
        &self.sort_options
    }

    async fn fetch_page(&self, request: PageRequest) -> ClientResult<PageResult<Book>> {
        if request.filter.active().next().is_some() {
            self.books.search(&request).await
        } else {
            self.books.list(&request).await
        }
    }
}

/// Which orders an order listing shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    All,
    Client(String),
    Employee(String),
}

#[derive(Debug, Clone)]
pub struct OrderSearchSource {
    orders: OrderService,
    scope: OrderScope,
    sort_options: SortOptionMap,
}

impl OrderSearchSource {
    pub fn new(orders: OrderService, scope: OrderScope) -> Self {
        Self {
            orders,
            scope,
            sort_options: order_sort_options(),
        }
    }

    pub fn scope(&self) -> &OrderScope {
        &self.scope
    }
}

#[async_trait]
impl SearchSource for OrderSearchSource {
    type Item = Order;

    fn filter_from_params(&self, params: &QueryParams) -> FilterState {
        FilterState::from_params(params, ORDER_FILTER_KEYS)
    }

    fn sort_options(&self) -> &SortOptionMap {
        &self.sort_options
    }

    async fn fetch_page(&self, request: PageRequest) -> ClientResult<PageResult<Order>> {
        match &self.scope {
            OrderScope::All => self.orders.list(&request).await,
            OrderScope::Client(email) => self.orders.list_for_client(email, &request).await,
            OrderScope::Employee(email) => self.orders.list_for_employee(email, &request).await,
        }
    }
}

/// Which customer accounts a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientListing {
    All,
    Blocked,
}

#[derive(Debug, Clone)]
pub struct ClientSearchSource {
    clients: ClientService,
    listing: ClientListing,
    sort_options: SortOptionMap,
}

impl ClientSearchSource {
    pub fn new(clients: ClientService, listing: ClientListing) -> Self {
        Self {
            clients,
            listing,
            sort_options: account_sort_options(),
        }
    }
}

#[async_trait]
impl SearchSource for ClientSearchSource {
    type Item = Client;

    fn filter_from_params(&self, params: &QueryParams) -> FilterState {
        FilterState::from_params(params, ACCOUNT_FILTER_KEYS)
    }

    fn sort_options(&self) -> &SortOptionMap {
        &self.sort_options
    }

    async fn fetch_page(&self, request: PageRequest) -> ClientResult<PageResult<Client>> {
        match self.listing {
            ClientListing::All => self.clients.list(&request).await,
            ClientListing::Blocked => self.clients.blocked(&request).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeSearchSource {
    employees: EmployeeService,
    sort_options: SortOptionMap,
}

impl EmployeeSearchSource {
    pub fn new(employees: EmployeeService) -> Self {
        Self {
            employees,
            sort_options: account_sort_options(),
        }
    }
}

#[async_trait]
impl SearchSource for EmployeeSearchSource {
    type Item = Employee;

    fn filter_from_params(&self, params: &QueryParams) -> FilterState {
        FilterState::from_params(params, ACCOUNT_FILTER_KEYS)
    }

    fn sort_options(&self) -> &SortOptionMap {
        &self.sort_options
    }

    async fn fetch_page(&self, request: PageRequest) -> ClientResult<PageResult<Employee>> {
        self.employees.list(&request).await
    }
}
