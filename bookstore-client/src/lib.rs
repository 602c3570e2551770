//! Bookstore Client Library
//!
//! Talks to the bookstore REST backend: an authenticated HTTP facade with
//! token refresh, one service per resource, and a generic paginated search
//! controller driven by query-string state.

pub mod config;
pub mod error;
pub mod http;
pub mod search;
pub mod services;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, RequestOptions};
pub use search::{
    BookSearchSource, ClientListing, ClientSearchSource, EmployeeSearchSource, OrderScope,
    OrderSearchSource, SearchController, SearchSource, SearchState,
};
pub use services::{AuthService, BookService, ClientService, EmployeeService, OrderService};

use bookstore_core::Session;

/// One configured client with access to every service
#[derive(Debug, Clone)]
pub struct Bookstore {
    http: HttpClient,
}

impl Bookstore {
    pub fn new(config: ClientConfig, session: Session) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config, session)?,
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &Session {
        self.http.session()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.http.clone())
    }

    pub fn books(&self) -> BookService {
        BookService::new(self.http.clone())
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.http.clone())
    }

    pub fn clients(&self) -> ClientService {
        ClientService::new(self.http.clone())
    }

    pub fn employees(&self) -> EmployeeService {
        EmployeeService::new(self.http.clone())
    }

    pub fn book_search(&self) -> SearchController<BookSearchSource> {
        SearchController::new(BookSearchSource::new(self.books()))
    }

    pub fn order_search(&self, scope: OrderScope) -> SearchController<OrderSearchSource> {
        SearchController::new(OrderSearchSource::new(self.orders(), scope))
    }

    pub fn client_search(&self, listing: ClientListing) -> SearchController<ClientSearchSource> {
        SearchController::new(ClientSearchSource::new(self.clients(), listing))
    }

    pub fn employee_search(&self) -> SearchController<EmployeeSearchSource> {
        SearchController::new(EmployeeSearchSource::new(self.employees()))
    }
}
