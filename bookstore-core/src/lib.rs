//! Bookstore Core Library
//!
//! Shared data model for the bookstore client: resource types, pagination and
//! sorting, query-string filter state, client-side validation and the
//! persisted session store.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod session;
pub mod types;
pub mod validation;

pub use error::{SessionError, SessionResult, ValidationError, ValidationResult};
pub use filter::{parse_page, FilterState, QueryParams, PAGE_KEY, SORT_KEY};
pub use pagination::{
    total_pages, PageMeta, PageRequest, PageResult, SortOptionMap, SortOrder, SortSpec, PAGE_SIZE,
};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use types::{
    Basket, BasketLine, Book, BookItem, BookSearch, Client, ClientUpdate, Employee,
    EmployeeUpdate, NewEmployee, NewOrder, Order, OrderAssignment, Role, SessionCredentials,
    UserProfile,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_search_page_end_to_end() {
        let mut filter = FilterState::from_params(&QueryParams::new(), types::BOOK_FILTER_KEYS);
        filter.set("genre", "Fiction");
        filter.set(SORT_KEY, "name (A-Z)");

        let sort_options =
            SortOptionMap::new().with("name (A-Z)", SortSpec::new("name", SortOrder::Asc));
        let request = PageRequest::new(0, PAGE_SIZE)
            .unwrap()
            .with_sort(sort_options.resolve(filter.sort_label()).cloned())
            .with_filter(filter.clone());

        assert_eq!(request.sort, Some(SortSpec::asc("name")));
        assert_eq!(
            BookSearch::from_filter(&request.filter).query_pairs(),
            vec![("genre".to_string(), "Fiction".to_string())]
        );
    }
}
