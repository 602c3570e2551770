//! Catalog service

use super::{fetch_page, segment};
use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};
use bookstore_core::{Book, BookSearch, PageRequest, PageResult};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct BookService {
    http: HttpClient,
}

impl BookService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /books`
    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<Book>> {
        fetch_page(&self.http, "/books", "books", request, Vec::new()).await
    }

    /// `GET /books/search`, sending only the filters that are set
    pub async fn search(&self, request: &PageRequest) -> ClientResult<PageResult<Book>> {
        let search = BookSearch::from_filter(&request.filter);
        fetch_page(
            &self.http,
            "/books/search",
            "books",
            request,
            search.query_pairs(),
        )
        .await
    }

    pub async fn get(&self, name: &str) -> ClientResult<Book> {
        self.http
            .get(&format!("/books/{}", segment(name)), RequestOptions::new())
            .await
    }

    pub async fn create(&self, book: &Book) -> ClientResult<()> {
        book.validate()?;
        let options = RequestOptions::new().json(book)?;
        self.http.send_empty(Method::POST, "/books", options).await
    }

    pub async fn update(&self, name: &str, book: &Book) -> ClientResult<()> {
        book.validate()?;
        let options = RequestOptions::new().json(book)?;
        self.http
            .send_empty(Method::PUT, &format!("/books/{}", segment(name)), options)
            .await
    }

    pub async fn delete(&self, name: &str) -> ClientResult<()> {
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/books/{}", segment(name)),
                RequestOptions::new(),
            )
            .await
    }
}
