//! Customer account service

use super::{fetch_page, passthrough_filters, segment};
use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};
use bookstore_core::{Client, ClientUpdate, PageRequest, PageResult};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct ClientService {
    http: HttpClient,
}

impl ClientService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<Client>> {
        fetch_page(
            &self.http,
            "/clients",
            "clients",
            request,
            passthrough_filters(request),
        )
        .await
    }

    /// `GET /clients/blocked`
    pub async fn blocked(&self, request: &PageRequest) -> ClientResult<PageResult<Client>> {
        fetch_page(
            &self.http,
            "/clients/blocked",
            "clients",
            request,
            passthrough_filters(request),
        )
        .await
    }

    pub async fn get(&self, email: &str) -> ClientResult<Client> {
        self.http
            .get(&format!("/clients/{}", segment(email)), RequestOptions::new())
            .await
    }

    pub async fn update(&self, email: &str, update: &ClientUpdate) -> ClientResult<()> {
        let options = RequestOptions::new().json(update)?;
        self.http
            .send_empty(Method::PUT, &format!("/clients/{}", segment(email)), options)
            .await
    }

    pub async fn delete(&self, email: &str) -> ClientResult<()> {
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/clients/{}", segment(email)),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn block(&self, email: &str) -> ClientResult<()> {
        self.http
            .send_empty(
                Method::POST,
                &format!("/clients/{}/block", segment(email)),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn unblock(&self, email: &str) -> ClientResult<()> {
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/clients/{}/unblock", segment(email)),
                RequestOptions::new(),
            )
            .await
    }
}
