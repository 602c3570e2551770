//! Order service

use super::{fetch_page, passthrough_filters, segment};
use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};
use bookstore_core::validation::validate_email;
use bookstore_core::{
    Basket, NewOrder, Order, OrderAssignment, PageRequest, PageResult, ValidationError,
};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct OrderService {
    http: HttpClient,
}

impl OrderService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Every order, for staff
    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<Order>> {
        fetch_page(
            &self.http,
            "/orders",
            "orders",
            request,
            passthrough_filters(request),
        )
        .await
    }

    /// Orders placed by one customer
    pub async fn list_for_client(
        &self,
        email: &str,
        request: &PageRequest,
    ) -> ClientResult<PageResult<Order>> {
        let path = format!("/clients/{}/orders", segment(email));
        fetch_page(&self.http, &path, "orders", request, passthrough_filters(request)).await
    }

    /// Orders assigned to one staff member
    pub async fn list_for_employee(
        &self,
        email: &str,
        request: &PageRequest,
    ) -> ClientResult<PageResult<Order>> {
        let path = format!("/employees/{}/orders", segment(email));
        fetch_page(&self.http, &path, "orders", request, passthrough_filters(request)).await
    }

    /// `POST /orders`
    pub async fn place(&self, order: &NewOrder) -> ClientResult<()> {
        validate_email(&order.client_email)?;
        if order.book_items.is_empty() {
            return Err(ValidationError::EmptyBasket.into());
        }
        if order.book_items.iter().any(|item| item.quantity == 0) {
            return Err(ValidationError::InvalidQuantity.into());
        }
        let options = RequestOptions::new().json(order)?;
        self.http.send_empty(Method::POST, "/orders", options).await
    }

    /// Place the basket's contents as one order and empty it on success
    pub async fn checkout(&self, basket: &mut Basket, client_email: &str) -> ClientResult<()> {
        let order = basket.to_order(client_email)?;
        self.place(&order).await?;
        basket.clear();
        Ok(())
    }

    /// `PUT /orders`: hand an order to a staff member
    pub async fn assign(&self, assignment: &OrderAssignment) -> ClientResult<()> {
        validate_email(&assignment.employee_email)?;
        let options = RequestOptions::new().json(assignment)?;
        self.http.send_empty(Method::PUT, "/orders", options).await
    }
}
