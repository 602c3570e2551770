//! Staff account service

use super::{fetch_page, passthrough_filters, segment};
use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};
use bookstore_core::validation::{require, validate_email, validate_password};
use bookstore_core::{Employee, EmployeeUpdate, NewEmployee, PageRequest, PageResult};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct EmployeeService {
    http: HttpClient,
}

impl EmployeeService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, request: &PageRequest) -> ClientResult<PageResult<Employee>> {
        fetch_page(
            &self.http,
            "/employees",
            "employees",
            request,
            passthrough_filters(request),
        )
        .await
    }

    pub async fn get(&self, email: &str) -> ClientResult<Employee> {
        self.http
            .get(&format!("/employees/{}", segment(email)), RequestOptions::new())
            .await
    }

    pub async fn create(&self, employee: &NewEmployee) -> ClientResult<()> {
        validate_email(&employee.email)?;
        validate_password(&employee.password)?;
        require("name", &employee.name)?;
        let options = RequestOptions::new().json(employee)?;
        self.http.send_empty(Method::POST, "/employees", options).await
    }

    pub async fn update(&self, email: &str, update: &EmployeeUpdate) -> ClientResult<()> {
        let options = RequestOptions::new().json(update)?;
        self.http
            .send_empty(Method::PUT, &format!("/employees/{}", segment(email)), options)
            .await
    }

    pub async fn delete(&self, email: &str) -> ClientResult<()> {
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/employees/{}", segment(email)),
                RequestOptions::new(),
            )
            .await
    }
}
