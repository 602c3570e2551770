//! Authentication service
//!
//! The only place besides the client facade that mutates the session.

use crate::error::ClientResult;
use crate::http::{HttpClient, RequestOptions};
use bookstore_core::types::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RegisterClientRequest,
};
use bookstore_core::validation::validate_email;
use bookstore_core::{Role, UserProfile};
use reqwest::Method;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutRequest {
    refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Log in and persist the new session
    pub async fn login(&self, email: &str, password: &str, role: Role) -> ClientResult<UserProfile> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            role,
        };
        request.validate()?;

        let options = RequestOptions::new().anonymous().json(&request)?;
        let response: LoginResponse = self.http.post("/auth/login", options).await?;

        let user = response
            .user
            .clone()
            .unwrap_or_else(|| UserProfile::new(&request.email));
        self.http
            .session()
            .store_login(&response.credentials(), &user, role)
            .await?;

        info!(%role, "Logged in");
        Ok(user)
    }

    /// Tell the server to revoke the refresh token, then clear the local session
    ///
    /// The local session is cleared even when the server call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let session = self.http.session();

        if let Some(refresh_token) = session.refresh_token().await? {
            let options = RequestOptions::new()
                .skip_refresh()
                .json(&LogoutRequest { refresh_token })?;
            if let Err(e) = self
                .http
                .send_empty(Method::POST, "/auth/logout", options)
                .await
            {
                warn!(error = %e, "Logout request failed, clearing local session anyway");
            }
        }

        session.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Ask the server to mail a password reset code
    pub async fn forgot_password(&self, email: &str) -> ClientResult<()> {
        validate_email(email)?;
        let options = RequestOptions::new().anonymous().json(&ForgotPasswordRequest {
            email: email.trim().to_string(),
        })?;
        self.http
            .send_empty(Method::POST, "/auth/forgot-password", options)
            .await
    }

    /// Apply a reset code and set a new password
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        request.validate()?;
        let options = RequestOptions::new().anonymous().json(request)?;
        self.http
            .send_empty(Method::POST, "/auth/change-password", options)
            .await
    }

    /// Create a customer account
    pub async fn register_client(&self, request: &RegisterClientRequest) -> ClientResult<()> {
        request.validate()?;
        let options = RequestOptions::new().anonymous().json(request)?;
        self.http
            .send_empty(Method::POST, "/auth/register/client", options)
            .await
    }

    /// Identity and role of the logged-in user, if any
    pub async fn current_user(&self) -> ClientResult<Option<(UserProfile, Role)>> {
        let session = self.http.session();
        if !session.is_authenticated().await? {
            return Ok(None);
        }
        Ok(match (session.user().await?, session.role().await?) {
            (Some(user), Some(role)) => Some((user, role)),
            _ => None,
        })
    }
}
