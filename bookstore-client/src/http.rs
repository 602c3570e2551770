//! HTTP client facade
//!
//! Single egress point for backend calls. Attaches the persisted bearer
//! token, and on a 401 performs exactly one refresh-and-retry before giving
//! up. Concurrent 401s share one refresh: refreshes are serialized and a
//! caller that finds the token already replaced simply retries with it.
//! A rejected caller-supplied `Authorization` header always goes through a
//! real refresh, and the retry carries the session's new token.
//! Anonymous requests (login, registration, password reset) never carry the
//! token and never trigger a refresh.

use crate::config::{ClientConfig, REFRESH_PATH};
use crate::error::{ClientError, ClientResult};
use bookstore_core::types::{RefreshTokenRequest, TokenRefreshResponse};
use bookstore_core::Session;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Per-call body, header overrides and query pairs
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    /// Send without the session token; a 401 is returned as-is
    pub anonymous: bool,
    /// Send the session token but return a 401 as-is
    pub skip_refresh: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `body` as the JSON request body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// For endpoints that must not carry the session, such as login
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// For calls where a refresh round trip is pointless, such as logout
    pub fn skip_refresh(mut self) -> Self {
        self.skip_refresh = true;
        self
    }

    pub fn header(mut self, name: HeaderName, value: &str) -> ClientResult<Self> {
        let value =
            HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// One logical call; `retried` guards against refreshing more than once
struct AuthenticatedRequest<'a> {
    method: Method,
    path: &'a str,
    options: &'a RequestOptions,
    retried: bool,
}

impl AuthenticatedRequest<'_> {
    fn has_explicit_authorization(&self) -> bool {
        self.options.headers.contains_key(AUTHORIZATION)
    }
}

/// Where the `Authorization` header of a rejected request came from
#[derive(Debug, Clone, Copy)]
enum SentToken<'a> {
    /// The session token at dispatch time, if there was one
    Session(Option<&'a str>),
    /// A header supplied by the caller
    Explicit,
}

/// Authenticated JSON client for the bookstore backend
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    session: Session,
    refresh_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(config: ClientConfig, session: Session) -> ClientResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.send(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.send(Method::POST, path, options).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.send(Method::PUT, path, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        self.send(Method::DELETE, path, options).await
    }

    /// Dispatch and decode the JSON response body; an empty body decodes as `null`
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let body = self.dispatch(method, path, &options).await?;
        decode_body(&body)
    }

    /// Dispatch and ignore whatever the server answered with
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<()> {
        self.dispatch(method, path, &options).await.map(|_| ())
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> ClientResult<Vec<u8>> {
        let mut request = AuthenticatedRequest {
            method,
            path,
            options,
            retried: false,
        };

        let explicit = request.has_explicit_authorization();
        let token = if options.anonymous || explicit {
            None
        } else {
            self.session.access_token().await?
        };
        let may_refresh = !options.anonymous && !options.skip_refresh;

        match self.execute(&request, token.as_deref()).await {
            Err(err) if err.is_unauthorized() && !request.retried && may_refresh => {
                request.retried = true;
                let sent = if explicit {
                    SentToken::Explicit
                } else {
                    SentToken::Session(token.as_deref())
                };
                let token = self.refresh_after_unauthorized(sent, err).await?;
                debug!(path, "Retrying request with refreshed token");
                self.execute(&request, Some(&token)).await
            }
            result => result,
        }
    }

    async fn execute(
        &self,
        request: &AuthenticatedRequest<'_>,
        token: Option<&str>,
    ) -> ClientResult<Vec<u8>> {
        let mut headers = request.options.headers.clone();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self
            .http
            .request(request.method.clone(), self.config.url(request.path))
            .headers(headers);
        if !request.options.query.is_empty() {
            builder = builder.query(&request.options.query);
        }
        if let Some(body) = &request.options.body {
            builder = builder.json(body);
        }

        debug!(
            method = %request.method,
            path = request.path,
            retried = request.retried,
            "Dispatching request"
        );
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), path = request.path, "Request failed");
            return Err(ClientError::http(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }
        Ok(body.to_vec())
    }

    /// Exchange the refresh token for a new access token after a 401
    ///
    /// Returns the token to retry with. Clears the session when the refresh
    /// cannot be attempted or fails. Unreadable session values count as missing.
    async fn refresh_after_unauthorized(
        &self,
        sent: SentToken<'_>,
        unauthorized: ClientError,
    ) -> ClientResult<String> {
        let _guard = self.refresh_lock.lock().await;

        // Only a rejected session token can have been replaced concurrently
        if let SentToken::Session(stale_token) = sent {
            if let Some(current) = self.session.access_token().await.unwrap_or(None) {
                if stale_token != Some(current.as_str()) {
                    debug!("Access token already refreshed by a concurrent call");
                    return Ok(current);
                }
            }
        }

        let refresh_token = self.session.refresh_token().await.unwrap_or(None);
        let user = self.session.user().await.unwrap_or(None);
        let role = self.session.role().await.unwrap_or(None);

        let (Some(refresh_token), Some(user), Some(role)) = (refresh_token, user, role) else {
            warn!("Cannot refresh session without refresh token and identity, clearing it");
            self.session.clear().await?;
            return Err(unauthorized);
        };

        let body = RefreshTokenRequest {
            refresh_token,
            email: user.email,
            role,
        };
        match self.request_refresh(&body).await {
            Ok(tokens) => {
                self.session
                    .update_tokens(tokens.access_token.clone(), tokens.refresh_token)
                    .await?;
                info!("Access token refreshed");
                Ok(tokens.access_token)
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed, clearing session");
                self.session.clear().await?;
                Err(ClientError::AuthExpired {
                    source: Box::new(err),
                })
            }
        }
    }

    async fn request_refresh(
        &self,
        body: &RefreshTokenRequest,
    ) -> ClientResult<TokenRefreshResponse> {
        let options = RequestOptions::new().json(body)?;
        let request = AuthenticatedRequest {
            method: Method::POST,
            path: REFRESH_PATH,
            options: &options,
            retried: true,
        };
        let bytes = self.execute(&request, None).await?;
        decode_body(&bytes)
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(serde_json::from_slice(b"null")?)
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_decodes_as_null() {
        let _: () = decode_body(b"").unwrap();
        let missing: Option<u32> = decode_body(b"  \n").unwrap();
        assert_eq!(missing, None);
        let value: u32 = decode_body(b"42").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        let result: ClientResult<u32> = decode_body(b"<html>");
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_request_options() {
        let options = RequestOptions::new()
            .query([("page".to_string(), "0".to_string())])
            .header(AUTHORIZATION, "Bearer explicit")
            .unwrap();
        let request = AuthenticatedRequest {
            method: Method::GET,
            path: "/books",
            options: &options,
            retried: false,
        };
        assert!(request.has_explicit_authorization());
        assert_eq!(options.query.len(), 1);
    }
}
