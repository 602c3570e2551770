//! Authentication payloads
//!
//! Every auth body uses camelCase field names, including the password reset
//! code (`resetCode`).

use super::account::{Role, UserProfile};
use crate::error::ValidationResult;
use crate::validation::{require, validate_email, validate_password};
use serde::{Deserialize, Serialize};

/// Access and refresh token pair owned by the session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl LoginRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        require("password", &self.password)
    }
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub access_token: String,

    #[serde(alias = "refresh_token")]
    pub refresh_token: String,

    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl LoginResponse {
    pub fn credentials(&self) -> SessionCredentials {
        SessionCredentials {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Body of `POST /auth/refresh-token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
    pub email: String,
    pub role: Role,
}

/// Response of `POST /auth/refresh-token`; the refresh token may or may not rotate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshResponse {
    #[serde(alias = "access_token")]
    pub access_token: String,

    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

/// Body of `POST /auth/register/client`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientRequest {
    pub email: String,

    pub password: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl RegisterClientRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        require("name", &self.name)
    }
}

/// Body of `POST /auth/forgot-password`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST /auth/change-password`: applies a reset code mailed by forgot-password
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub reset_code: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;
        require("reset code", &self.reset_code)?;
        validate_password(&self.new_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_change_password_wire_shape() {
        let request = ChangePasswordRequest {
            email: "reader@example.com".to_string(),
            reset_code: "482913".to_string(),
            new_password: "correct horse battery".to_string(),
        };
        insta::assert_json_snapshot!(request, @r###"
        {
          "email": "reader@example.com",
          "resetCode": "482913",
          "newPassword": "correct horse battery"
        }
        "###);
    }

    #[test]
    fn test_refresh_request_wire_shape() {
        let request = RefreshTokenRequest {
            refresh_token: "r-1".to_string(),
            email: "staff@example.com".to_string(),
            role: Role::Employee,
        };
        insta::assert_json_snapshot!(request, @r###"
        {
          "refreshToken": "r-1",
          "email": "staff@example.com",
          "role": "EMPLOYEE"
        }
        "###);
    }

    #[test]
    fn test_register_validation() {
        let mut request = RegisterClientRequest {
            email: "reader@example.com".to_string(),
            password: "longpassword".to_string(),
            name: "Reader".to_string(),
            phone: None,
            address: None,
        };
        assert!(request.validate().is_ok());

        request.name = " ".to_string();
        assert_eq!(request.validate(), Err(ValidationError::EmptyField("name")));

        request.password = "pw".to_string();
        assert!(matches!(
            request.validate(),
            Err(ValidationError::PasswordTooShort { .. })
        ));
    }

    #[test]
    fn test_token_refresh_response_without_rotation() {
        let response: TokenRefreshResponse =
            serde_json::from_str(r#"{"accessToken":"a-2"}"#).unwrap();
        assert_eq!(response.access_token, "a-2");
        assert_eq!(response.refresh_token, None);
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = SessionCredentials {
            access_token: "secret-a".to_string(),
            refresh_token: "secret-r".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("secret"));
    }
}
