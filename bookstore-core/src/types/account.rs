//! Account types for both roles

use crate::error::ValidationError;
use crate::filter::SORT_KEY;
use crate::pagination::{SortOptionMap, SortSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter keys understood by the client and employee list pages
pub const ACCOUNT_FILTER_KEYS: &[&str] = &["name", "email", SORT_KEY];

/// Which side of the shop an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A customer
    Client,
    /// A staff member
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENT" | "CUSTOMER" => Ok(Role::Client),
            "EMPLOYEE" | "STAFF" => Ok(Role::Employee),
            _ => Err(ValidationError::UnknownRole(s.to_string())),
        }
    }
}

/// Identity of the logged-in user, persisted with the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

/// A customer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub email: String,

    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub balance: Option<f64>,

    #[serde(default)]
    pub blocked: bool,
}

/// Editable client fields; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A staff account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub email: String,

    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub birth_date: Option<String>,
}

/// Body of `POST /employees`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub email: String,

    pub password: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

/// Editable employee fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

pub fn account_sort_options() -> SortOptionMap {
    SortOptionMap::new()
        .with("name (A-Z)", SortSpec::asc("name"))
        .with("name (Z-A)", SortSpec::desc("name"))
        .with("email (A-Z)", SortSpec::asc("email"))
}
