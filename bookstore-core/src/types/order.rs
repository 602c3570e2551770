//! Order types

use crate::filter::SORT_KEY;
use crate::pagination::{SortOptionMap, SortSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter keys understood by the order list pages
pub const ORDER_FILTER_KEYS: &[&str] = &[SORT_KEY];

/// One line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookItem {
    pub book_name: String,
    pub quantity: u32,
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,

    pub client_email: String,

    /// Staff member handling the order, once assigned
    #[serde(default)]
    pub employee_email: Option<String>,

    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub book_items: Vec<BookItem>,
}

impl Order {
    pub fn is_assigned(&self) -> bool {
        self.employee_email.is_some()
    }
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub client_email: String,
    pub book_items: Vec<BookItem>,
}

/// Body of `PUT /orders`: hands an order to a staff member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAssignment {
    pub order_id: i64,
    pub employee_email: String,
}

pub fn order_sort_options() -> SortOptionMap {
    SortOptionMap::new()
        .with("newest first", SortSpec::desc("orderDate"))
        .with("oldest first", SortSpec::asc("orderDate"))
        .with("price (low to high)", SortSpec::asc("price"))
        .with("price (high to low)", SortSpec::desc("price"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_decoding() {
        let json = r#"{
            "id": 7,
            "clientEmail": "reader@example.com",
            "orderDate": "2024-03-01T10:15:00Z",
            "price": 31.0,
            "bookItems": [{"bookName": "Dune", "quantity": 2}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 7);
        assert!(!order.is_assigned());
        assert_eq!(order.book_items[0].quantity, 2);
        assert!(order.order_date.is_some());
    }
}
