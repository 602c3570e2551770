//! Catalog types

use crate::error::{ValidationError, ValidationResult};
use crate::filter::{FilterState, SORT_KEY};
use crate::pagination::{SortOptionMap, SortSpec};
use crate::validation::require;
use serde::{Deserialize, Serialize};

/// Filter keys understood by the book search page
pub const BOOK_FILTER_KEYS: &[&str] = &[
    "name",
    "author",
    "genre",
    "language",
    "minPrice",
    "maxPrice",
    SORT_KEY,
];

/// A book in the catalog; the name is its identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub name: String,

    pub author: String,

    pub genre: String,

    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Book {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            genre: genre.into(),
            price,
            language: None,
            publication_year: None,
            pages: None,
            description: None,
        }
    }

    /// Check the fields the catalog form requires
    pub fn validate(&self) -> ValidationResult<()> {
        require("name", &self.name)?;
        require("author", &self.author)?;
        require("genre", &self.genre)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

/// Search constraints sent to `GET /books/search`
///
/// Unset constraints are omitted from the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearch {
    pub name: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl BookSearch {
    pub fn from_filter(filter: &FilterState) -> Self {
        Self {
            name: filter.value("name"),
            author: filter.value("author"),
            genre: filter.value("genre"),
            language: filter.value("language"),
            min_price: filter.value("minPrice"),
            max_price: filter.value("maxPrice"),
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [
            ("name", &self.name),
            ("author", &self.author),
            ("genre", &self.genre),
            ("language", &self.language),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Sort choices offered on the book search page
pub fn book_sort_options() -> SortOptionMap {
    SortOptionMap::new()
        .with("name (A-Z)", SortSpec::asc("name"))
        .with("name (Z-A)", SortSpec::desc("name"))
        .with("price (low to high)", SortSpec::asc("price"))
        .with("price (high to low)", SortSpec::desc("price"))
        .with("newest", SortSpec::desc("publicationYear"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::QueryParams;

    #[test]
    fn test_search_only_sends_set_filters() {
        let params = QueryParams::parse("genre=Fiction&sort=name%20(A-Z)&page=2");
        let filter = FilterState::from_params(&params, BOOK_FILTER_KEYS);
        let search = BookSearch::from_filter(&filter);

        assert_eq!(
            search.query_pairs(),
            vec![("genre".to_string(), "Fiction".to_string())]
        );
        assert!(!search.is_empty());
        assert!(BookSearch::default().is_empty());
    }

    #[test]
    fn test_book_validation() {
        assert!(Book::new("Dune", "Frank Herbert", "Sci-Fi", 12.5).validate().is_ok());
        assert_eq!(
            Book::new("", "Frank Herbert", "Sci-Fi", 12.5).validate(),
            Err(ValidationError::EmptyField("name"))
        );
        assert_eq!(
            Book::new("Dune", "Frank Herbert", "Sci-Fi", -1.0).validate(),
            Err(ValidationError::InvalidPrice)
        );
    }

    #[test]
    fn test_book_wire_shape() {
        let json = r#"{"name":"Dune","author":"Frank Herbert","genre":"Sci-Fi","price":12.5,"publicationYear":1965}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.publication_year, Some(1965));
        assert_eq!(book.language, None);

        let value = serde_json::to_value(&book).unwrap();
        assert!(value.get("language").is_none());
        assert_eq!(value["publicationYear"], 1965);
    }
}
