//! Snapshot tests for bookstore-core using insta
//!
//! These tests pin the JSON bodies sent to the backend so that renames
//! and serde attribute changes show up as snapshot diffs.

use bookstore_core::types::{book_sort_options, BOOK_FILTER_KEYS};
use bookstore_core::{
    Basket, Book, FilterState, PageRequest, PageResult, QueryParams, PAGE_SIZE,
};

fn sample_book() -> Book {
    let mut book = Book::new("The Dispossessed", "Ursula K. Le Guin", "Sci-Fi", 9.5);
    book.language = Some("en".to_string());
    book.publication_year = Some(1974);
    book
}

#[test]
fn test_book_body() {
    insta::assert_json_snapshot!(sample_book(), @r###"
    {
      "name": "The Dispossessed",
      "author": "Ursula K. Le Guin",
      "genre": "Sci-Fi",
      "price": 9.5,
      "language": "en",
      "publicationYear": 1974
    }
    "###);
}

#[test]
fn test_basket_checkout_body() {
    let mut basket = Basket::new();
    basket.add(&sample_book(), 1).unwrap();
    basket
        .add(&Book::new("Kindred", "Octavia E. Butler", "Fiction", 8.5), 1)
        .unwrap();
    basket.add(&sample_book(), 2).unwrap();

    let order = basket.to_order("reader@example.com").unwrap();
    insta::assert_json_snapshot!(order, @r###"
    {
      "clientEmail": "reader@example.com",
      "bookItems": [
        {
          "bookName": "The Dispossessed",
          "quantity": 3
        },
        {
          "bookName": "Kindred",
          "quantity": 1
        }
      ]
    }
    "###);
}

#[test]
fn test_page_result_shape() {
    let page = PageResult::new(vec!["a", "b"], 11, PAGE_SIZE);
    insta::assert_json_snapshot!(page, @r###"
    {
      "items": [
        "a",
        "b"
      ],
      "totalCount": 11,
      "totalPages": 2
    }
    "###);
}

#[test]
fn test_search_page_request_pairs() {
    let params = QueryParams::parse("?genre=Sci-Fi&sort=price%20(high%20to%20low)&page=3");
    let filter = FilterState::from_params(&params, BOOK_FILTER_KEYS);
    let sort = book_sort_options().resolve(filter.sort_label()).cloned();

    let request = PageRequest::new(params.page() - 1, PAGE_SIZE)
        .unwrap()
        .with_filter(filter)
        .with_sort(sort);

    assert_eq!(
        request.query_pairs(),
        vec![
            ("page".to_string(), "2".to_string()),
            ("size".to_string(), "10".to_string()),
            ("sort".to_string(), "price,desc".to_string()),
        ]
    );
}
