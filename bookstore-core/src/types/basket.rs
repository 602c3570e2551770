//! Client-side shopping basket

use super::book::Book;
use super::order::{BookItem, NewOrder};
use crate::error::{ValidationError, ValidationResult};
use crate::validation::validate_email;
use serde::{Deserialize, Serialize};

/// A book in the basket with the price it was shown at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketLine {
    pub book_name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl BasketLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Books a customer intends to order, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add copies of a book; adding a book already present increases its quantity
    pub fn add(&mut self, book: &Book, quantity: u32) -> ValidationResult<()> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }
        match self.lines.iter_mut().find(|l| l.book_name == book.name) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                line.unit_price = book.price;
            }
            None => self.lines.push(BasketLine {
                book_name: book.name.clone(),
                unit_price: book.price,
                quantity,
            }),
        }
        Ok(())
    }

    /// Set the quantity of a line; 0 removes it. Returns false if the book is not in the basket.
    pub fn set_quantity(&mut self, book_name: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(book_name).is_some();
        }
        match self.lines.iter_mut().find(|l| l.book_name == book_name) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, book_name: &str) -> Option<BasketLine> {
        let index = self.lines.iter().position(|l| l.book_name == book_name)?;
        Some(self.lines.remove(index))
    }

    pub fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total copies across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Display total at the prices the books were added with
    pub fn total(&self) -> f64 {
        self.lines.iter().map(BasketLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn to_order(&self, client_email: &str) -> ValidationResult<NewOrder> {
        validate_email(client_email)?;
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyBasket);
        }
        Ok(NewOrder {
            client_email: client_email.to_string(),
            book_items: self
                .lines
                .iter()
                .map(|l| BookItem {
                    book_name: l.book_name.clone(),
                    quantity: l.quantity,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new("Dune", "Frank Herbert", "Sci-Fi", 12.5)
    }

    fn emma() -> Book {
        Book::new("Emma", "Jane Austen", "Classic", 8.0)
    }

    #[test]
    fn test_add_merges_lines() {
        let mut basket = Basket::new();
        basket.add(&dune(), 1).unwrap();
        basket.add(&emma(), 2).unwrap();
        basket.add(&dune(), 2).unwrap();

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.item_count(), 5);
        assert_eq!(basket.lines()[0].quantity, 3);
        assert!((basket.total() - 53.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_item_count_exceeds_line_quantity_range() {
        let mut basket = Basket::new();
        basket.add(&dune(), u32::MAX).unwrap();
        basket.add(&emma(), 1).unwrap();
        basket.add(&emma(), u32::MAX).unwrap();

        assert_eq!(basket.lines()[1].quantity, u32::MAX);
        assert_eq!(basket.item_count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut basket = Basket::new();
        assert_eq!(
            basket.add(&dune(), 0),
            Err(ValidationError::InvalidQuantity)
        );
        assert!(basket.is_empty());
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let mut basket = Basket::new();
        basket.add(&dune(), 1).unwrap();

        assert!(basket.set_quantity("Dune", 4));
        assert_eq!(basket.item_count(), 4);
        assert!(!basket.set_quantity("Missing", 1));
        assert!(basket.set_quantity("Dune", 0));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_to_order() {
        let mut basket = Basket::new();
        assert_eq!(
            basket.to_order("reader@example.com"),
            Err(ValidationError::EmptyBasket)
        );

        basket.add(&emma(), 2).unwrap();
        let order = basket.to_order("reader@example.com").unwrap();
        assert_eq!(order.client_email, "reader@example.com");
        assert_eq!(
            order.book_items,
            vec![BookItem {
                book_name: "Emma".to_string(),
                quantity: 2
            }]
        );
    }
}
