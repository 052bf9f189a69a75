//! Cart line items and the cart itself.
//!
//! The cart is an ordered list of line items, unique by product id, with
//! insertion order as display order. Serialization uses camelCase field
//! names so the persisted form matches the storefront's historical
//! `@RocketShoes:cart` snapshot format:
//!
//! ```json
//! [{"id":1,"name":"Shoe","price":139.9,"imageUrl":"https://…","amount":2}]
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One product entry in the cart with a desired quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product this line refers to.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Product image URL.
    pub image_url: String,
    /// Desired quantity, always at least 1.
    pub amount: u32,
}

impl LineItem {
    /// Total price for this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

/// Ordered list of line items, unique by product id.
///
/// Serializes transparently as a JSON array of [`LineItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Find the line item for a product, if present.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Find the line item for a product, mutably.
    pub fn find_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Append a line item at the end of the display order.
    pub fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Remove the line item for a product, preserving the order of the rest.
    ///
    /// Returns the removed item, or `None` if the product is not in the cart.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shoe(id: i32, amount: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            name: format!("Shoe {id}"),
            price: Decimal::new(1399, 1), // 139.9
            image_url: format!("https://cdn.example.com/shoe-{id}.jpg"),
            amount,
        }
    }

    #[test]
    fn test_serde_matches_persisted_format() {
        let cart = Cart::from(vec![LineItem {
            id: ProductId::new(1),
            name: "Shoe".to_string(),
            price: Decimal::new(1399, 1),
            image_url: "https://cdn.example.com/shoe.jpg".to_string(),
            amount: 2,
        }]);

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"name":"Shoe","price":139.9,"imageUrl":"https://cdn.example.com/shoe.jpg","amount":2}]"#
        );

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_empty_cart_serializes_as_empty_array() {
        assert_eq!(serde_json::to_string(&Cart::new()).unwrap(), "[]");
        let parsed: Cart = serde_json::from_str("[]").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::from(vec![shoe(1, 1), shoe(2, 2), shoe(3, 1)]);

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id, ProductId::new(2));

        let remaining: Vec<i32> = cart.items().iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[test]
    fn test_remove_absent_returns_none() {
        let mut cart = Cart::from(vec![shoe(1, 1)]);
        assert!(cart.remove(ProductId::new(9)).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_item_count_and_subtotal() {
        let cart = Cart::from(vec![shoe(1, 2), shoe(2, 3)]);
        assert_eq!(cart.item_count(), 5);
        // 5 * 139.9
        assert_eq!(cart.subtotal(), Decimal::new(6995, 1));
    }

    #[test]
    fn test_find() {
        let cart = Cart::from(vec![shoe(1, 1), shoe(2, 4)]);
        assert_eq!(cart.find(ProductId::new(2)).unwrap().amount, 4);
        assert!(cart.find(ProductId::new(3)).is_none());
    }
}
