use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::value_objects::UserId;

use super::errors::CartError;
use super::price::parse_price;

/// Largest quantity a line can hold; the remote table stores it as a
/// 32-bit signed integer.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

/// One product line of a cart.
///
/// `name`, `price`, `image` and `unit` are copied from the catalog when the
/// line is added and are never refreshed afterwards. `price` stays the
/// localized label shown in the storefront (e.g. `"₹1,200"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit: String,
}

impl CartItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
        quantity: u32,
        unit: impl Into<String>,
    ) -> Result<Self, CartError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            image: image.into(),
            quantity,
            unit: unit.into(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Fields are public, so callers building items by hand go through this
    /// before the item reaches a store.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.id.trim().is_empty() {
            return Err(CartError::ProductIdEmpty);
        }
        if self.quantity == 0 || self.quantity > MAX_QUANTITY {
            return Err(CartError::InvalidQuantity);
        }
        Ok(())
    }

    pub fn unit_price(&self) -> f64 {
        parse_price(&self.price)
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }
}

/// The live cart: ordered lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored lines. Duplicate ids are folded together and
    /// zero quantities dropped, whatever the store handed back.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            cart.add(item);
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends the line, or adds its quantity to the existing line with the
    /// same id. Quantities stop at [`MAX_QUANTITY`].
    pub fn add(&mut self, mut item: CartItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = add_quantities(existing.quantity, item.quantity),
            None => {
                item.quantity = item.quantity.min(MAX_QUANTITY);
                self.items.push(item);
            }
        }
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Overwrites the quantity of a line. A quantity of zero or less removes
    /// the line instead. Returns whether the cart changed.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }
        let quantity = u32::try_from(quantity)
            .unwrap_or(MAX_QUANTITY)
            .min(MAX_QUANTITY);
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Sum of two line quantities, capped at [`MAX_QUANTITY`].
pub fn add_quantities(current: u32, added: u32) -> u32 {
    current.saturating_add(added).min(MAX_QUANTITY)
}

/// A row of the remote cart table, keyed by `(user_id, item.id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub user_id: UserId,
    pub item: CartItem,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartRecord {
    pub fn new(user_id: UserId, item: CartItem) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            item,
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        user_id: UserId,
        item: CartItem,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            item,
            created_at,
            updated_at,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.item.id
    }

    pub fn into_item(self) -> CartItem {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: &str, price: &str, quantity: u32) -> CartItem {
        CartItem::new(id, "Sky Shot 12", price, "/img/sky-shot.jpg", quantity, "Box").unwrap()
    }

    #[test]
    fn should_reject_when_product_id_empty() {
        let result = CartItem::new("  ", "Sparkler", "₹50", "", 1, "Piece");

        assert!(matches!(result.unwrap_err(), CartError::ProductIdEmpty));
    }

    #[test]
    fn should_reject_when_quantity_zero() {
        let result = CartItem::new("p1", "Sparkler", "₹50", "", 0, "Piece");

        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
    }

    #[test]
    fn should_reject_quantity_above_column_range() {
        let result = CartItem::new("p1", "Sparkler", "₹50", "", MAX_QUANTITY + 1, "Piece");

        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
        assert!(CartItem::new("p1", "Sparkler", "₹50", "", MAX_QUANTITY, "Piece").is_ok());
    }

    #[test]
    fn should_cap_accumulated_and_overwritten_quantities() {
        let mut cart = Cart::new();
        cart.add(item("p1", "₹1", MAX_QUANTITY));
        cart.add(item("p1", "₹1", 5));
        assert_eq!(cart.get("p1").unwrap().quantity, MAX_QUANTITY);

        cart.update_quantity("p1", i64::MAX);
        assert_eq!(cart.get("p1").unwrap().quantity, MAX_QUANTITY);
    }

    #[test]
    fn should_accumulate_quantity_for_same_product() {
        let mut cart = Cart::new();
        cart.add(item("p1", "₹100", 1));
        cart.add(item("p1", "₹100", 2));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 3);
        assert_eq!(cart.total_price(), 300.0);
    }

    #[test]
    fn should_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item("p2", "₹10", 1));
        cart.add(item("p1", "₹10", 1));
        cart.add(item("p2", "₹10", 1));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[test]
    fn should_keep_first_denormalized_fields_when_accumulating() {
        let mut cart = Cart::new();
        cart.add(item("p1", "₹100", 1));
        cart.add(item("p1", "₹120", 1));

        assert_eq!(cart.get("p1").unwrap().price, "₹100");
    }

    #[test]
    fn should_overwrite_quantity() {
        let mut cart = Cart::from_items(vec![item("p1", "₹100", 1)]);

        assert!(cart.update_quantity("p1", 7));
        assert_eq!(cart.get("p1").unwrap().quantity, 7);
    }

    #[test]
    fn should_ignore_update_for_unknown_product() {
        let mut cart = Cart::from_items(vec![item("p1", "₹100", 1)]);

        assert!(!cart.update_quantity("p9", 4));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn should_empty_cart_on_clear() {
        let mut cart = Cart::from_items(vec![item("p1", "₹100", 2), item("p2", "₹5", 1)]);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn should_fold_duplicates_and_drop_zero_quantities_from_stored_lines() {
        let mut zero = item("p3", "₹1", 1);
        zero.quantity = 0;

        let cart = Cart::from_items(vec![item("p1", "₹1", 1), item("p1", "₹1", 4), zero]);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 5);
    }

    #[test]
    fn should_count_unparseable_price_as_zero() {
        let cart = Cart::from_items(vec![item("p1", "₹", 3), item("p2", "₹20", 2)]);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), 40.0);
    }

    #[test]
    fn should_round_trip_guest_slot_json() {
        let json = r#"[{"id":"p1","name":"Flower Pot","price":"₹80","image":"","quantity":2,"unit":"Box"}]"#;

        let items: Vec<CartItem> = serde_json::from_str(json).unwrap();

        assert_eq!(items[0].quantity, 2);
        assert_eq!(serde_json::to_string(&items).unwrap(), json);
    }

    #[test]
    fn should_map_record_to_item_using_row_fields() {
        let record = CartRecord::new(UserId::new("shopper-1"), item("p1", "₹100", 2));

        assert_eq!(record.product_id(), "p1");
        assert_eq!(record.into_item().quantity, 2);
    }

    proptest! {
        #[test]
        fn adding_same_product_sums_quantities(quantities in prop::collection::vec(1u32..1_000, 1..20)) {
            let mut cart = Cart::new();
            for quantity in &quantities {
                cart.add(item("p1", "₹10", *quantity));
            }

            let expected: u32 = quantities.iter().sum();
            prop_assert_eq!(cart.items().len(), 1);
            prop_assert_eq!(cart.get("p1").unwrap().quantity, expected);
        }

        #[test]
        fn non_positive_quantity_update_equals_remove(quantity in i64::MIN..=0) {
            let lines = vec![item("p1", "₹10", 3), item("p2", "₹20", 1)];
            let mut updated = Cart::from_items(lines.clone());
            let mut removed = Cart::from_items(lines);

            updated.update_quantity("p1", quantity);
            removed.remove("p1");

            prop_assert_eq!(updated, removed);
        }

        #[test]
        fn totals_follow_lines(lines in prop::collection::vec((0u8..10, 0u32..5_000, 1u32..50), 0..30)) {
            let cart = Cart::from_items(
                lines.iter().map(|(id, price, qty)| item(&format!("p{id}"), &format!("₹{price}"), *qty)),
            );

            let total_items: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
            let total_price: f64 = cart
                .items()
                .iter()
                .map(|i| parse_price(&i.price) * f64::from(i.quantity))
                .sum();
            prop_assert_eq!(cart.total_items(), total_items);
            prop_assert_eq!(cart.total_price(), total_price);
        }
    }
}
