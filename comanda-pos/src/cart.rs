//! Cart - session-local order composition
//!
//! The cart is the staff member's in-progress selection: (product,
//! quantity) pairs with a derived total. Nothing here touches the
//! network; the checkout module turns a cart into an order submission.

use shared::models::Product;
use shared::money;

/// One cart line: a product snapshot and how many units of it.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
}

impl CartLine {
    /// Line subtotal in currency units.
    pub fn line_total(&self) -> f64 {
        money::line_total(self.product.price, self.quantity)
    }
}

/// Identity used to match cart lines. Products not yet persisted fall
/// back to their code.
fn line_key(product: &Product) -> &str {
    product.id.as_deref().unwrap_or(&product.code)
}

/// Session-local selection of products before submission.
///
/// Lines keep insertion order. A quantity never drops below 1: setting
/// zero or less removes the line instead.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the product, inserting a new line if needed.
    pub fn add(&mut self, product: &Product) {
        let key = line_key(product);
        match self.lines.iter_mut().find(|l| line_key(&l.product) == key) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Removes the line for the product. No-op if absent.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| line_key(&l.product) != product_id);
    }

    /// Overwrites a line's quantity. Zero or negative removes the line;
    /// an absent line is left alone.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| line_key(&l.product) == product_id)
        {
            line.quantity = quantity;
        }
    }

    /// Current quantity for the product, 0 if absent.
    pub fn quantity_of(&self, product_id: &str) -> i32 {
        self.lines
            .iter()
            .find(|l| line_key(&l.product) == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart total in currency units, recomputed on every read.
    pub fn total(&self) -> f64 {
        money::round_currency(self.lines.iter().map(CartLine::line_total).sum())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductKind;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: Some(id.to_string()),
            code: format!("{}-code", id),
            name: id.to_string(),
            category_id: "cat:drinks".to_string(),
            price,
            kind: ProductKind::Bebida,
            description: None,
            preparation_time: 15,
            is_enabled: true,
            is_available: true,
        }
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = Cart::new();
        let coffee = product("p1", 1.5);

        cart.add(&coffee);
        cart.add(&coffee);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1.0));
        cart.add(&product("p2", 2.0));
        cart.add(&product("p1", 1.0));

        let ids: Vec<_> = cart
            .lines()
            .iter()
            .map(|l| l.product.id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1.0));
        cart.remove("p99");
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1.0));
        cart.set_quantity("p1", 0);
        assert!(cart.is_empty());

        cart.add(&product("p2", 1.0));
        cart.set_quantity("p2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 2.5));
        cart.set_quantity("p1", 4);
        assert_eq!(cart.quantity_of("p1"), 4);
        assert_eq!(cart.total(), 10.0);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.set_quantity("p1", 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_sums_lines() {
        let mut cart = Cart::new();
        let beer = product("p1", 10.0);
        let tapa = product("p2", 5.0);

        cart.add(&beer);
        cart.add(&beer);
        cart.add(&tapa);

        assert_eq!(cart.total(), 25.0);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(Cart::new().total(), 0.0);
    }

    #[test]
    fn test_total_rounds_float_drift() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 0.1));
        cart.add(&product("p2", 0.2));
        assert_eq!(cart.total(), 0.3);
    }

    #[test]
    fn test_unsaved_product_keys_by_code() {
        let mut cart = Cart::new();
        let mut draft = product("p1", 3.0);
        draft.id = None;

        cart.add(&draft);
        cart.add(&draft);
        assert_eq!(cart.quantity_of("p1-code"), 2);

        cart.remove("p1-code");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 1.0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
