//! Cart Arithmetic
//!
//! Ephemeral, session-scoped cart. Never persisted; lines live only for
//! the duration of a checkout request. Totals are computed per payment
//! method: token lines sum `token_value × quantity`, money lines sum
//! `price × quantity` in the stored currency unit and convert for display
//! through a fixed public multiplier, never a live exchange rate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed display conversion: stored cash units to KSH
pub const KSH_PER_CASH_UNIT: f64 = 130.0;

/// How a cart line is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Tokens,
    Money,
}

/// One cart line
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Originating listing, kept so history joins back to the catalog
    pub book_id: Option<Uuid>,
    pub title: String,
    pub author: String,
    pub condition: String,
    pub image_url: Option<String>,
    pub token_value: i64,
    pub price: Option<f64>,
    pub payment_method: PaymentMethod,
    pub quantity: u32,
}

/// Session cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line);
        }
        cart
    }

    /// Add a line, merging with an existing line that carries the same
    /// title and payment method
    pub fn add(&mut self, item: CartItem) {
        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.title == item.title && line.payment_method == item.payment_method);
        match existing {
            Some(line) => line.quantity += item.quantity,
            None => self.lines.push(item),
        }
    }

    /// Set a line's quantity; zero or below removes the line
    pub fn update_quantity(&mut self, title: &str, method: PaymentMethod, quantity: i64) {
        if quantity <= 0 {
            self.lines
                .retain(|line| !(line.title == title && line.payment_method == method));
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.title == title && line.payment_method == method)
        {
            line.quantity = quantity as u32;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Token cost over the token-paid lines
    pub fn total_tokens(&self) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.payment_method == PaymentMethod::Tokens)
            .map(|line| line.token_value * i64::from(line.quantity))
            .sum()
    }

    /// Cash cost over the money-paid lines, in the stored currency unit
    pub fn total_cash(&self) -> f64 {
        self.lines
            .iter()
            .filter(|line| line.payment_method == PaymentMethod::Money)
            .map(|line| line.price.unwrap_or(0.0) * f64::from(line.quantity))
            .sum()
    }

    /// Cash total converted for display
    pub fn total_cash_ksh(&self) -> f64 {
        self.total_cash() * KSH_PER_CASH_UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_line(title: &str, token_value: i64, quantity: u32) -> CartItem {
        CartItem {
            book_id: None,
            title: title.to_string(),
            author: "A. Author".to_string(),
            condition: "good".to_string(),
            image_url: None,
            token_value,
            price: None,
            payment_method: PaymentMethod::Tokens,
            quantity,
        }
    }

    fn money_line(title: &str, price: f64, quantity: u32) -> CartItem {
        CartItem {
            book_id: None,
            title: title.to_string(),
            author: "A. Author".to_string(),
            condition: "good".to_string(),
            image_url: None,
            token_value: 0,
            price: Some(price),
            payment_method: PaymentMethod::Money,
            quantity,
        }
    }

    #[test]
    fn test_totals_split_by_payment_method() {
        let cart = Cart::from_lines(vec![token_line("Dune", 10, 2), money_line("Emma", 5.0, 1)]);
        assert_eq!(cart.total_tokens(), 20);
        assert_eq!(cart.total_cash(), 5.0);
        assert_eq!(cart.total_cash_ksh(), 650.0);
    }

    #[test]
    fn test_add_merges_same_title_and_method() {
        let mut cart = Cart::new();
        cart.add(token_line("Dune", 10, 1));
        cart.add(token_line("Dune", 10, 1));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_same_title_different_method_stays_separate() {
        let mut cart = Cart::new();
        cart.add(token_line("Dune", 10, 1));
        cart.add(money_line("Dune", 5.0, 1));
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::from_lines(vec![token_line("Dune", 10, 2)]);
        cart.update_quantity("Dune", PaymentMethod::Tokens, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::from_lines(vec![token_line("Dune", 10, 2)]);
        cart.update_quantity("Dune", PaymentMethod::Tokens, 5);
        assert_eq!(cart.total_tokens(), 50);
    }

    #[test]
    fn test_money_line_without_price_counts_zero() {
        let mut line = money_line("Emma", 0.0, 3);
        line.price = None;
        let cart = Cart::from_lines(vec![line]);
        assert_eq!(cart.total_cash(), 0.0);
    }
}
