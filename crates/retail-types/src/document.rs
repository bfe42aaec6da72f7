//! The two generated documents: a sale basket and its later payment.
//!
//! Field names on the wire are camelCase and form the broker message and
//! file output format consumed downstream.

use crate::catalog::{Clerk, Store};
use serde::{Deserialize, Serialize};

/// One line of a basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl BasketItem {
    /// Unrounded line amount.
    pub fn line_amount(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A synthetic sale.
///
/// `nett`, `vat` and `total` are rounded with [`crate::round2`]:
/// `nett = round2(Σ unit_price × quantity)`, `vat = round2(nett × vat_rate)`,
/// `total = round2(nett + vat)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub invoice_number: String,
    pub sale_timestamp: String,
    pub store: Store,
    pub clerk: Clerk,
    pub terminal_point: u8,
    pub items: Vec<BasketItem>,
    pub nett: f64,
    pub vat: f64,
    pub total: f64,
}

/// Settlement of a basket, correlated through `invoice_number`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub invoice_number: String,
    pub pay_timestamp: String,
    pub paid_amount: f64,
    pub financial_transaction_id: String,
}
