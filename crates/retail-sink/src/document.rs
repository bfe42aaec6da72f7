//! Tagged view over the two document types.

use retail_types::{Basket, Payment};
use serde::Serialize;
use std::fmt;

/// Which of the two documents a [`Document`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Basket,
    Payment,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Basket => write!(f, "basket"),
            DocumentKind::Payment => write!(f, "payment"),
        }
    }
}

/// A borrowed basket or payment on its way to the sinks.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Document<'a> {
    Basket(&'a Basket),
    Payment(&'a Payment),
}

impl Document<'_> {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Basket(_) => DocumentKind::Basket,
            Document::Payment(_) => DocumentKind::Payment,
        }
    }

    pub fn invoice_number(&self) -> &str {
        match self {
            Document::Basket(basket) => &basket.invoice_number,
            Document::Payment(payment) => &payment.invoice_number,
        }
    }

    /// Compact JSON, the broker message value.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Indented JSON, the file and log rendering.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> From<&'a Basket> for Document<'a> {
    fn from(basket: &'a Basket) -> Self {
        Document::Basket(basket)
    }
}

impl<'a> From<&'a Payment> for Document<'a> {
    fn from(payment: &'a Payment) -> Self {
        Document::Payment(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        Payment {
            invoice_number: "inv-1".to_string(),
            pay_timestamp: "2023-12-05T10:00:00".to_string(),
            paid_amount: 2.88,
            financial_transaction_id: "fin-1".to_string(),
        }
    }

    #[test]
    fn test_untagged_encoding_matches_entity() {
        let payment = payment();
        let document = Document::from(&payment);

        let via_document: serde_json::Value =
            serde_json::from_slice(&document.to_json().unwrap()).unwrap();
        let direct = serde_json::to_value(&payment).unwrap();

        assert_eq!(via_document, direct);
        assert_eq!(document.kind(), DocumentKind::Payment);
        assert_eq!(document.invoice_number(), "inv-1");
        assert_eq!(DocumentKind::Payment.to_string(), "payment");
    }
}
