//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(i64),

    /// Cart has no lines to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Required form fields are missing or malformed.
    #[error("Missing or invalid fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// A fitment choice made out of order or not offered by the catalog.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Reference data could not be loaded (fetch failed or came back empty).
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// A name that matches none of an enum's spellings.
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        CommerceError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }

    /// Fields reported by a validation failure, empty for other errors.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            CommerceError::Validation(fields) => fields,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = CommerceError::Validation(vec!["email", "phone"]);
        assert_eq!(err.to_string(), "Missing or invalid fields: email, phone");
        assert_eq!(err.missing_fields(), &["email", "phone"]);
    }

    #[test]
    fn test_missing_fields_empty_for_other_errors() {
        assert!(CommerceError::EmptyCart.missing_fields().is_empty());
    }
}
