//! Delivery and payment choices.

use crate::cart::STANDARD_SHIPPING_FEE;
use crate::error::CommerceError;
use crate::ids::StoreId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Courier delivery to the shipping address.
    #[default]
    Standard,
    /// Customer collects the order from a branch.
    Pickup { store_id: StoreId },
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "standard",
            DeliveryMethod::Pickup { .. } => "pickup",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "Standard Shipping",
            DeliveryMethod::Pickup { .. } => "Store Pickup",
        }
    }

    /// Whether a shipping address is needed.
    pub fn requires_address(&self) -> bool {
        matches!(self, DeliveryMethod::Standard)
    }

    /// Shipping fee for this method.
    pub fn fee(&self, currency: Currency) -> Money {
        match self {
            DeliveryMethod::Standard => {
                let minor = 10_i64.pow(currency.decimal_places());
                Money::new(STANDARD_SHIPPING_FEE * minor, currency)
            }
            DeliveryMethod::Pickup { .. } => Money::zero(currency),
        }
    }

    /// Pickup branch, if any.
    pub fn store_id(&self) -> Option<StoreId> {
        match self {
            DeliveryMethod::Standard => None,
            DeliveryMethod::Pickup { store_id } => Some(*store_id),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Gcash,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Gcash => "GCash",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cod" | "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
            "gcash" => Ok(PaymentMethod::Gcash),
            "bank_transfer" | "bank" => Ok(PaymentMethod::BankTransfer),
            _ => Err(CommerceError::unknown("payment method", s)),
        }
    }
}
