//! Checkout flow state machine.

use crate::checkout::{ContactInfo, DeliveryMethod, PaymentMethod, ShippingAddress};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Customer name, email and phone.
    Contact,
    /// Standard shipping (with address) or store pickup.
    Delivery,
    /// Payment method.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Contact => "contact",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Complete => "complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Contact => 1,
            CheckoutStep::Delivery => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Review => 4,
            CheckoutStep::Complete => 5,
        }
    }
}

/// Checkout details that passed validation and can be turned into an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatedCheckout {
    pub contact: ContactInfo,
    pub delivery: DeliveryMethod,
    /// Present for standard delivery, absent for pickup.
    pub address: Option<ShippingAddress>,
    pub payment: PaymentMethod,
    pub notes: Option<String>,
}

/// Checkout form state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Current step.
    pub step: CheckoutStep,
    /// Steps already passed.
    pub completed_steps: Vec<CheckoutStep>,
    pub contact: ContactInfo,
    pub delivery: Option<DeliveryMethod>,
    pub address: Option<ShippingAddress>,
    pub payment: Option<PaymentMethod>,
    /// Customer note for the order.
    pub notes: Option<String>,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl CheckoutFlow {
    /// Start a new checkout at the contact step.
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Contact,
            completed_steps: Vec::new(),
            contact: ContactInfo::default(),
            delivery: None,
            address: None,
            payment: None,
            notes: None,
            updated_at: current_timestamp(),
        }
    }

    /// Check if checkout can advance to a step.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        self.missing_for_step(step).is_empty()
    }

    /// Advance to the next step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Contact => CheckoutStep::Delivery,
            CheckoutStep::Delivery => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Review => CheckoutStep::Complete,
            CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: "complete".to_string(),
                    to: "none".to_string(),
                })
            }
        };

        let missing = self.missing_for_step(next);
        if !missing.is_empty() {
            return Err(CommerceError::Validation(missing));
        }

        if !self.completed_steps.contains(&self.step) {
            self.completed_steps.push(self.step);
        }
        self.step = next;
        self.updated_at = current_timestamp();

        Ok(next)
    }

    /// Go back to the previous step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Contact | CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "previous".to_string(),
                })
            }
            CheckoutStep::Delivery => CheckoutStep::Contact,
            CheckoutStep::Payment => CheckoutStep::Delivery,
            CheckoutStep::Review => CheckoutStep::Payment,
        };

        self.step = prev;
        self.updated_at = current_timestamp();

        Ok(prev)
    }

    /// Fields still needed before `step` can be entered.
    pub fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Contact => {}
            CheckoutStep::Delivery => {
                missing.extend(self.contact.missing_fields());
            }
            CheckoutStep::Payment => {
                missing.extend(self.missing_for_step(CheckoutStep::Delivery));
                match self.delivery {
                    None => missing.push("delivery method"),
                    Some(method) if method.requires_address() => match &self.address {
                        Some(address) => missing.extend(address.missing_fields()),
                        None => missing.push("shipping address"),
                    },
                    Some(_) => {}
                }
            }
            CheckoutStep::Review | CheckoutStep::Complete => {
                missing.extend(self.missing_for_step(CheckoutStep::Payment));
                if self.payment.is_none() {
                    missing.push("payment method");
                }
            }
        }
        missing
    }

    /// Validate the whole form.
    ///
    /// Blank or malformed fields are reported together so the form can
    /// highlight all of them; nothing is sent to the backend on failure.
    pub fn validate(&self) -> Result<ValidatedCheckout, CommerceError> {
        let missing = self.missing_for_step(CheckoutStep::Complete);
        let (Some(delivery), Some(payment)) = (self.delivery, self.payment) else {
            return Err(CommerceError::Validation(missing));
        };
        if !missing.is_empty() {
            return Err(CommerceError::Validation(missing));
        }

        Ok(ValidatedCheckout {
            contact: self.contact.clone(),
            delivery,
            address: if delivery.requires_address() {
                self.address.clone()
            } else {
                None
            },
            payment,
            notes: self
                .notes
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }

    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.contact = contact;
        self.updated_at = current_timestamp();
    }

    pub fn set_delivery(&mut self, delivery: DeliveryMethod) {
        self.delivery = Some(delivery);
        self.updated_at = current_timestamp();
    }

    pub fn set_address(&mut self, address: ShippingAddress) {
        self.address = Some(address);
        self.updated_at = current_timestamp();
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.payment = Some(payment);
        self.updated_at = current_timestamp();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
        self.updated_at = current_timestamp();
    }

    /// Mark the checkout finished after the order was written.
    pub fn mark_complete(&mut self) {
        if !self.completed_steps.contains(&self.step) {
            self.completed_steps.push(self.step);
        }
        self.step = CheckoutStep::Complete;
        self.updated_at = current_timestamp();
    }

    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() as f64 / 5.0) * 100.0) as u8
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
