//! Customer contact and shipping address.

use serde::{Deserialize, Serialize};

/// Customer contact details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Fields that are blank or malformed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("first name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last name");
        }
        if !is_plausible_email(&self.email) {
            missing.push("email");
        }
        if !is_plausible_phone(&self.phone) {
            missing.push("phone");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A Philippine shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShippingAddress {
    /// House number, street, subdivision.
    pub street: String,
    pub barangay: String,
    /// City or municipality name.
    pub city: String,
    pub province: String,
    pub postal_code: String,
    /// Optional delivery hint.
    pub landmark: Option<String>,
}

impl ShippingAddress {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.trim()];
        if !self.barangay.trim().is_empty() {
            parts.push(self.barangay.trim());
        }
        parts.push(self.city.trim());
        parts.push(self.province.trim());
        parts.push(self.postal_code.trim());
        parts.join(", ")
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.street.trim().is_empty() {
            missing.push("street address");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.province.trim().is_empty() {
            missing.push("province");
        }
        let postal = self.postal_code.trim();
        if postal.len() != 4 || !postal.chars().all(|c| c.is_ascii_digit()) {
            missing.push("postal code");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

fn is_plausible_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (7..=13).contains(&digits)
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}
