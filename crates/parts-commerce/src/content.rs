//! Storefront content: hero banners, branches, social links, contact form,
//! and Philippine administrative divisions for address entry.

use crate::error::CommerceError;
use crate::ids::{HeroSlideId, StoreId};
use serde::{Deserialize, Deserializer, Serialize};

/// A homepage hero banner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeroSlide {
    pub id: HeroSlideId,
    pub title: String,
    pub subtitle: Option<String>,
    /// Public URL in the `hero-images` bucket.
    pub image_url: String,
    /// Call-to-action label and target.
    pub cta_label: Option<String>,
    pub cta_link: Option<String>,
    pub is_active: bool,
    /// Unix timestamp of creation; slides are shown oldest first.
    pub created_at: i64,
}

/// Active slides in display order.
pub fn active_slides(slides: &[HeroSlide]) -> Vec<&HeroSlide> {
    let mut active: Vec<_> = slides.iter().filter(|s| s.is_active).collect();
    active.sort_by_key(|s| s.created_at);
    active
}

/// A physical branch, also a pickup location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    /// Free-form opening hours, e.g. "Mon-Sat 8:00-17:00".
    pub hours: Option<String>,
    pub map_url: Option<String>,
    pub is_active: bool,
}

/// A footer social media link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub id: i64,
    /// e.g. "facebook", "instagram".
    pub platform: String,
    pub url: String,
    pub is_active: bool,
}

/// A message from the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactMessage {
    /// Name, email and message are required.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            missing.push("email");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(missing))
        }
    }
}

/// A province from the administrative-division API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub region_code: String,
}

/// A city or municipality from the administrative-division API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CityMunicipality {
    pub code: String,
    pub name: String,
    /// Absent for cities directly under a region (e.g. Metro Manila), which
    /// the API reports as `false`.
    #[serde(default, deserialize_with = "code_or_false")]
    pub province_code: Option<String>,
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub is_city: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum CodeOrFlag {
    Code(String),
    Flag(bool),
}

fn code_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<CodeOrFlag>::deserialize(deserializer)? {
        Some(CodeOrFlag::Code(code)) if !code.is_empty() => Some(code),
        Some(CodeOrFlag::Code(_)) | Some(CodeOrFlag::Flag(_)) | None => None,
    })
}
