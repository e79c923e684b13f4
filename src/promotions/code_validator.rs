use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Notice;
use crate::models::Promotion;
use crate::promotions::PromotionError;

/// A promo code that matched a known promotion
///
/// Applying a code is informational: totals and orders are never changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedPromotion {
    pub promotion_id: i32,
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,
}

impl AppliedPromotion {
    pub fn notice(&self) -> Notice {
        Notice::success(format!("Promo applied: {}\n{}", self.title, self.description))
    }
}

impl From<&Promotion> for AppliedPromotion {
    fn from(promotion: &Promotion) -> Self {
        Self {
            promotion_id: promotion.id,
            code: promotion.code.clone(),
            title: promotion.title.clone(),
            description: promotion.description.clone(),
            discount_value: promotion.discount_value,
        }
    }
}

/// Looks promo codes up against the catalog's promotions
pub struct PromotionValidator;

impl PromotionValidator {
    /// Find the promotion for a code
    ///
    /// Matching is exact and case-sensitive: "student20" does not match "STUDENT20".
    pub fn apply_code(promotions: &[Promotion], code: &str) -> Result<AppliedPromotion, PromotionError> {
        match promotions.iter().find(|promotion| promotion.code == code) {
            Some(promotion) => {
                tracing::info!("Promo code {} applied: {}", code, promotion.title);
                Ok(AppliedPromotion::from(promotion))
            }
            None => {
                tracing::debug!("Unknown promo code: {}", code);
                Err(PromotionError::InvalidCode(code.to_string()))
            }
        }
    }
}
