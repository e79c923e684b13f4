/// Error types for promo codes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromotionError {
    #[error("Invalid promo code: {0}")]
    InvalidCode(String),
}
