/// Conditions reported by cart operations
///
/// None of these change the cart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("{name} is out of stock")]
    OutOfStock { item_id: i32, name: String },

    #[error("Menu item not found: {0}")]
    ItemNotFound(i32),
}
