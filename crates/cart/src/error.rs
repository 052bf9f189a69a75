//! Cart operation errors.
//!
//! Every mutation returns `Result<(), CartError>` so callers can map error
//! kinds to their own user feedback. The store itself never surfaces UI
//! notifications.

use thiserror::Error;

use rocket_shoes_core::ProductId;

use crate::catalog::CatalogError;

/// Errors a cart mutation can report.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the available stock.
    #[error("requested quantity is out of stock")]
    OutOfStock,

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Stock or product lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
