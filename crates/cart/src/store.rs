//! The cart state container.
//!
//! `CartStore` holds the current [`Cart`], exposes the three mutation
//! operations, validates every mutation against a fresh stock read, and
//! mirrors each successful mutation to durable storage under
//! [`CART_STORAGE_KEY`].
//!
//! # State and observers
//!
//! The store is an explicit, injected object: construct it once at
//! application start with its catalog and storage collaborators and clone
//! the handle wherever it is needed. Observers call [`CartStore::subscribe`]
//! and receive a snapshot after every successful mutation; UI feedback for
//! failures is the caller's job, driven by the returned [`CartError`] kind.
//!
//! # Overlapping mutations
//!
//! Stock lookups happen outside the state lock, so two in-flight mutations
//! for the same product validate against independently observed stock and
//! the later completion wins. The lock only guards the read-modify-write of
//! the list itself, which never spans an await point.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::instrument;

use rocket_shoes_core::{Cart, LineItem, ProductId};

use crate::catalog::ProductCatalog;
use crate::error::CartError;
use crate::storage::{CART_STORAGE_KEY, CartStorage};

/// Shopping-cart state container.
///
/// Cheaply cloneable via `Arc`; clones share the same cart state,
/// catalog client, and storage.
pub struct CartStore<C, S> {
    inner: Arc<CartStoreInner<C, S>>,
}

struct CartStoreInner<C, S> {
    catalog: C,
    storage: S,
    state: Mutex<Cart>,
    tx: watch::Sender<Cart>,
}

impl<C, S> Clone for CartStore<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, S> CartStore<C, S>
where
    C: ProductCatalog,
    S: CartStorage,
{
    /// Create a store, loading the previously persisted cart.
    ///
    /// A missing or malformed snapshot yields an empty cart; it is logged
    /// and never propagated.
    pub fn new(catalog: C, storage: S) -> Self {
        let cart = load_snapshot(&storage);
        let (tx, _rx) = watch::channel(cart.clone());

        Self {
            inner: Arc::new(CartStoreInner {
                catalog,
                storage,
                state: Mutex::new(cart),
                tx,
            }),
        }
    }

    /// A snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.lock_state().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver holds the current snapshot and is notified after every
    /// successful mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.tx.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product not yet in the cart is appended with amount 1, using
    /// metadata fetched from the catalog; a product already in the cart has
    /// its amount incremented. Both paths are bounded by a fresh stock read.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`] if no stock is available, or the line is
    ///   already at the available stock level.
    /// - [`CartError::Catalog`] if a stock or metadata lookup fails, or the
    ///   product does not exist. The cart is left unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.inner.catalog.stock(product_id).await?;
        if stock.amount == 0 {
            return Err(CartError::OutOfStock);
        }

        let product = self.inner.catalog.product(product_id).await?;

        let mut state = self.lock_state();
        match state.find_mut(product_id) {
            Some(item) => {
                if item.amount >= stock.amount {
                    return Err(CartError::OutOfStock);
                }
                item.amount += 1;
            }
            None => state.push(LineItem {
                id: product.id,
                name: product.name,
                price: product.price,
                image_url: product.image_url,
                amount: 1,
            }),
        }

        self.commit(&state);
        Ok(())
    }

    /// Remove a product's line item from the cart.
    ///
    /// Purely local: no catalog call is involved.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line item;
    /// the cart is left unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut state = self.lock_state();
        if state.remove(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }

        self.commit(&state);
        Ok(())
    }

    /// Set a product's line item to an exact amount.
    ///
    /// An `amount` of zero or less is a no-op, not an error: the cart and
    /// the persisted snapshot are left untouched and no stock read happens.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`] if the requested amount exceeds the
    ///   available stock.
    /// - [`CartError::NotInCart`] if the product has no line item. The
    ///   storefront historically mutated a nonexistent entry here; this
    ///   implementation reports it, symmetrical with [`Self::remove_product`].
    /// - [`CartError::Catalog`] if the stock lookup fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            return Ok(());
        }

        let stock = self.inner.catalog.stock(product_id).await?;
        if i64::from(stock.amount) < amount {
            return Err(CartError::OutOfStock);
        }

        let mut state = self.lock_state();
        let item = state
            .find_mut(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        // amount is bounded by stock.amount above, so it fits in u32
        item.amount = u32::try_from(amount).unwrap_or(u32::MAX);

        self.commit(&state);
        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, Cart> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the cart and notify subscribers.
    ///
    /// Persistence is best-effort: a failed write keeps the in-memory state
    /// and does not fail the mutation.
    fn commit(&self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(json) => {
                if let Err(e) = self.inner.storage.set(CART_STORAGE_KEY, &json) {
                    tracing::error!("Failed to persist cart: {e}");
                }
            }
            Err(e) => tracing::error!("Failed to serialize cart: {e}"),
        }

        self.inner.tx.send_replace(cart.clone());
    }
}

/// Load the persisted cart, falling back to empty on any problem.
fn load_snapshot<S: CartStorage>(storage: &S) -> Cart {
    match storage.get(CART_STORAGE_KEY) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!("Malformed persisted cart, starting empty: {e}");
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Failed to read persisted cart, starting empty: {e}");
            Cart::new()
        }
    }
}
