//! Wishlist store.
//!
//! Mirrors the remote wishlist. The cache is rebuilt from the service after every mutation and
//! indexed by product so membership checks stay synchronous.

use std::{fmt, sync::Arc};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::{
    auth::AuthSession,
    domain::{
        errors::StoreError,
        products::ProductId,
        wishlist::{
            errors::WishlistServiceError,
            models::{WishlistEntry, WishlistEntryId},
            service::WishlistService,
        },
    },
};

const LOAD_FAILED: &str = "Failed to load wishlist";
const ADD_FAILED: &str = "Failed to add to wishlist";
const REMOVE_FAILED: &str = "Failed to remove from wishlist";
const TOGGLE_FAILED: &str = "Failed to update wishlist";
const CLEAR_FAILED: &str = "Failed to clear wishlist";
const RELOAD_FAILED: &str = "Wishlist was updated but could not be reloaded; it may be incomplete";

/// Cached view of the shopper's wishlist, reloaded from the service after every change.
pub struct WishlistStore {
    service: Arc<dyn WishlistService>,
    auth: Arc<dyn AuthSession>,
    entries: Vec<WishlistEntry>,
    by_product: FxHashMap<ProductId, WishlistEntryId>,
}

impl fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// An empty store; call [`WishlistStore::load`] to fill it.
    #[must_use]
    pub fn new(service: Arc<dyn WishlistService>, auth: Arc<dyn AuthSession>) -> Self {
        Self {
            service,
            auth,
            entries: Vec::new(),
            by_product: FxHashMap::default(),
        }
    }

    /// Fetch the authoritative wishlist. On failure the cache is emptied.
    #[tracing::instrument(name = "wishlist.store.load", skip(self), err)]
    pub async fn load(&mut self) -> Result<(), StoreError> {
        if !self.auth.is_authenticated() {
            self.reset();
            return Err(StoreError::NotAuthenticated);
        }

        match self.service.get_wishlist().await {
            Ok(entries) => {
                self.replace(entries);

                debug!(entries = self.entries.len(), "wishlist loaded");

                Ok(())
            }
            Err(error) => {
                warn!(%error, "failed to load wishlist");
                self.reset();

                Err(remote_failure(&error, LOAD_FAILED))
            }
        }
    }

    /// Save a product. Already saved products are left alone.
    #[tracing::instrument(name = "wishlist.store.add", skip(self), err)]
    pub async fn add(&mut self, product: ProductId) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        if self.is_present(product) {
            debug!(%product, "product already in wishlist");
            return Ok(());
        }

        self.service
            .add(product)
            .await
            .map_err(|error| remote_failure(&error, ADD_FAILED))?;

        self.reload_after_mutation().await
    }

    /// Remove a product. Products not in the cached wishlist are left alone.
    #[tracing::instrument(name = "wishlist.store.remove", skip(self), err)]
    pub async fn remove(&mut self, product: ProductId) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        let Some(entry) = self.by_product.get(&product).copied() else {
            debug!(%product, "product not in wishlist");
            return Ok(());
        };

        match self.service.remove(entry).await {
            Ok(()) => {}
            Err(WishlistServiceError::NotFound(_)) => {
                debug!(%entry, "wishlist entry already absent");
            }
            Err(error) => return Err(remote_failure(&error, REMOVE_FAILED)),
        }

        self.reload_after_mutation().await
    }

    /// Flip membership and return whether the product is now saved.
    #[tracing::instrument(name = "wishlist.store.toggle", skip(self), err)]
    pub async fn toggle(&mut self, product: ProductId) -> Result<bool, StoreError> {
        self.ensure_authenticated()?;

        let present = self
            .service
            .toggle(product)
            .await
            .map_err(|error| remote_failure(&error, TOGGLE_FAILED))?;

        self.reload_after_mutation().await?;

        info!(%product, present, "wishlist toggled");

        Ok(present)
    }

    /// Remove every saved product.
    #[tracing::instrument(name = "wishlist.store.clear", skip(self), err)]
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        self.service
            .clear()
            .await
            .map_err(|error| remote_failure(&error, CLEAR_FAILED))?;

        self.reset();

        Ok(())
    }

    /// Cached membership; never contacts the service.
    #[must_use]
    pub fn is_present(&self, product: ProductId) -> bool {
        self.by_product.contains_key(&product)
    }

    /// Cached entries from the last successful load.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget the cache, e.g. on sign-out.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.by_product.clear();
    }

    fn replace(&mut self, entries: Vec<WishlistEntry>) {
        self.by_product = entries
            .iter()
            .map(|entry| (entry.product.id, entry.id))
            .collect();

        self.entries = entries;
    }

    fn ensure_authenticated(&self) -> Result<(), StoreError> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(StoreError::NotAuthenticated)
        }
    }

    async fn reload_after_mutation(&mut self) -> Result<(), StoreError> {
        match self.service.get_wishlist().await {
            Ok(entries) => {
                self.replace(entries);

                Ok(())
            }
            Err(error) => {
                warn!(%error, "wishlist reload failed after mutation");
                self.reset();

                Err(StoreError::StaleRead(
                    error.message().unwrap_or(RELOAD_FAILED).to_string(),
                ))
            }
        }
    }
}

fn remote_failure(error: &WishlistServiceError, fallback: &str) -> StoreError {
    match error {
        WishlistServiceError::Unauthorized => StoreError::NotAuthenticated,
        error => StoreError::RemoteOperationFailed(error.message().unwrap_or(fallback).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use testresult::TestResult;

    use crate::{
        auth::MockAuthSession,
        domain::wishlist::service::MockWishlistService,
        test::helpers::{anonymous, cap, hoodie, signed_in, wishlist_entry},
    };

    use super::*;

    fn make_store(service: MockWishlistService, auth: MockAuthSession) -> WishlistStore {
        WishlistStore::new(Arc::new(service), Arc::new(auth))
    }

    #[tokio::test]
    async fn load_indexes_entries_by_product() -> TestResult {
        let mut service = MockWishlistService::new();

        service
            .expect_get_wishlist()
            .once()
            .return_once(|| Ok(vec![wishlist_entry(40, hoodie())]));

        let mut store = make_store(service, signed_in());

        store.load().await?;

        assert!(store.is_present(hoodie().id));
        assert!(!store.is_present(cap().id));
        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn load_without_session_empties_cache() {
        let mut service = MockWishlistService::new();

        service.expect_get_wishlist().never();

        let mut store = make_store(service, anonymous());

        assert_eq!(store.load().await, Err(StoreError::NotAuthenticated));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn add_requires_session() {
        let mut service = MockWishlistService::new();

        service.expect_add().never();
        service.expect_get_wishlist().never();

        let mut store = make_store(service, anonymous());

        assert_eq!(
            store.add(cap().id).await,
            Err(StoreError::NotAuthenticated)
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn toggle_requires_session() {
        let mut service = MockWishlistService::new();

        service.expect_toggle().never();
        service.expect_get_wishlist().never();

        let mut store = make_store(service, anonymous());

        assert_eq!(
            store.toggle(cap().id).await,
            Err(StoreError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn remove_and_clear_require_session() {
        let mut service = MockWishlistService::new();

        service.expect_remove().never();
        service.expect_clear().never();
        service.expect_get_wishlist().never();

        let mut store = make_store(service, anonymous());

        assert_eq!(
            store.remove(hoodie().id).await,
            Err(StoreError::NotAuthenticated)
        );
        assert_eq!(store.clear().await, Err(StoreError::NotAuthenticated));
    }

    #[tokio::test]
    async fn add_then_reload() -> TestResult {
        let mut service = MockWishlistService::new();
        let mut seq = Sequence::new();

        service
            .expect_add()
            .once()
            .in_sequence(&mut seq)
            .withf(|product| *product == ProductId::new(2))
            .return_once(|_| Ok(()));

        service
            .expect_get_wishlist()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Ok(vec![wishlist_entry(41, cap())]));

        let mut store = make_store(service, signed_in());

        store.add(cap().id).await?;

        assert!(store.is_present(cap().id));

        Ok(())
    }

    #[tokio::test]
    async fn add_of_saved_product_is_noop() -> TestResult {
        let mut service = MockWishlistService::new();

        service
            .expect_get_wishlist()
            .once()
            .return_once(|| Ok(vec![wishlist_entry(40, hoodie())]));

        service.expect_add().never();

        let mut store = make_store(service, signed_in());

        store.load().await?;
        store.add(hoodie().id).await?;

        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_addresses_entry_id() -> TestResult {
        let mut service = MockWishlistService::new();
        let mut seq = Sequence::new();

        service
            .expect_get_wishlist()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Ok(vec![wishlist_entry(40, hoodie()), wishlist_entry(41, cap())]));

        service
            .expect_remove()
            .once()
            .in_sequence(&mut seq)
            .withf(|entry| *entry == WishlistEntryId::new(40))
            .return_once(|_| Ok(()));

        service
            .expect_get_wishlist()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Ok(vec![wishlist_entry(41, cap())]));

        let mut store = make_store(service, signed_in());

        store.load().await?;
        store.remove(hoodie().id).await?;

        assert!(!store.is_present(hoodie().id));
        assert!(store.is_present(cap().id));

        Ok(())
    }

    #[tokio::test]
    async fn remove_of_absent_product_never_contacts_service() -> TestResult {
        let mut service = MockWishlistService::new();

        service.expect_remove().never();
        service.expect_get_wishlist().never();

        let mut store = make_store(service, signed_in());

        store.remove(hoodie().id).await?;

        assert!(store.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn toggle_reports_new_membership() -> TestResult {
        let mut service = MockWishlistService::new();
        let mut seq = Sequence::new();

        service
            .expect_toggle()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| Ok(true));

        service
            .expect_get_wishlist()
            .once()
            .in_sequence(&mut seq)
            .return_once(|| Ok(vec![wishlist_entry(42, cap())]));

        let mut store = make_store(service, signed_in());

        assert!(store.toggle(cap().id).await?);
        assert!(store.is_present(cap().id));

        Ok(())
    }

    #[tokio::test]
    async fn failed_reload_is_stale_read() {
        let mut service = MockWishlistService::new();

        service.expect_toggle().once().return_once(|_| Ok(false));
        service
            .expect_get_wishlist()
            .once()
            .return_once(|| Err(WishlistServiceError::Rejected(None)));

        let mut store = make_store(service, signed_in());

        assert_eq!(
            store.toggle(cap().id).await,
            Err(StoreError::StaleRead(RELOAD_FAILED.to_string()))
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn remote_failure_uses_payload_message() {
        let mut service = MockWishlistService::new();

        service.expect_add().once().return_once(|_| {
            Err(WishlistServiceError::NotFound(Some(
                "Product not found".to_string(),
            )))
        });

        let mut store = make_store(service, signed_in());

        assert_eq!(
            store.add(ProductId::new(404)).await,
            Err(StoreError::RemoteOperationFailed(
                "Product not found".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn clear_empties_cache() -> TestResult {
        let mut service = MockWishlistService::new();

        service
            .expect_get_wishlist()
            .once()
            .return_once(|| Ok(vec![wishlist_entry(40, hoodie())]));

        service.expect_clear().once().return_once(|| Ok(()));

        let mut store = make_store(service, signed_in());

        store.load().await?;
        store.clear().await?;

        assert!(store.is_empty());
        assert!(!store.is_present(hoodie().id));

        Ok(())
    }
}
