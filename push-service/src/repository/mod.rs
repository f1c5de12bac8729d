/// Subscription storage abstraction.
///
/// The dispatch engine treats the store as a linearizable key-value store
/// keyed by endpoint. Implementations are responsible for safe concurrent
/// mutation; the engine never holds locks across delivery I/O.
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{PushSubscription, SubscriptionRecord};

mod memory;

pub use memory::MemorySubscriptionRepository;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Subscription store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD over subscription records, keyed by endpoint.
///
/// Find results are deduplicated by endpoint and deterministically ordered.
/// "No subscriptions found" is an empty vec, never an error; only store
/// unreachability fails.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Every active subscription in the store.
    async fn find_all(&self) -> Result<Vec<SubscriptionRecord>, RepositoryError>;

    /// Subscriptions owned by one user.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<SubscriptionRecord>, RepositoryError>;

    /// Union of subscriptions owned by the listed users. Unknown and
    /// duplicate ids are silently ignored.
    async fn find_by_users(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<SubscriptionRecord>, RepositoryError>;

    /// Insert or update by endpoint. If the endpoint already exists under
    /// any user, the record is reassigned to the new owner and keys.
    async fn upsert(
        &self,
        user_id: Uuid,
        subscription: PushSubscription,
    ) -> Result<(), RepositoryError>;

    /// Remove the record for an endpoint. Removing an absent endpoint is a
    /// no-op; returns whether a record existed.
    async fn remove_by_endpoint(&self, endpoint: &str) -> Result<bool, RepositoryError>;

    /// Number of subscriptions currently stored.
    async fn count_active(&self) -> Result<u64, RepositoryError>;
}
