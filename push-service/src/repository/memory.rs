use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RepositoryError, SubscriptionRepository};
use crate::models::{PushSubscription, SubscriptionRecord};

/// In-memory subscription store.
///
/// Keyed by endpoint, so endpoint uniqueness holds by construction and
/// upsert/remove are atomic per endpoint under the write lock. Used by tests
/// and in-process embedders; persistent backends implement the same trait.
#[derive(Debug, Default)]
pub struct MemorySubscriptionRepository {
    records: RwLock<HashMap<String, SubscriptionRecord>>,
}

impl MemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stable ordering for find results: oldest registration first, endpoint as
/// tie-breaker.
fn sort_records(records: &mut [SubscriptionRecord]) {
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.endpoint().cmp(b.endpoint()))
    });
}

#[async_trait]
impl SubscriptionRepository for MemorySubscriptionRepository {
    async fn find_all(&self) -> Result<Vec<SubscriptionRecord>, RepositoryError> {
        let records = self.records.read().await;
        let mut all: Vec<SubscriptionRecord> = records.values().cloned().collect();
        sort_records(&mut all);
        Ok(all)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SubscriptionRecord>, RepositoryError> {
        let records = self.records.read().await;
        let mut owned: Vec<SubscriptionRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        sort_records(&mut owned);
        Ok(owned)
    }

    async fn find_by_users(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<SubscriptionRecord>, RepositoryError> {
        let wanted: HashSet<Uuid> = user_ids.iter().copied().collect();
        let records = self.records.read().await;
        let mut matched: Vec<SubscriptionRecord> = records
            .values()
            .filter(|r| wanted.contains(&r.user_id))
            .cloned()
            .collect();
        sort_records(&mut matched);
        Ok(matched)
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        subscription: PushSubscription,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let endpoint = subscription.endpoint.clone();
        records.insert(endpoint, SubscriptionRecord::new(user_id, subscription));
        Ok(())
    }

    async fn remove_by_endpoint(&self, endpoint: &str) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().await;
        Ok(records.remove(endpoint).is_some())
    }

    async fn count_active(&self) -> Result<u64, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.len() as u64)
    }
}
