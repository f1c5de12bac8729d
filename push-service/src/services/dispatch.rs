/// Dispatch Engine
///
/// Fans one notification payload out to a set of subscriptions with bounded
/// concurrency, classifies every delivery outcome, prunes subscriptions the
/// push service reported as gone, and returns aggregate counts.
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::metrics;
use crate::models::{
    DeliveryOutcome, DeliveryReport, DispatchResult, NotificationPayload, SubscriptionRecord,
    TargetSelector,
};
use crate::repository::SubscriptionRepository;
use crate::services::DeliveryClient;

/// Default cap on simultaneous in-flight deliveries. Keeps a dispatch to a
/// large subscriber base from exhausting outbound connections.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 32;

pub struct DispatchEngine {
    repository: Arc<dyn SubscriptionRepository>,
    delivery: Arc<dyn DeliveryClient>,
    max_in_flight: usize,
    max_payload_bytes: Option<usize>,
}

impl DispatchEngine {
    /// Create an engine with the default concurrency bound and no payload
    /// size limit.
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        delivery: Arc<dyn DeliveryClient>,
    ) -> Self {
        Self::with_settings(repository, delivery, DEFAULT_MAX_IN_FLIGHT, None)
    }

    /// Create an engine with explicit limits.
    pub fn with_settings(
        repository: Arc<dyn SubscriptionRepository>,
        delivery: Arc<dyn DeliveryClient>,
        max_in_flight: usize,
        max_payload_bytes: Option<usize>,
    ) -> Self {
        Self {
            repository,
            delivery,
            max_in_flight: max_in_flight.max(1),
            max_payload_bytes,
        }
    }

    /// Resolve a target selector into concrete subscription records.
    ///
    /// Pure read; never mutates state and never fails for "no subscriptions
    /// found". An empty user list resolves without touching the store.
    pub async fn resolve(
        &self,
        selector: &TargetSelector,
    ) -> ServiceResult<Vec<SubscriptionRecord>> {
        let records = match selector {
            TargetSelector::All => self.repository.find_all().await?,
            TargetSelector::User(user_id) => self.repository.find_by_user(*user_id).await?,
            TargetSelector::Users(user_ids) if user_ids.is_empty() => Vec::new(),
            TargetSelector::Users(user_ids) => self.repository.find_by_users(user_ids).await?,
        };
        Ok(records)
    }

    /// Deliver one payload to every subscription in the list, concurrently.
    ///
    /// Returns after every subscription has been attempted exactly once.
    /// Per-subscription failures are data in the result, never errors; only
    /// payload validation fails the call. An empty list yields zero counts.
    pub async fn dispatch(
        &self,
        payload: &NotificationPayload,
        subscriptions: Vec<SubscriptionRecord>,
    ) -> ServiceResult<DispatchResult> {
        let body = self.validate(payload)?;

        if subscriptions.is_empty() {
            return Ok(DispatchResult::empty());
        }

        let total = subscriptions.len();
        info!("Dispatching \"{}\" to {} subscriptions", payload.title, total);

        let outcomes: Vec<DeliveryReport> = stream::iter(subscriptions)
            .map(|record| self.deliver_one(record, &body))
            .buffer_unordered(self.max_in_flight)
            .collect()
            .await;

        let sent = outcomes.iter().filter(|r| r.outcome.is_delivered()).count();
        let failed = total - sent;

        info!("Dispatch complete: {} sent, {} failed", sent, failed);

        Ok(DispatchResult {
            sent,
            failed,
            total,
            outcomes,
        })
    }

    /// Serialize and validate the payload before any delivery attempt.
    fn validate(&self, payload: &NotificationPayload) -> ServiceResult<Vec<u8>> {
        if payload.title.trim().is_empty() {
            return Err(ServiceError::InvalidPayload(
                "notification title is required".to_string(),
            ));
        }

        let body = serde_json::to_vec(payload)
            .map_err(|e| ServiceError::InvalidPayload(e.to_string()))?;

        if let Some(limit) = self.max_payload_bytes {
            if body.len() > limit {
                return Err(ServiceError::InvalidPayload(format!(
                    "payload is {} bytes, limit is {}",
                    body.len(),
                    limit
                )));
            }
        }

        Ok(body)
    }

    /// One delivery attempt plus the pruning side effect.
    ///
    /// Pruning is best-effort: a store error here is logged and swallowed so
    /// it can never abort the dispatch call. Removal of an already-absent
    /// endpoint (e.g. a concurrent unsubscribe) is a no-op in the store.
    async fn deliver_one(&self, record: SubscriptionRecord, payload: &[u8]) -> DeliveryReport {
        let outcome = self.delivery.deliver(&record.subscription, payload).await;

        match &outcome {
            DeliveryOutcome::Delivered => {
                debug!("Delivered to {}", record.endpoint());
            }
            DeliveryOutcome::TransientFailure(reason) => {
                warn!("Delivery to {} failed: {}", record.endpoint(), reason);
            }
            DeliveryOutcome::PermanentFailure(reason) => {
                warn!(
                    "Endpoint {} is gone ({}), pruning subscription",
                    record.endpoint(),
                    reason
                );
                match self.repository.remove_by_endpoint(record.endpoint()).await {
                    Ok(removed) => {
                        if removed {
                            metrics::inc_pruned();
                        }
                    }
                    Err(e) => {
                        warn!("Failed to prune {}: {}", record.endpoint(), e);
                    }
                }
            }
        }

        DeliveryReport {
            endpoint: record.subscription.endpoint,
            outcome,
        }
    }
}
