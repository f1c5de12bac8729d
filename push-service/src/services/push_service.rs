/// Main Push Service
///
/// Caller-facing facade over the dispatch engine: the operation contracts the
/// HTTP boundary consumes. Owns the cumulative stats state and the metrics
/// observation point.
use std::sync::Arc;
use std::time::{Duration, Instant};

use orbit_webpush_shared::{VapidConfig, WebPushClient, WebPushError};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::metrics;
use crate::models::{
    DispatchResult, NotificationPayload, PushSubscription, StatsSnapshot, TargetSelector,
};
use crate::repository::SubscriptionRepository;
use crate::services::{DeliveryClient, DispatchEngine, StatsAggregator, WebPushDeliveryClient};

pub struct PushService {
    engine: DispatchEngine,
    repository: Arc<dyn SubscriptionRepository>,
    stats: StatsAggregator,
}

impl PushService {
    /// Create a push service with default engine limits.
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        delivery: Arc<dyn DeliveryClient>,
    ) -> Self {
        Self {
            engine: DispatchEngine::new(repository.clone(), delivery),
            repository,
            stats: StatsAggregator::new(),
        }
    }

    /// Create a push service with explicit engine limits.
    pub fn with_settings(
        repository: Arc<dyn SubscriptionRepository>,
        delivery: Arc<dyn DeliveryClient>,
        max_in_flight: usize,
        max_payload_bytes: Option<usize>,
    ) -> Self {
        Self {
            engine: DispatchEngine::with_settings(
                repository.clone(),
                delivery,
                max_in_flight,
                max_payload_bytes,
            ),
            repository,
            stats: StatsAggregator::new(),
        }
    }

    /// Wire the full production stack from configuration: web push transport
    /// with VAPID credentials, delivery adapter, and engine limits.
    pub fn from_config(
        repository: Arc<dyn SubscriptionRepository>,
        config: &Config,
    ) -> Result<Self, WebPushError> {
        let client = WebPushClient::with_settings(
            VapidConfig {
                private_key: config.vapid.private_key.clone(),
                subject: config.vapid.subject.clone(),
            },
            config.dispatch.ttl_secs,
            Duration::from_secs(config.dispatch.request_timeout_secs),
        )?;

        Ok(Self::with_settings(
            repository,
            Arc::new(WebPushDeliveryClient::new(client)),
            config.dispatch.max_in_flight,
            config.dispatch.max_payload_bytes,
        ))
    }

    /// Send a notification to every subscriber.
    pub async fn dispatch_to_all(
        &self,
        payload: &NotificationPayload,
    ) -> ServiceResult<DispatchResult> {
        self.dispatch_to(TargetSelector::All, payload).await
    }

    /// Send a notification to one user's subscriptions.
    pub async fn dispatch_to_user(
        &self,
        user_id: Uuid,
        payload: &NotificationPayload,
    ) -> ServiceResult<DispatchResult> {
        self.dispatch_to(TargetSelector::User(user_id), payload).await
    }

    /// Send a notification to the union of the listed users' subscriptions.
    pub async fn dispatch_to_users(
        &self,
        user_ids: Vec<Uuid>,
        payload: &NotificationPayload,
    ) -> ServiceResult<DispatchResult> {
        self.dispatch_to(TargetSelector::Users(user_ids), payload)
            .await
    }

    async fn dispatch_to(
        &self,
        selector: TargetSelector,
        payload: &NotificationPayload,
    ) -> ServiceResult<DispatchResult> {
        let start = Instant::now();

        let subscriptions = self.engine.resolve(&selector).await?;
        let result = self.engine.dispatch(payload, subscriptions).await?;

        self.stats.record_dispatch(&result);
        metrics::observe_dispatch(&result, start.elapsed());

        Ok(result)
    }

    /// Register a subscription for a user.
    ///
    /// Upsert by endpoint: if the endpoint is already registered under any
    /// user, the record is reassigned to this caller.
    pub async fn subscribe(
        &self,
        user_id: Uuid,
        subscription: PushSubscription,
    ) -> ServiceResult<()> {
        if subscription.endpoint.trim().is_empty() {
            return Err(ServiceError::InvalidPayload(
                "subscription endpoint is required".to_string(),
            ));
        }

        self.repository.upsert(user_id, subscription).await?;
        info!("Registered subscription for user {}", user_id);
        Ok(())
    }

    /// Remove a user's subscription by endpoint.
    ///
    /// Removing a missing or foreign-owned endpoint is a successful no-op,
    /// mirroring the engine's lenient pruning semantics.
    pub async fn unsubscribe(&self, user_id: Uuid, endpoint: &str) -> ServiceResult<()> {
        let owned = self
            .repository
            .find_by_user(user_id)
            .await?
            .iter()
            .any(|r| r.endpoint() == endpoint);

        if owned {
            self.repository.remove_by_endpoint(endpoint).await?;
            info!("Removed subscription for user {}", user_id);
        } else {
            debug!("Unsubscribe for user {} matched nothing", user_id);
        }

        Ok(())
    }

    /// Cumulative counters plus the live subscription count.
    pub async fn stats(&self) -> ServiceResult<StatsSnapshot> {
        let active = self.repository.count_active().await?;
        Ok(self.stats.snapshot(active))
    }
}
