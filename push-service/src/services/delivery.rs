/// Delivery client seam between the dispatch engine and the transport layer.
///
/// The engine only sees `DeliveryOutcome`; the transport's error taxonomy is
/// collapsed here. Tests substitute their own implementations.
use async_trait::async_trait;
use orbit_webpush_shared::WebPushClient;
use tracing::debug;

use crate::models::{DeliveryOutcome, PushSubscription};

/// Sends one serialized payload to one subscription endpoint.
///
/// A single attempt per call; retry policy, if any, belongs to the
/// implementation's own transport contract, not to callers.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn deliver(&self, subscription: &PushSubscription, payload: &[u8]) -> DeliveryOutcome;
}

/// Production delivery client backed by the shared web push transport.
pub struct WebPushDeliveryClient {
    client: WebPushClient,
}

impl WebPushDeliveryClient {
    pub fn new(client: WebPushClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryClient for WebPushDeliveryClient {
    async fn deliver(&self, subscription: &PushSubscription, payload: &[u8]) -> DeliveryOutcome {
        let result = self
            .client
            .send(
                &subscription.endpoint,
                &subscription.keys.p256dh,
                &subscription.keys.auth,
                payload,
            )
            .await;

        match result {
            Ok(sent) => {
                debug!("Delivered to {} (HTTP {})", subscription.endpoint, sent.status);
                DeliveryOutcome::Delivered
            }
            Err(e) if e.is_endpoint_gone() => DeliveryOutcome::PermanentFailure(e.to_string()),
            Err(e) => DeliveryOutcome::TransientFailure(e.to_string()),
        }
    }
}
