use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Encryption key material from a browser push subscription.
///
/// Both values are base64url strings handed to the transport layer as-is;
/// the service never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Browser's P-256 ECDH public key.
    pub p256dh: String,

    /// Shared auth secret.
    pub auth: String,
}

/// A browser push subscription, in the shape of `PushSubscription.toJSON()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscription {
    /// Push service endpoint URL. Unique key across the whole store.
    pub endpoint: String,

    /// Encryption keys for RFC 8291 payload encryption.
    pub keys: SubscriptionKeys,
}

/// A stored subscription registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Owning user. An endpoint belongs to exactly one user at a time.
    pub user_id: Uuid,

    /// The browser subscription.
    pub subscription: PushSubscription,

    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    pub fn new(user_id: Uuid, subscription: PushSubscription) -> Self {
        Self {
            user_id,
            subscription,
            created_at: Utc::now(),
        }
    }

    /// Endpoint URL of the underlying subscription.
    pub fn endpoint(&self) -> &str {
        &self.subscription.endpoint
    }
}

/// Notification content delivered to the service worker.
///
/// Immutable once constructed for a dispatch call. The serialized JSON is
/// what the service worker receives after payload decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification title. Required, must be non-empty.
    pub title: String,

    /// Notification body text.
    #[serde(default)]
    pub body: String,

    /// Icon shown next to the notification.
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Optional large image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Client-side navigation data.
    #[serde(default)]
    pub data: NotificationData,

    /// Grouping tag. Notifications with the same tag replace each other.
    #[serde(default = "default_tag")]
    pub tag: String,
}

/// Data field carried alongside the notification for client-side handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// URL the client navigates to when the notification is clicked.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for NotificationData {
    fn default() -> Self {
        Self {
            url: default_url(),
        }
    }
}

impl NotificationPayload {
    /// Create a payload with the given title and defaults everywhere else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            icon: default_icon(),
            image: None,
            data: NotificationData::default(),
            tag: default_tag(),
        }
    }
}

fn default_icon() -> String {
    "/icons/icon-192x192.png".to_string()
}

fn default_url() -> String {
    "/".to_string()
}

fn default_tag() -> String {
    "general".to_string()
}

/// Which subscriptions a dispatch call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    /// Every active subscription in the store.
    All,
    /// Subscriptions owned by one user.
    User(Uuid),
    /// Union of subscriptions owned by the listed users.
    Users(Vec<Uuid>),
}

/// Per-subscription delivery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// The push service accepted the message.
    Delivered,
    /// Retryable condition unrelated to endpoint validity.
    TransientFailure(String),
    /// The endpoint itself is no longer valid and must be forgotten.
    PermanentFailure(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }

    /// Whether this outcome triggers pruning of the subscription.
    pub fn is_permanent_failure(&self) -> bool {
        matches!(self, DeliveryOutcome::PermanentFailure(_))
    }
}

/// Delivery outcome for one endpoint, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Endpoint the delivery was attempted against.
    pub endpoint: String,

    /// What happened.
    pub outcome: DeliveryOutcome,
}

/// Aggregate of one dispatch call. Ephemeral; returned to the caller only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Deliveries the push service accepted.
    pub sent: usize,

    /// Deliveries that failed, transiently or permanently.
    pub failed: usize,

    /// Subscriptions attempted. Always `sent + failed`.
    pub total: usize,

    /// Per-subscription outcomes.
    pub outcomes: Vec<DeliveryReport>,
}

impl DispatchResult {
    /// Result of dispatching to an empty target set.
    pub fn empty() -> Self {
        Self {
            sent: 0,
            failed: 0,
            total: 0,
            outcomes: Vec::new(),
        }
    }
}

/// Process-wide delivery counters plus the live subscription count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Notifications accepted by push services since process start.
    pub total_sent: u64,

    /// Failed delivery attempts since process start.
    pub total_failed: u64,

    /// Subscriptions currently in the store.
    pub active_subscriptions: u64,
}
