use serde::{Deserialize, Serialize};

/// VAPID credentials identifying the application server (RFC 8292).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VapidConfig {
    /// Base64url-encoded P-256 private signing key.
    pub private_key: String,

    /// Contact claim embedded in the VAPID JWT, e.g. `mailto:push@orbit.dev`.
    pub subject: String,
}

/// Result of a successful web push delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebPushSendResult {
    /// HTTP status returned by the push service (2xx).
    pub status: u16,
}
