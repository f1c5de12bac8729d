use thiserror::Error;

/// Web Push Client Error Types
#[derive(Error, Debug)]
pub enum WebPushError {
    #[error("Failed to build VAPID signature: {0}")]
    VapidSignature(String),

    #[error("Failed to build web push message: {0}")]
    MessageBuild(String),

    #[error("Web push HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Subscription endpoint is gone (HTTP {0})")]
    EndpointGone(u16),

    #[error("Payload exceeds push service limit (HTTP 413)")]
    PayloadTooLarge,

    #[error("Push service rate limited the request (HTTP 429)")]
    RateLimited,

    #[error("Push service error: HTTP {status} - {body}")]
    Response { status: u16, body: String },
}

impl WebPushError {
    /// Whether the push service reported the subscription itself as dead.
    ///
    /// RFC 8030 uses 404/410 for endpoints that no longer exist; every other
    /// failure leaves the subscription potentially reachable on a later attempt.
    pub fn is_endpoint_gone(&self) -> bool {
        matches!(self, WebPushError::EndpointGone(_))
    }
}
