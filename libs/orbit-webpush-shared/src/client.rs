use std::time::Duration;

use web_push::{ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushMessageBuilder};

use crate::errors::WebPushError;
use crate::models::{VapidConfig, WebPushSendResult};

/// Default message TTL held by push services for offline clients.
const DEFAULT_TTL_SECS: u32 = 86_400;

/// Default per-request timeout. A timed-out attempt is a transient failure.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Web Push Client
///
/// Sends encrypted push messages (RFC 8030) to browser push service endpoints.
/// Encrypts the payload per RFC 8291 and signs a VAPID JWT per RFC 8292 using
/// the `web-push` crate, then performs the HTTP request through a shared
/// `reqwest` client so connections are pooled across deliveries.
pub struct WebPushClient {
    vapid: VapidConfig,
    ttl: u32,
    http_client: reqwest::Client,
}

impl WebPushClient {
    /// Create a new web push client with default TTL and request timeout.
    ///
    /// # Arguments
    /// * `vapid` - Application server VAPID credentials
    pub fn new(vapid: VapidConfig) -> Result<Self, WebPushError> {
        Self::with_settings(
            vapid,
            DEFAULT_TTL_SECS,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Create a new web push client with explicit TTL and request timeout.
    pub fn with_settings(
        vapid: VapidConfig,
        ttl: u32,
        request_timeout: Duration,
    ) -> Result<Self, WebPushError> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            vapid,
            ttl,
            http_client,
        })
    }

    /// Send one encrypted message to one subscription endpoint.
    ///
    /// `p256dh` and `auth` are the base64url key material from the browser's
    /// subscription. The payload is opaque bytes; callers serialize their own
    /// notification shape.
    pub async fn send(
        &self,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
        payload: &[u8],
    ) -> Result<WebPushSendResult, WebPushError> {
        let sub_info = SubscriptionInfo::new(endpoint, p256dh, auth);

        let mut sig_builder =
            VapidSignatureBuilder::from_base64(&self.vapid.private_key, &sub_info)
                .map_err(|e| WebPushError::VapidSignature(e.to_string()))?;
        sig_builder.add_claim("sub", self.vapid.subject.as_str());
        let signature = sig_builder
            .build()
            .map_err(|e| WebPushError::VapidSignature(e.to_string()))?;

        let mut builder = WebPushMessageBuilder::new(&sub_info);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);
        builder.set_vapid_signature(signature);
        builder.set_ttl(self.ttl);

        let message = builder
            .build()
            .map_err(|e| WebPushError::MessageBuild(e.to_string()))?;

        let mut request = self
            .http_client
            .post(message.endpoint.to_string())
            .header("TTL", message.ttl.to_string());

        if let Some(urgency) = message.urgency {
            request = request.header("Urgency", urgency.to_string());
        }

        if let Some(topic) = message.topic {
            request = request.header("Topic", topic);
        }

        if let Some(push_payload) = message.payload {
            request = request
                .header("Content-Encoding", push_payload.content_encoding.to_str())
                .header("Content-Type", "application/octet-stream");

            for (key, value) in &push_payload.crypto_headers {
                request = request.header(*key, value.as_str());
            }

            request = request.body(push_payload.content);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        match status {
            200..=299 => {
                tracing::debug!("Web push delivered (HTTP {})", status);
                Ok(WebPushSendResult { status })
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(classify_failure(status, body))
            }
        }
    }
}

/// Map a non-success push service status to an error.
///
/// 404/410 mean the subscription no longer exists and must be forgotten;
/// everything else is retryable on a later dispatch.
fn classify_failure(status: u16, body: String) -> WebPushError {
    match status {
        404 | 410 => WebPushError::EndpointGone(status),
        413 => WebPushError::PayloadTooLarge,
        429 => WebPushError::RateLimited,
        _ => WebPushError::Response { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_gone_statuses() {
        assert!(classify_failure(410, String::new()).is_endpoint_gone());
        assert!(classify_failure(404, String::new()).is_endpoint_gone());
    }

    #[test]
    fn test_classify_transient_statuses() {
        assert!(matches!(
            classify_failure(429, String::new()),
            WebPushError::RateLimited
        ));
        assert!(matches!(
            classify_failure(413, String::new()),
            WebPushError::PayloadTooLarge
        ));
        assert!(matches!(
            classify_failure(500, "oops".to_string()),
            WebPushError::Response { status: 500, .. }
        ));
        assert!(!classify_failure(500, String::new()).is_endpoint_gone());
    }

    #[test]
    fn test_client_construction() {
        let client = WebPushClient::new(VapidConfig {
            private_key: "AAAA".to_string(),
            subject: "mailto:push@orbit.dev".to_string(),
        });
        assert!(client.is_ok());
    }
}
