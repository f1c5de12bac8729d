/// Orbit Web Push Shared Library
///
/// This library provides a unified Web Push (RFC 8030) client for sending
/// encrypted push messages to browser push services across the Orbit platform.
///
/// It handles:
/// - VAPID authentication (RFC 8292) using a platform P-256 signing key
/// - Payload encryption (RFC 8291, aes128gcm) via the `web-push` crate
/// - HTTP delivery through a shared `reqwest` client with a request timeout
/// - Response classification: permanent endpoint invalidity vs transient failure

pub mod client;
pub mod errors;
pub mod models;

pub use client::WebPushClient;
pub use errors::WebPushError;
pub use models::{VapidConfig, WebPushSendResult};
