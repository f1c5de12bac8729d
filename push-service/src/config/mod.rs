use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vapid: VapidSettings,
    pub dispatch: DispatchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VapidSettings {
    /// Base64url-encoded P-256 private signing key.
    pub private_key: String,
    /// Contact claim for the VAPID JWT.
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Cap on simultaneous in-flight deliveries (default: 32)
    pub max_in_flight: usize,
    /// Push service message TTL in seconds (default: 86400)
    pub ttl_secs: u32,
    /// Per-delivery request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Optional serialized-payload size limit; unset means title-only validation
    pub max_payload_bytes: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            vapid: VapidSettings {
                private_key: std::env::var("VAPID_PRIVATE_KEY")?,
                subject: std::env::var("VAPID_SUBJECT")
                    .unwrap_or_else(|_| "mailto:push@orbit.dev".to_string()),
            },
            dispatch: DispatchSettings {
                max_in_flight: std::env::var("PUSH_MAX_IN_FLIGHT")
                    .unwrap_or_else(|_| "32".to_string())
                    .parse()?,
                ttl_secs: std::env::var("PUSH_TTL_SECS")
                    .unwrap_or_else(|_| "86400".to_string())
                    .parse()?,
                request_timeout_secs: std::env::var("PUSH_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
                max_payload_bytes: match std::env::var("PUSH_MAX_PAYLOAD_BYTES") {
                    Ok(v) => Some(v.parse()?),
                    Err(_) => None,
                },
            },
        })
    }
}
