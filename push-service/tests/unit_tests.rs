/// Unit tests for push-service core types
///
/// This test module covers:
/// - Notification payload defaults and wire shape
/// - Browser subscription JSON compatibility
/// - Delivery outcome helpers
use push_service::models::*;

#[test]
fn test_payload_defaults() {
    let payload = NotificationPayload::new("Hello");

    assert_eq!(payload.title, "Hello");
    assert_eq!(payload.body, "");
    assert_eq!(payload.icon, "/icons/icon-192x192.png");
    assert_eq!(payload.image, None);
    assert_eq!(payload.data.url, "/");
    assert_eq!(payload.tag, "general");
}

#[test]
fn test_payload_deserializes_with_defaults() {
    let payload: NotificationPayload = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();

    assert_eq!(payload.title, "Hi");
    assert_eq!(payload.icon, "/icons/icon-192x192.png");
    assert_eq!(payload.data.url, "/");
    assert_eq!(payload.tag, "general");
}

#[test]
fn test_payload_wire_shape_omits_absent_image() {
    let payload = NotificationPayload::new("Hello");
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["title"], "Hello");
    assert_eq!(json["icon"], "/icons/icon-192x192.png");
    assert_eq!(json["data"]["url"], "/");
    assert_eq!(json["tag"], "general");
    assert!(json.get("image").is_none());
}

#[test]
fn test_payload_wire_shape_includes_present_image() {
    let mut payload = NotificationPayload::new("Hello");
    payload.image = Some("/images/banner.png".to_string());

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["image"], "/images/banner.png");
}

#[test]
fn test_subscription_parses_browser_json() {
    // Shape of PushSubscription.toJSON() from the browser.
    let raw = r#"{
        "endpoint": "https://fcm.googleapis.com/fcm/send/abc123",
        "keys": {
            "p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM",
            "auth": "tBHItJI5svbpez7KI4CCXg"
        }
    }"#;

    let subscription: PushSubscription = serde_json::from_str(raw).unwrap();
    assert_eq!(
        subscription.endpoint,
        "https://fcm.googleapis.com/fcm/send/abc123"
    );
    assert_eq!(subscription.keys.auth, "tBHItJI5svbpez7KI4CCXg");
}

#[test]
fn test_delivery_outcome_helpers() {
    assert!(DeliveryOutcome::Delivered.is_delivered());
    assert!(!DeliveryOutcome::Delivered.is_permanent_failure());

    let gone = DeliveryOutcome::PermanentFailure("HTTP 410".to_string());
    assert!(gone.is_permanent_failure());
    assert!(!gone.is_delivered());

    let flaky = DeliveryOutcome::TransientFailure("timeout".to_string());
    assert!(!flaky.is_permanent_failure());
    assert!(!flaky.is_delivered());
}

#[test]
fn test_delivery_outcome_serialization() {
    let outcomes = vec![
        DeliveryOutcome::Delivered,
        DeliveryOutcome::TransientFailure("HTTP 500".to_string()),
        DeliveryOutcome::PermanentFailure("HTTP 410".to_string()),
    ];

    for outcome in outcomes {
        let json = serde_json::to_string(&outcome).unwrap();
        let deserialized: DeliveryOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, deserialized);
    }
}

#[test]
fn test_empty_dispatch_result() {
    let result = DispatchResult::empty();
    assert_eq!(result.sent, 0);
    assert_eq!(result.failed, 0);
    assert_eq!(result.total, 0);
    assert!(result.outcomes.is_empty());
}
