use fanout_service::models::*;
/// Unit tests for fanout-service core functionality
///
/// This test module covers:
/// - Transport kind classification and backward compatibility
/// - Priority parsing and defaults
/// - Request validation and payload shaping
/// - Response wire formats
use fanout_service::services::{validate_custom, validate_price};
use serde_json::json;

#[test]
fn test_transport_kind_from_explicit_type() {
    assert_eq!(
        TransportKind::from_token_type(Some("fcm"), "fGzK9raw-registration-token"),
        TransportKind::Fcm
    );
    assert_eq!(
        TransportKind::from_token_type(Some("FCM"), "fGzK9raw-registration-token"),
        TransportKind::Fcm
    );
    assert_eq!(
        TransportKind::from_token_type(Some("expo"), "ExponentPushToken[abc]"),
        TransportKind::Expo
    );
}

#[test]
fn test_transport_kind_defaults_to_expo() {
    // Older clients never recorded a token type.
    assert_eq!(
        TransportKind::from_token_type(None, "ExponentPushToken[abc]"),
        TransportKind::Expo
    );
    assert_eq!(
        TransportKind::from_token_type(None, "anything-else"),
        TransportKind::Expo
    );
    assert_eq!(
        TransportKind::from_token_type(Some("unknown"), "anything-else"),
        TransportKind::Expo
    );
}

#[test]
fn test_expo_shaped_token_overrides_fcm_claim() {
    // A relay-issued token can never be delivered natively, whatever the
    // client claimed at registration.
    assert_eq!(
        TransportKind::from_token_type(Some("fcm"), "ExponentPushToken[abc]"),
        TransportKind::Expo
    );
}

#[test]
fn test_stored_transport_parses_with_expo_fallback() {
    assert_eq!(TransportKind::parse("fcm"), TransportKind::Fcm);
    assert_eq!(TransportKind::parse("expo"), TransportKind::Expo);
    assert_eq!(TransportKind::parse(""), TransportKind::Expo);
    assert_eq!(TransportKind::parse("legacy"), TransportKind::Expo);
}

#[test]
fn test_priority_parses_leniently() {
    assert_eq!(Priority::parse(Some("low")), Priority::Low);
    assert_eq!(Priority::parse(Some("HIGH")), Priority::High);
    assert_eq!(Priority::parse(Some("medium")), Priority::Medium);
    assert_eq!(Priority::parse(Some("urgent")), Priority::Medium);
    assert_eq!(Priority::parse(None), Priority::Medium);
}

#[test]
fn test_validate_custom_accepts_minimal_request() {
    let req = CustomNotificationRequest {
        title: Some("Price Update".to_string()),
        message: Some("Min: 100 Max:200".to_string()),
        priority: None,
        target_audience: None,
        target_market: None,
        image_url: None,
    };

    let payload = validate_custom(&req).unwrap();
    assert_eq!(payload.title, "Price Update");
    assert_eq!(payload.body, "Min: 100 Max:200");
    assert_eq!(payload.priority, Priority::Medium);
    assert!(payload.image_url.is_none());
}

#[test]
fn test_validate_custom_rejects_blank_title_and_message() {
    let blank_title = CustomNotificationRequest {
        title: Some("   ".to_string()),
        message: Some("body".to_string()),
        priority: None,
        target_audience: None,
        target_market: None,
        image_url: None,
    };
    assert!(validate_custom(&blank_title).is_err());

    let missing_message = CustomNotificationRequest {
        title: Some("title".to_string()),
        message: None,
        priority: None,
        target_audience: None,
        target_market: None,
        image_url: None,
    };
    assert!(validate_custom(&missing_message).is_err());
}

#[test]
fn test_validate_custom_carries_target_fields_as_data() {
    let req = CustomNotificationRequest {
        title: Some("Holiday notice".to_string()),
        message: Some("Market closed tomorrow".to_string()),
        priority: Some("high".to_string()),
        target_audience: Some("market_specific".to_string()),
        target_market: Some("Ramanagara".to_string()),
        image_url: Some("https://example.com/notice.png".to_string()),
    };

    let payload = validate_custom(&req).unwrap();
    assert_eq!(payload.priority, Priority::High);
    assert_eq!(
        payload.data.get("targetMarket").map(String::as_str),
        Some("Ramanagara")
    );
    assert_eq!(
        payload.data.get("targetAudience").map(String::as_str),
        Some("market_specific")
    );
    assert_eq!(
        payload.image_url.as_deref(),
        Some("https://example.com/notice.png")
    );
}

#[test]
fn test_custom_request_ignores_unknown_fields() {
    let raw = json!({
        "title": "Price Update",
        "message": "Min: 100 Max:200",
        "priority": "low",
        "someFutureField": {"nested": true},
        "anotherOne": 42
    });

    let req: CustomNotificationRequest = serde_json::from_value(raw).unwrap();
    let payload = validate_custom(&req).unwrap();
    assert_eq!(payload.priority, Priority::Low);
}

#[test]
fn test_validate_price_derives_title_and_body() {
    let price = PriceData {
        market: Some("Ramanagara".to_string()),
        breed: Some("CB Gold".to_string()),
        min_price: Some(350.0),
        max_price: Some(512.5),
        avg_price: Some(430.0),
    };

    let payload = validate_price(&price).unwrap();
    assert_eq!(payload.title, "Cocoon Price Update: Ramanagara");
    assert_eq!(
        payload.body,
        "Breed: CB Gold | Min: ₹350 | Max: ₹512.50 | Avg: ₹430"
    );
    assert_eq!(payload.priority, Priority::Medium);
    assert_eq!(
        payload.data.get("market").map(String::as_str),
        Some("Ramanagara")
    );
}

#[test]
fn test_validate_price_requires_market() {
    let price = PriceData {
        market: None,
        breed: None,
        min_price: Some(100.0),
        max_price: Some(200.0),
        avg_price: None,
    };
    assert!(validate_price(&price).is_err());
}

#[test]
fn test_validate_price_falls_back_without_numbers() {
    let price = PriceData {
        market: Some("Siddlaghatta".to_string()),
        breed: None,
        min_price: None,
        max_price: None,
        avg_price: None,
    };

    let payload = validate_price(&price).unwrap();
    assert_eq!(payload.body, "New cocoon prices published for Siddlaghatta");
}

#[test]
fn test_price_data_parses_camel_case() {
    let raw = json!({
        "market": "Ramanagara",
        "breed": "BV",
        "minPrice": 310,
        "maxPrice": 480,
        "avgPrice": 400,
        "updatedBy": "admin-7"
    });

    let price: PriceData = serde_json::from_value(raw).unwrap();
    assert_eq!(price.min_price, Some(310.0));
    assert_eq!(price.max_price, Some(480.0));
}

#[test]
fn test_channel_tally_counts_results() {
    let results = vec![
        PerTokenResult {
            token: "a".to_string(),
            succeeded: true,
            permanently_invalid: false,
            error_detail: None,
        },
        PerTokenResult {
            token: "b".to_string(),
            succeeded: false,
            permanently_invalid: true,
            error_detail: Some("UNREGISTERED".to_string()),
        },
        PerTokenResult {
            token: "c".to_string(),
            succeeded: false,
            permanently_invalid: false,
            error_detail: Some("timeout".to_string()),
        },
    ];

    let tally = ChannelTally::from_results(&results);
    assert_eq!(tally.sent, 1);
    assert_eq!(tally.failed, 2);
}

#[test]
fn test_dispatch_outcome_totals() {
    let outcome = DispatchOutcome {
        fcm: ChannelTally { sent: 2, failed: 1 },
        expo: ChannelTally { sent: 1, failed: 1 },
        invalid_tokens_removed: 1,
    };

    assert_eq!(outcome.total_sent(), 3);
    assert_eq!(outcome.total_failed(), 2);
}

#[test]
fn test_payload_data_value_empty_is_none() {
    let payload = NotificationPayload {
        title: "t".to_string(),
        body: "b".to_string(),
        data: Default::default(),
        priority: Priority::Medium,
        image_url: None,
    };
    assert!(payload.data_value().is_none());
}
