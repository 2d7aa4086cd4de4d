/// Request validation and payload shaping
///
/// Turns the admin client's raw request bodies into validated
/// `NotificationPayload`s before any dispatch work begins. Display text is
/// trimmed and required; priority folds leniently to medium; unknown extra
/// fields were already dropped by serde.
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{CustomNotificationRequest, NotificationPayload, PriceData, Priority};

/// Validate a custom notification request.
pub fn validate_custom(req: &CustomNotificationRequest) -> Result<NotificationPayload> {
    let title = required_text(req.title.as_deref(), "title")?;
    let body = required_text(req.message.as_deref(), "message")?;

    let mut data = HashMap::new();
    data.insert("screen".to_string(), "Notifications".to_string());
    // Advisory only: carried through so the app can filter by market
    // client-side. The dispatcher itself broadcasts to every token.
    if let Some(audience) = non_empty(req.target_audience.as_deref()) {
        data.insert("targetAudience".to_string(), audience);
    }
    if let Some(market) = non_empty(req.target_market.as_deref()) {
        data.insert("targetMarket".to_string(), market);
    }

    Ok(NotificationPayload {
        title,
        body,
        data,
        priority: Priority::parse(req.priority.as_deref()),
        image_url: non_empty(req.image_url.as_deref()),
    })
}

/// Derive a price-update notification from the admin's price snapshot.
pub fn validate_price(price: &PriceData) -> Result<NotificationPayload> {
    let market = required_text(price.market.as_deref(), "priceData.market")?;

    let mut parts = Vec::new();
    if let Some(breed) = non_empty(price.breed.as_deref()) {
        parts.push(format!("Breed: {}", breed));
    }
    if let Some(min) = price.min_price {
        parts.push(format!("Min: ₹{}", format_price(min)));
    }
    if let Some(max) = price.max_price {
        parts.push(format!("Max: ₹{}", format_price(max)));
    }
    if let Some(avg) = price.avg_price {
        parts.push(format!("Avg: ₹{}", format_price(avg)));
    }

    let body = if parts.is_empty() {
        format!("New cocoon prices published for {}", market)
    } else {
        parts.join(" | ")
    };

    let mut data = HashMap::new();
    data.insert("screen".to_string(), "PriceDetails".to_string());
    data.insert("market".to_string(), market.clone());

    Ok(NotificationPayload {
        title: format!("Cocoon Price Update: {}", market),
        body,
        data,
        priority: Priority::Medium,
        image_url: None,
    })
}

fn required_text(value: Option<&str>, field: &str) -> Result<String> {
    match non_empty(value) {
        Some(text) => Ok(text),
        None => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn format_price(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
