use crate::api::types::{Notification, NotificationCategory};

/// Click-to-navigate table: `(category, entityType)` to a dashboard URL
/// template. Data, not logic; unmapped pairs suppress navigation.
const ROUTES: &[(NotificationCategory, &str, &str)] = &[
    (
        NotificationCategory::Service,
        "service_application",
        "/services/applications/{id}",
    ),
    (NotificationCategory::Payment, "transfer", "/payments/transfers/{id}"),
    (
        NotificationCategory::Payment,
        "subscription_payment",
        "/payments/subscriptions/{id}",
    ),
    (NotificationCategory::Transfer, "transfer", "/payments/transfers/{id}"),
    (
        NotificationCategory::Subscription,
        "subscription",
        "/subscriptions/{id}",
    ),
];

/// Destination for a clicked notification, or `None` when the pair is not
/// in the table.
pub fn route_for(notification: &Notification) -> Option<String> {
    let entity_type = notification.metadata.entity_type.as_str();
    ROUTES
        .iter()
        .find(|(category, et, _)| *category == notification.category && *et == entity_type)
        .map(|(_, _, template)| {
            template.replace(
                "{id}",
                &urlencoding::encode(&notification.metadata.entity_id),
            )
        })
}
