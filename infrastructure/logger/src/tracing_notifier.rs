use business::domain::notifier::{Notification, Notifier, Severity};
use tracing::{info, warn};

/// Emits shopper notifications as structured `tracing` events under the
/// `storefront::notification` target, for hosts without a toast surface.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Destructive => warn!(
                target: "storefront::notification",
                title = %notification.title,
                severity = %notification.severity,
                "{}",
                notification.description
            ),
            Severity::Info => info!(
                target: "storefront::notification",
                title = %notification.title,
                severity = %notification.severity,
                "{}",
                notification.description
            ),
        }
    }
}
