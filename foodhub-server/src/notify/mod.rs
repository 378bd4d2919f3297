//! Customer notifications
//!
//! Fire-and-forget status-change emails. Two rules hold everywhere:
//!
//! 1. A customer without an email address is skipped — not an error.
//! 2. Transport failures are swallowed after a warn log. A committed status
//!    transition must never look failed because an email bounced.
//!
//! Exactly one send is attempted per committed transition; there is no
//! batching, retry, or delivery confirmation.

pub mod mailer;

pub use mailer::{MailError, Mailer, NoopMailer, SesMailer};

use shared::models::{Delivery, Order, OrderStatus, User};
use std::sync::Arc;

/// Notification dispatch service
///
/// 邮件通知服务：状态变更后尽力通知顾客，失败只记录日志。
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    from_address: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, from_address: impl Into<String>) -> Self {
        Self {
            mailer,
            from_address: from_address.into(),
        }
    }

    /// Notify the customer that their order moved to a new status
    pub async fn order_status_changed(&self, order: &Order, customer: &User) {
        let (subject, body) = order_status_mail(order.id, order.status);
        self.dispatch(customer.email.as_deref(), &subject, &body)
            .await;
    }

    /// Notify the customer that their order's delivery moved to a new status
    pub async fn delivery_status_changed(&self, delivery: &Delivery, order: &Order, customer: &User) {
        let (subject, body) = delivery_status_mail(order.id, delivery);
        self.dispatch(customer.email.as_deref(), &subject, &body)
            .await;
    }

    async fn dispatch(&self, to: Option<&str>, subject: &str, body: &str) {
        let Some(to) = to.filter(|addr| !addr.is_empty()) else {
            tracing::debug!(subject, "Recipient has no email address, skipping notification");
            return;
        };
        match self.mailer.send(&self.from_address, to, subject, body).await {
            Ok(()) => tracing::info!(to, subject, "Notification email sent"),
            Err(e) => tracing::warn!(to, error = %e, "Failed to send notification email"),
        }
    }
}

/// Subject/body for an order status change
fn order_status_mail(order_id: i64, status: OrderStatus) -> (String, String) {
    match status {
        OrderStatus::Preparing => (
            format!("Your order #{order_id} is now PREPARING"),
            "Good news! Your order is being prepared.".to_string(),
        ),
        _ => (
            format!("Your order #{order_id} status changed: {status}"),
            format!("Order #{order_id} is now {status}."),
        ),
    }
}

/// Subject/body for a delivery status change ("picked up", "delivered")
fn delivery_status_mail(order_id: i64, delivery: &Delivery) -> (String, String) {
    (
        format!(
            "Your order #{order_id} has been {}",
            delivery.status.humanized()
        ),
        format!(
            "Order #{order_id} status changed to {}.",
            delivery.status
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DeliveryStatus;

    fn delivery(status: DeliveryStatus) -> Delivery {
        Delivery {
            id: 1,
            order_id: 42,
            rider_id: Some(7),
            status,
            assigned_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_order_preparing_mail_keeps_dedicated_wording() {
        let (subject, body) = order_status_mail(42, OrderStatus::Preparing);
        assert_eq!(subject, "Your order #42 is now PREPARING");
        assert_eq!(body, "Good news! Your order is being prepared.");
    }

    #[test]
    fn test_order_generic_mail() {
        let (subject, body) = order_status_mail(42, OrderStatus::Paid);
        assert_eq!(subject, "Your order #42 status changed: PAID");
        assert_eq!(body, "Order #42 is now PAID.");
    }

    #[test]
    fn test_delivery_mail_uses_humanized_status() {
        let (subject, _) = delivery_status_mail(42, &delivery(DeliveryStatus::PickedUp));
        assert!(subject.to_lowercase().contains("picked up"));
        let (subject, body) = delivery_status_mail(42, &delivery(DeliveryStatus::Delivered));
        assert!(subject.to_lowercase().contains("delivered"));
        assert_eq!(body, "Order #42 status changed to DELIVERED.");
    }
}
