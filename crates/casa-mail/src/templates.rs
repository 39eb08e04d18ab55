//! Email rendering for order notifications.
//!
//! One template per status change plus the checkout confirmation; the
//! orchestrator picks the template and the mailer does the rest.

use serde::{Deserialize, Serialize};

/// A rendered email: subject plus text and HTML bodies.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// One purchased line for the confirmation email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasedItem {
    pub book_name: String,
    pub quantity: i64,
}

/// Confirmation listing every purchased item of a checkout.
pub fn order_confirmation(recipient_name: &str, items: &[PurchasedItem]) -> EmailContent {
    let mut lines = String::new();
    let mut rows = String::new();
    for item in items {
        lines.push_str(&format!("  - {} x{}\n", item.book_name, item.quantity));
        rows.push_str(&format!(
            "<li>{} &times; {}</li>",
            escape_html(&item.book_name),
            item.quantity
        ));
    }

    EmailContent {
        subject: "Your order has been placed".to_string(),
        text: format!(
            "Hi {recipient_name},\n\nThank you for your order. You purchased:\n{lines}\nWe will let you know when it ships.\n"
        ),
        html: format!(
            "<p>Hi {},</p><p>Thank you for your order. You purchased:</p><ul>{}</ul><p>We will let you know when it ships.</p>",
            escape_html(recipient_name),
            rows
        ),
    }
}

/// Status email for an order that entered processing.
pub fn order_processing(recipient_name: &str, book_name: &str) -> EmailContent {
    status_email(
        "Your order is being prepared",
        recipient_name,
        &format!("your order for \"{book_name}\" is now being prepared"),
    )
}

/// Status email for a completed order.
pub fn order_completed(recipient_name: &str, book_name: &str) -> EmailContent {
    status_email(
        "Your order has been delivered",
        recipient_name,
        &format!("your order for \"{book_name}\" has been completed. Enjoy!"),
    )
}

/// Status email for a canceled order.
pub fn order_canceled(recipient_name: &str, book_name: &str) -> EmailContent {
    status_email(
        "Your order has been canceled",
        recipient_name,
        &format!(
            "your order for \"{book_name}\" has been canceled. If this was unexpected, please contact us"
        ),
    )
}

/// Fallback for any other status value.
pub fn order_status_changed(recipient_name: &str, book_name: &str, status: &str) -> EmailContent {
    status_email(
        "Your order status has changed",
        recipient_name,
        &format!("your order for \"{book_name}\" is now marked as {status}"),
    )
}

fn status_email(subject: &str, recipient_name: &str, sentence: &str) -> EmailContent {
    EmailContent {
        subject: subject.to_string(),
        text: format!("Hi {recipient_name},\n\nJust to let you know: {sentence}.\n"),
        html: format!(
            "<p>Hi {},</p><p>Just to let you know: {}.</p>",
            escape_html(recipient_name),
            escape_html(sentence)
        ),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
