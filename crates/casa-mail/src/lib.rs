//! Email notification boundary for Casabook.
//!
//! Delivery is fire-and-forget: the [`Mailer`] trait reports an outcome
//! instead of an error so callers can log a failure and move on. Order
//! checkout and status-change emails are rendered by [`templates`].

mod mailer;
pub mod templates;

pub use mailer::{ConsoleMailer, MailOutcome, Mailer, MemoryMailer, SenderConfig, SentMail};
pub use templates::{EmailContent, PurchasedItem};
