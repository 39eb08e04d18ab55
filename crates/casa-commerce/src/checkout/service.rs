//! The checkout orchestrator.
//!
//! One code path serves both cart checkout and direct purchase; the only
//! difference is where the line items come from. Every mutating step
//! (availability check, cart transition, order assembly, loyalty
//! accrual, stock decrement, cart deletion) runs in a single store
//! transaction. Email dispatch happens strictly after commit and is
//! best-effort: a failed send is logged, never surfaced.

use std::sync::Arc;

use casa_db::Store;
use casa_mail::{templates, Mailer, PurchasedItem};

use crate::cart::{CartLine, CartStatus};
use crate::catalog::{ledger, Book};
use crate::checkout::OrderConfirmation;
use crate::ids::{BookId, CartLineId, OrderId, UserId};
use crate::loyalty;
use crate::orders::{self, Order, OrderDetail, OrderStatus, Recipient};
use crate::users::UserAccount;
use crate::CommerceError;

/// Orchestrates checkout and order status changes.
pub struct CheckoutService {
    store: Store,
    mailer: Arc<dyn Mailer>,
}

impl CheckoutService {
    /// Create a checkout service over the given store and mailer.
    pub fn new(store: Store, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Check out the given cart lines.
    ///
    /// Lines are processed in the order of `line_ids`; ids that do not
    /// resolve to a line owned by the user are ignored, and an empty
    /// remainder fails the whole request. Availability of every line is
    /// verified before the first write, so a single exhausted book
    /// aborts the entire checkout with no mutation.
    pub fn pay_cart(
        &self,
        user_id: &UserId,
        line_ids: &[CartLineId],
        recipient: Recipient,
    ) -> Result<OrderConfirmation, CommerceError> {
        recipient.validate()?;

        let (confirmation, email, items) =
            self.store.transaction::<_, CommerceError, _>(|tx| {
                let user: UserAccount = tx
                    .get(user_id.as_str())?
                    .ok_or(CommerceError::Unauthorized)?;

                let mut lines: Vec<CartLine> = Vec::new();
                for line_id in line_ids {
                    if let Some(line) = tx.get::<CartLine>(line_id.as_str())? {
                        if line.user_id == *user_id {
                            lines.push(line);
                        }
                    }
                }
                if lines.is_empty() {
                    return Err(CommerceError::CartItemNotFound);
                }

                // All-or-nothing pre-check before any write.
                let mut books: Vec<Book> = Vec::with_capacity(lines.len());
                for line in &lines {
                    books.push(ledger::check_availability(tx, &line.book_id, line.quantity)?);
                }

                for line in &mut lines {
                    line.status = CartStatus::Completed;
                    tx.update(line)?;
                }

                let mut placed = Vec::with_capacity(lines.len());
                let mut level = loyalty::level_of(tx, user_id)?;
                for (line, book) in lines.iter().zip(books.iter()) {
                    level = loyalty::accrue(tx, user_id, line.quantity)?;
                    let order = orders::create_order(
                        tx,
                        user_id,
                        &recipient,
                        &line.book_id,
                        line.quantity,
                        book.price,
                    )?;
                    ledger::decrement(tx, &line.book_id, line.quantity)?;
                    placed.push(order);
                }

                for line in &lines {
                    tx.delete::<CartLine>(line.id.as_str())?;
                }

                let items: Vec<PurchasedItem> = lines
                    .iter()
                    .zip(books.iter())
                    .map(|(line, book)| PurchasedItem {
                        book_name: book.name.clone(),
                        quantity: line.quantity,
                    })
                    .collect();

                Ok((
                    OrderConfirmation {
                        orders: placed,
                        level,
                    },
                    user.email,
                    items,
                ))
            })?;

        self.send_confirmation(&email, &recipient.name, &items);
        Ok(confirmation)
    }

    /// Purchase a single book directly, without a cart.
    pub fn direct_order(
        &self,
        user_id: &UserId,
        book_id: &BookId,
        quantity: i64,
        recipient: Recipient,
    ) -> Result<OrderConfirmation, CommerceError> {
        recipient.validate()?;
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let (confirmation, email, items) =
            self.store.transaction::<_, CommerceError, _>(|tx| {
                let user: UserAccount = tx
                    .get(user_id.as_str())?
                    .ok_or(CommerceError::Unauthorized)?;

                let book = ledger::check_availability(tx, book_id, quantity)?;
                let level = loyalty::accrue(tx, user_id, quantity)?;
                let placed = orders::create_order(
                    tx,
                    user_id,
                    &recipient,
                    book_id,
                    quantity,
                    book.price,
                )?;
                ledger::decrement(tx, book_id, quantity)?;

                let items = vec![PurchasedItem {
                    book_name: book.name.clone(),
                    quantity,
                }];

                Ok((
                    OrderConfirmation {
                        orders: vec![placed],
                        level,
                    },
                    user.email,
                    items,
                ))
            })?;

        self.send_confirmation(&email, &recipient.name, &items);
        Ok(confirmation)
    }

    /// Set an order's status and notify the buyer.
    ///
    /// The status change persists unconditionally; the email is
    /// best-effort afterwards. The one email-related hard failure is an
    /// unresolvable owning user, because then there is nobody to notify.
    pub fn set_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, CommerceError> {
        let (order, user, book_name) = self.store.transaction::<_, CommerceError, _>(|tx| {
            let mut order: Order = tx
                .get(order_id.as_str())?
                .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;

            let user: UserAccount = tx
                .get(order.user_id.as_str())?
                .ok_or_else(|| CommerceError::UserNotFound(order.user_id.to_string()))?;

            order.status = status;
            tx.update(&order)?;

            let detail = tx.find_one::<OrderDetail>(|d| d.order_id == order.id)?;
            let book_name = match &detail {
                Some(detail) => tx.get::<Book>(detail.book_id.as_str())?.map(|b| b.name),
                None => None,
            };

            Ok((order, user, book_name))
        })?;

        let book_name = book_name.unwrap_or_else(|| format!("order {}", order.id));
        let content = match status {
            OrderStatus::Processing => {
                templates::order_processing(&order.recipient.name, &book_name)
            }
            OrderStatus::Completed => templates::order_completed(&order.recipient.name, &book_name),
            OrderStatus::Canceled => templates::order_canceled(&order.recipient.name, &book_name),
            other => {
                templates::order_status_changed(&order.recipient.name, &book_name, other.as_str())
            }
        };
        let outcome = self.mailer.send(
            &user.email,
            &content.subject,
            Some(&content.text),
            Some(&content.html),
        );
        if outcome.success {
            tracing::info!(order = %order.id, status = status.as_str(), "status email sent");
        } else {
            tracing::warn!(
                order = %order.id,
                status = status.as_str(),
                reason = %outcome.message,
                "status email failed to send"
            );
        }

        Ok(order)
    }

    fn send_confirmation(&self, email: &str, recipient_name: &str, items: &[PurchasedItem]) {
        let content = templates::order_confirmation(recipient_name, items);
        let outcome = self.mailer.send(
            email,
            &content.subject,
            Some(&content.text),
            Some(&content.html),
        );
        if outcome.success {
            tracing::info!(to = email, "order confirmation sent");
        } else {
            tracing::warn!(
                to = email,
                reason = %outcome.message,
                "order confirmation failed to send"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BookKind, Stock};
    use crate::ids::LabelId;
    use crate::money::{Currency, Money};
    use crate::users::Role;
    use casa_mail::MemoryMailer;

    fn seeded(mailer: Arc<MemoryMailer>) -> (CheckoutService, Store, UserId, BookId) {
        let store = Store::new();
        let user_id = UserId::generate();
        store
            .insert(&UserAccount {
                id: user_id.clone(),
                email: "an@example.com".to_string(),
                username: "an".to_string(),
                password_hash: "hash".to_string(),
                role: Role::User,
            })
            .unwrap();
        let book = Book {
            id: BookId::generate(),
            name: "Kafka on the Shore".to_string(),
            price: Money::new(120000, Currency::Vnd),
            image_url: "https://cdn.local/books/kots.png".to_string(),
            description: "desc".to_string(),
            kind: BookKind::New,
            label_id: LabelId::new("label-1"),
            stock: Stock::tracked(10),
        };
        store.insert(&book).unwrap();
        let service = CheckoutService::new(store.clone(), mailer);
        (service, store, user_id, book.id)
    }

    #[test]
    fn test_set_status_persists_when_email_fails() {
        let mailer = Arc::new(MemoryMailer::failing());
        let (service, store, user_id, book_id) = seeded(mailer.clone());

        let confirmation = service
            .direct_order(
                &user_id,
                &book_id,
                1,
                Recipient::new("An", "0901", "Da Nang"),
            )
            .unwrap();
        let order_id = confirmation.orders[0].order.id.clone();

        let updated = service
            .set_status(&order_id, OrderStatus::Canceled)
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Canceled);

        let stored: Order = store.get(order_id.as_str()).unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Canceled);
    }

    #[test]
    fn test_set_status_blocks_without_owning_user() {
        let mailer = Arc::new(MemoryMailer::new());
        let (service, store, user_id, book_id) = seeded(mailer);

        let confirmation = service
            .direct_order(
                &user_id,
                &book_id,
                1,
                Recipient::new("An", "0901", "Da Nang"),
            )
            .unwrap();
        let order_id = confirmation.orders[0].order.id.clone();

        store
            .transaction::<_, CommerceError, _>(|tx| {
                tx.delete::<UserAccount>(user_id.as_str())?;
                Ok(())
            })
            .unwrap();

        let err = service
            .set_status(&order_id, OrderStatus::Processing)
            .unwrap_err();
        assert!(matches!(err, CommerceError::UserNotFound(_)));

        let stored: Order = store.get(order_id.as_str()).unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[test]
    fn test_status_emails_use_distinct_templates() {
        let mailer = Arc::new(MemoryMailer::new());
        let (service, _, user_id, book_id) = seeded(mailer.clone());

        let confirmation = service
            .direct_order(
                &user_id,
                &book_id,
                1,
                Recipient::new("An", "0901", "Da Nang"),
            )
            .unwrap();
        let order_id = confirmation.orders[0].order.id.clone();

        service
            .set_status(&order_id, OrderStatus::Processing)
            .unwrap();
        service
            .set_status(&order_id, OrderStatus::Completed)
            .unwrap();
        service.set_status(&order_id, OrderStatus::Canceled).unwrap();
        service.set_status(&order_id, OrderStatus::Pending).unwrap();

        // 1 confirmation + 4 status mails
        let sent = mailer.sent();
        assert_eq!(sent.len(), 5);
        let status_subjects: Vec<&str> =
            sent[1..].iter().map(|mail| mail.subject.as_str()).collect();
        for i in 0..status_subjects.len() {
            for j in (i + 1)..status_subjects.len() {
                assert_ne!(status_subjects[i], status_subjects[j]);
            }
        }
    }

    #[test]
    fn test_set_status_missing_order() {
        let mailer = Arc::new(MemoryMailer::new());
        let (service, _, _, _) = seeded(mailer);

        let err = service
            .set_status(&OrderId::new("missing"), OrderStatus::Completed)
            .unwrap_err();
        assert!(matches!(err, CommerceError::OrderNotFound(_)));
    }
}
