//! Reporting surface tests.

use std::sync::Arc;

use casa_commerce::catalog::{Book, BookKind, Stock};
use casa_commerce::checkout::CheckoutService;
use casa_commerce::ids::{BookId, LabelId, UserId};
use casa_commerce::money::{Currency, Money};
use casa_commerce::orders::Recipient;
use casa_commerce::reports;
use casa_commerce::users::{Role, UserAccount};
use casa_commerce::CommerceError;
use casa_db::Store;
use casa_mail::MemoryMailer;
use chrono::{Duration, NaiveDate, Utc};

fn seed_user(store: &Store) -> UserId {
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
    user_id
}

fn seed_book(store: &Store, name: &str) -> BookId {
    let book = Book {
        id: BookId::generate(),
        name: name.to_string(),
        price: Money::new(1000, Currency::Vnd),
        image_url: format!("https://cdn.local/books/{name}.png"),
        description: "desc".to_string(),
        kind: BookKind::New,
        label_id: LabelId::new("label-1"),
        stock: Stock::untracked(),
    };
    store.insert(&book).unwrap();
    book.id
}

fn buy(store: &Store, user_id: &UserId, book_id: &BookId, qty: i64) {
    let checkout = CheckoutService::new(store.clone(), Arc::new(MemoryMailer::new()));
    checkout
        .direct_order(
            user_id,
            book_id,
            qty,
            Recipient::new("An", "0901", "Da Nang"),
        )
        .unwrap();
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[test]
fn best_sellers_ranks_by_quantity_descending() {
    let store = Store::new();
    let user_id = seed_user(&store);
    let dune = seed_book(&store, "Dune");
    let hyperion = seed_book(&store, "Hyperion");
    let solaris = seed_book(&store, "Solaris");

    buy(&store, &user_id, &dune, 2);
    buy(&store, &user_id, &hyperion, 7);
    buy(&store, &user_id, &solaris, 4);
    buy(&store, &user_id, &dune, 1);

    let sellers = reports::best_sellers(&store, today(), today()).unwrap();
    assert_eq!(sellers.len(), 3);
    assert_eq!(sellers[0].book.name, "Hyperion");
    assert_eq!(sellers[0].total_quantity, 7);
    assert_eq!(sellers[1].book.name, "Solaris");
    assert_eq!(sellers[2].book.name, "Dune");
    assert_eq!(sellers[2].total_quantity, 3);
}

#[test]
fn best_sellers_truncates_to_top_ten() {
    let store = Store::new();
    let user_id = seed_user(&store);
    for i in 0..12 {
        let book_id = seed_book(&store, &format!("Book{i}"));
        buy(&store, &user_id, &book_id, i + 1);
    }

    let sellers = reports::best_sellers(&store, today(), today()).unwrap();
    assert_eq!(sellers.len(), 10);
    assert_eq!(sellers[0].total_quantity, 12);
    assert_eq!(sellers[9].total_quantity, 3);
}

#[test]
fn best_sellers_excludes_orders_outside_window() {
    let store = Store::new();
    let user_id = seed_user(&store);
    let dune = seed_book(&store, "Dune");
    buy(&store, &user_id, &dune, 3);

    let yesterday = today() - Duration::days(1);
    let sellers = reports::best_sellers(&store, yesterday, yesterday).unwrap();
    assert!(sellers.is_empty());
}

#[test]
fn order_volume_zero_fills_missing_days() {
    let store = Store::new();
    let user_id = seed_user(&store);
    let dune = seed_book(&store, "Dune");
    buy(&store, &user_id, &dune, 1);
    buy(&store, &user_id, &dune, 1);

    let start = today() - Duration::days(2);
    let volume = reports::order_volume(&store, start, today()).unwrap();

    assert_eq!(volume.len(), 3);
    assert_eq!(volume[0].date, start);
    assert_eq!(volume[0].count, 0);
    assert_eq!(volume[1].count, 0);
    assert_eq!(volume[2].date, today());
    assert_eq!(volume[2].count, 2);
}

#[test]
fn reports_ignore_books_deleted_after_sale() {
    let store = Store::new();
    let user_id = seed_user(&store);
    let dune = seed_book(&store, "Dune");
    buy(&store, &user_id, &dune, 1);

    store
        .transaction::<_, CommerceError, _>(|tx| {
            tx.delete::<Book>(dune.as_str())?;
            Ok(())
        })
        .unwrap();

    let sellers = reports::best_sellers(&store, today(), today()).unwrap();
    assert!(sellers.is_empty());
}
