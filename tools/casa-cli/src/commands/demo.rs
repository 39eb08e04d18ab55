//! Run an end-to-end cart checkout against the seeded store.

use std::sync::Arc;

use anyhow::{bail, Result};
use casa_auth::AuthService;
use casa_commerce::cart::CartService;
use casa_commerce::catalog::Book;
use casa_commerce::checkout::CheckoutService;
use casa_db::Store;
use casa_mail::ConsoleMailer;
use console::style;

use crate::config::CliConfig;

const DEMO_EMAIL: &str = "an@casabook.local";
const DEMO_USERNAME: &str = "an";
const DEMO_PASSWORD: &str = "SecurePass1";

pub fn demo(config: &CliConfig) -> Result<()> {
    let store = Store::open(&config.store.path)?;
    let books: Vec<Book> = store.all()?;
    if books.len() < 2 {
        bail!("store at {} is not seeded; run `casabook seed` first", config.store.path);
    }

    // Process-scoped collaborators, constructed once and handed to the
    // services that need them.
    let mailer = Arc::new(ConsoleMailer::new(config.mail.clone()));
    let auth = AuthService::new(store.clone());
    let cart = CartService::new(store.clone());
    let checkout = CheckoutService::new(store.clone(), mailer);

    println!("{}", style("Casabook checkout demo").bold().underlined());

    // 1. A customer signs up (or comes back) and logs in.
    if auth.login(DEMO_USERNAME, DEMO_PASSWORD).is_err() {
        auth.register(DEMO_EMAIL, DEMO_USERNAME, DEMO_PASSWORD)?;
    }
    let session = auth.login(DEMO_USERNAME, DEMO_PASSWORD)?;
    let identity = auth.verify(&session.token)?;
    println!(
        "{} logged in as {} ({})",
        style("✓").green(),
        session.user.username,
        session.user.email
    );

    // 2. Fill the cart: two of the first book, one of the second.
    let first = &books[0];
    let second = &books[1];
    let line_a = cart.add(&identity.user_id, &first.id)?;
    cart.add(&identity.user_id, &first.id)?;
    let line_b = cart.add(&identity.user_id, &second.id)?;
    println!(
        "{} cart: {} x2, {} x1",
        style("✓").green(),
        first.name,
        second.name
    );

    // 3. Pay the cart.
    let recipient = casa_commerce::orders::Recipient::new(
        "An Nguyen",
        "0901234567",
        "12 Tran Phu, Da Nang",
    )
    .with_note("Leave at the front desk");
    let confirmation = checkout.pay_cart(&identity.user_id, &[line_a.id, line_b.id], recipient)?;

    println!(
        "{} placed {} order(s), {} unit(s) total, loyalty level now {}",
        style("✓").green(),
        confirmation.orders.len(),
        confirmation.total_quantity(),
        confirmation.level.display_name()
    );
    for placed in &confirmation.orders {
        println!(
            "  {} order {} - {} x{} at {}",
            style("→").dim(),
            placed.order.id,
            placed.detail.book_id,
            placed.detail.quantity,
            placed.detail.unit_price
        );
    }

    store.persist(&config.store.path)?;
    println!("{} store saved to {}", style("✓").green(), config.store.path);
    Ok(())
}
