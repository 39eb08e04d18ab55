//! Seed the store with an admin account and a sample catalog.

use std::sync::Arc;

use anyhow::Result;
use casa_auth::password;
use casa_commerce::catalog::{BookDraft, BookKind, CatalogService, LocalBlobStore, Stock, Upload};
use casa_commerce::ids::UserId;
use casa_commerce::money::{Currency, Money};
use casa_commerce::users::{Role, UserAccount};
use casa_db::Store;
use console::style;

use crate::config::CliConfig;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "ChangeMe123";

pub fn seed(config: &CliConfig) -> Result<()> {
    let store = Store::open(&config.store.path)?;

    if !store.all::<UserAccount>()?.is_empty() {
        println!(
            "{} store at {} is already seeded",
            style("ℹ").blue(),
            config.store.path
        );
        return Ok(());
    }

    let admin_id = UserId::generate();
    store.insert(&UserAccount {
        id: admin_id.clone(),
        email: "admin@casabook.local".to_string(),
        username: ADMIN_USERNAME.to_string(),
        password_hash: password::hash(ADMIN_PASSWORD)?,
        role: Role::Admin,
    })?;

    let catalog = CatalogService::new(store.clone(), Arc::new(LocalBlobStore::default()));
    let fiction = catalog.create_label(&admin_id, "Fiction", "fiction", None)?;
    let classics = catalog.create_label(
        &admin_id,
        "Classics",
        "classics",
        Some("Timeless titles".to_string()),
    )?;

    let books = [
        ("Dune", 180_000, Stock::tracked(30), &fiction),
        ("Hyperion", 150_000, Stock::tracked(12), &fiction),
        ("The Little Prince", 95_000, Stock::tracked(50), &classics),
        ("Print On Demand Poetry", 60_000, Stock::untracked(), &classics),
    ];
    for (name, price, stock, label) in books {
        catalog.create_book(
            &admin_id,
            BookDraft {
                name: name.to_string(),
                price: Money::new(price, Currency::Vnd),
                description: format!("{name} - seeded catalog entry."),
                kind: BookKind::New,
                label_id: label.id.clone(),
                stock,
            },
            Upload::new(vec![0], format!("{}.png", name.to_lowercase().replace(' ', "-"))),
        )?;
    }

    catalog.create_menu_item(
        &admin_id,
        "Espresso",
        Money::new(30_000, Currency::Vnd),
        Upload::new(vec![0], "espresso.png"),
    )?;
    catalog.create_menu_item(
        &admin_id,
        "Ca Phe Sua Da",
        Money::new(35_000, Currency::Vnd),
        Upload::new(vec![0], "ca-phe-sua-da.png"),
    )?;

    store.persist(&config.store.path)?;
    println!(
        "{} seeded {} with admin '{}' and {} books",
        style("✓").green(),
        config.store.path,
        ADMIN_USERNAME,
        books.len()
    );
    Ok(())
}
