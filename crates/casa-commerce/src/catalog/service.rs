//! Catalog management: book, label, and menu CRUD.

use std::sync::Arc;

use casa_db::{Store, Transaction};

use crate::catalog::{BlobStore, Book, BookDraft, Label, MenuItem, Upload};
use crate::ids::{BookId, LabelId, MenuItemId, UserId};
use crate::money::Money;
use crate::users::UserAccount;
use crate::CommerceError;

const BOOK_IMAGE_FOLDER: &str = "book_images";
const MENU_IMAGE_FOLDER: &str = "menu_images";

/// Catalog management service. Mutations require the admin role.
pub struct CatalogService {
    store: Store,
    blobs: Arc<dyn BlobStore>,
}

impl CatalogService {
    /// Create a catalog service over the given store and image storage.
    pub fn new(store: Store, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    // === Books ===

    /// Every book in the catalog.
    pub fn books(&self) -> Result<Vec<Book>, CommerceError> {
        Ok(self.store.all()?)
    }

    /// A single book by id.
    pub fn book(&self, book_id: &BookId) -> Result<Book, CommerceError> {
        self.store
            .get(book_id.as_str())?
            .ok_or_else(|| CommerceError::BookNotFound(book_id.to_string()))
    }

    /// Create a book with its cover image.
    pub fn create_book(
        &self,
        acting: &UserId,
        draft: BookDraft,
        image: Upload,
    ) -> Result<Book, CommerceError> {
        draft.validate()?;
        let image_url = self
            .blobs
            .upload(&image.bytes, &image.filename, BOOK_IMAGE_FOLDER)?;

        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            if tx.get::<Label>(draft.label_id.as_str())?.is_none() {
                return Err(CommerceError::LabelNotFound(draft.label_id.to_string()));
            }
            let book = Book {
                id: BookId::generate(),
                name: draft.name.clone(),
                price: draft.price,
                image_url: image_url.clone(),
                description: draft.description.clone(),
                kind: draft.kind,
                label_id: draft.label_id.clone(),
                stock: draft.stock,
            };
            tx.insert(&book)?;
            Ok(book)
        })
    }

    /// Update a book; keeps the existing cover when no new image is sent.
    pub fn update_book(
        &self,
        acting: &UserId,
        book_id: &BookId,
        draft: BookDraft,
        image: Option<Upload>,
    ) -> Result<Book, CommerceError> {
        draft.validate()?;
        let image_url = match image {
            Some(upload) => Some(
                self.blobs
                    .upload(&upload.bytes, &upload.filename, BOOK_IMAGE_FOLDER)?,
            ),
            None => None,
        };

        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            let mut book: Book = tx
                .get(book_id.as_str())?
                .ok_or_else(|| CommerceError::BookNotFound(book_id.to_string()))?;

            book.name = draft.name.clone();
            book.price = draft.price;
            book.description = draft.description.clone();
            book.kind = draft.kind;
            book.label_id = draft.label_id.clone();
            book.stock = draft.stock;
            if let Some(url) = &image_url {
                book.image_url = url.clone();
            }
            tx.update(&book)?;
            Ok(book)
        })
    }

    /// Delete a book.
    pub fn delete_book(&self, acting: &UserId, book_id: &BookId) -> Result<(), CommerceError> {
        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            if !tx.delete::<Book>(book_id.as_str())? {
                return Err(CommerceError::BookNotFound(book_id.to_string()));
            }
            Ok(())
        })
    }

    // === Labels ===

    /// Every label.
    pub fn labels(&self) -> Result<Vec<Label>, CommerceError> {
        Ok(self.store.all()?)
    }

    /// Create a label.
    pub fn create_label(
        &self,
        acting: &UserId,
        name: &str,
        value: &str,
        description: Option<String>,
    ) -> Result<Label, CommerceError> {
        if name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if value.trim().is_empty() {
            return Err(CommerceError::MissingField("value"));
        }

        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            let label = Label {
                id: LabelId::generate(),
                name: name.to_string(),
                value: value.to_string(),
                description: description.clone(),
            };
            tx.insert(&label)?;
            Ok(label)
        })
    }

    /// Update a label.
    pub fn update_label(
        &self,
        acting: &UserId,
        label_id: &LabelId,
        name: &str,
        value: &str,
        description: Option<String>,
    ) -> Result<Label, CommerceError> {
        if name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if value.trim().is_empty() {
            return Err(CommerceError::MissingField("value"));
        }

        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            let mut label: Label = tx
                .get(label_id.as_str())?
                .ok_or_else(|| CommerceError::LabelNotFound(label_id.to_string()))?;
            label.name = name.to_string();
            label.value = value.to_string();
            label.description = description.clone();
            tx.update(&label)?;
            Ok(label)
        })
    }

    /// Delete a label.
    pub fn delete_label(&self, acting: &UserId, label_id: &LabelId) -> Result<(), CommerceError> {
        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            if !tx.delete::<Label>(label_id.as_str())? {
                return Err(CommerceError::LabelNotFound(label_id.to_string()));
            }
            Ok(())
        })
    }

    // === Menu ===

    /// Every cafe menu item.
    pub fn menu(&self) -> Result<Vec<MenuItem>, CommerceError> {
        Ok(self.store.all()?)
    }

    /// Create a menu item with its photo.
    pub fn create_menu_item(
        &self,
        acting: &UserId,
        name: &str,
        price: Money,
        image: Upload,
    ) -> Result<MenuItem, CommerceError> {
        if name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        let image_url = self
            .blobs
            .upload(&image.bytes, &image.filename, MENU_IMAGE_FOLDER)?;

        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            let item = MenuItem {
                id: MenuItemId::generate(),
                name: name.to_string(),
                price,
                image_url: image_url.clone(),
            };
            tx.insert(&item)?;
            Ok(item)
        })
    }

    /// Update a menu item; keeps the existing photo when no new one is sent.
    pub fn update_menu_item(
        &self,
        acting: &UserId,
        item_id: &MenuItemId,
        name: &str,
        price: Money,
        image: Option<Upload>,
    ) -> Result<MenuItem, CommerceError> {
        if name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        let image_url = match image {
            Some(upload) => Some(
                self.blobs
                    .upload(&upload.bytes, &upload.filename, MENU_IMAGE_FOLDER)?,
            ),
            None => None,
        };

        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            let mut item: MenuItem = tx
                .get(item_id.as_str())?
                .ok_or_else(|| CommerceError::MenuItemNotFound(item_id.to_string()))?;
            item.name = name.to_string();
            item.price = price;
            if let Some(url) = &image_url {
                item.image_url = url.clone();
            }
            tx.update(&item)?;
            Ok(item)
        })
    }

    /// Delete a menu item.
    pub fn delete_menu_item(
        &self,
        acting: &UserId,
        item_id: &MenuItemId,
    ) -> Result<(), CommerceError> {
        self.store.transaction::<_, CommerceError, _>(|tx| {
            require_admin(tx, acting)?;
            if !tx.delete::<MenuItem>(item_id.as_str())? {
                return Err(CommerceError::MenuItemNotFound(item_id.to_string()));
            }
            Ok(())
        })
    }
}

/// Resolve the acting user and require the admin role.
pub(crate) fn require_admin(
    tx: &Transaction,
    user_id: &UserId,
) -> Result<UserAccount, CommerceError> {
    let account: UserAccount = tx
        .get(user_id.as_str())?
        .ok_or(CommerceError::Unauthorized)?;
    if !account.is_admin() {
        return Err(CommerceError::Forbidden);
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BookKind, LocalBlobStore, Stock};
    use crate::money::Currency;
    use crate::users::Role;

    fn seeded_service() -> (CatalogService, UserId, UserId, LabelId) {
        let store = Store::new();
        let admin = UserId::generate();
        let customer = UserId::generate();
        store
            .insert(&UserAccount {
                id: admin.clone(),
                email: "admin@example.com".to_string(),
                username: "admin".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Admin,
            })
            .unwrap();
        store
            .insert(&UserAccount {
                id: customer.clone(),
                email: "user@example.com".to_string(),
                username: "user".to_string(),
                password_hash: "hash".to_string(),
                role: Role::User,
            })
            .unwrap();
        let label = Label {
            id: LabelId::generate(),
            name: "Fiction".to_string(),
            value: "fiction".to_string(),
            description: None,
        };
        store.insert(&label).unwrap();

        let service = CatalogService::new(store, Arc::new(LocalBlobStore::default()));
        (service, admin, customer, label.id)
    }

    fn draft(label_id: &LabelId) -> BookDraft {
        BookDraft {
            name: "Dune".to_string(),
            price: Money::new(180000, Currency::Vnd),
            description: "Spice.".to_string(),
            kind: BookKind::New,
            label_id: label_id.clone(),
            stock: Stock::tracked(12),
        }
    }

    #[test]
    fn test_admin_can_create_book() {
        let (service, admin, _, label_id) = seeded_service();
        let book = service
            .create_book(
                &admin,
                draft(&label_id),
                Upload::new(vec![1, 2, 3], "dune.png"),
            )
            .unwrap();

        assert!(book.image_url.ends_with("book_images/dune.png"));
        assert_eq!(service.books().unwrap().len(), 1);
    }

    #[test]
    fn test_customer_cannot_create_book() {
        let (service, _, customer, label_id) = seeded_service();
        let err = service
            .create_book(
                &customer,
                draft(&label_id),
                Upload::new(vec![1], "dune.png"),
            )
            .unwrap_err();
        assert!(matches!(err, CommerceError::Forbidden));
        assert!(service.books().unwrap().is_empty());
    }

    #[test]
    fn test_create_book_requires_known_label() {
        let (service, admin, _, _) = seeded_service();
        let err = service
            .create_book(
                &admin,
                draft(&LabelId::new("missing")),
                Upload::new(vec![1], "dune.png"),
            )
            .unwrap_err();
        assert!(matches!(err, CommerceError::LabelNotFound(_)));
    }

    #[test]
    fn test_update_book_keeps_image_when_no_upload() {
        let (service, admin, _, label_id) = seeded_service();
        let book = service
            .create_book(
                &admin,
                draft(&label_id),
                Upload::new(vec![1], "original.png"),
            )
            .unwrap();

        let mut updated_draft = draft(&label_id);
        updated_draft.name = "Dune Messiah".to_string();
        let updated = service
            .update_book(&admin, &book.id, updated_draft, None)
            .unwrap();

        assert_eq!(updated.name, "Dune Messiah");
        assert_eq!(updated.image_url, book.image_url);
    }

    #[test]
    fn test_delete_missing_book_is_not_found() {
        let (service, admin, _, _) = seeded_service();
        let err = service
            .delete_book(&admin, &BookId::new("missing"))
            .unwrap_err();
        assert!(matches!(err, CommerceError::BookNotFound(_)));
    }

    #[test]
    fn test_update_label() {
        let (service, admin, _, label_id) = seeded_service();
        let updated = service
            .update_label(&admin, &label_id, "Sci-Fi", "sci-fi", None)
            .unwrap();
        assert_eq!(updated.name, "Sci-Fi");
        assert_eq!(updated.value, "sci-fi");
    }

    #[test]
    fn test_update_menu_item_keeps_photo_when_no_upload() {
        let (service, admin, _, _) = seeded_service();
        let item = service
            .create_menu_item(
                &admin,
                "Latte",
                Money::new(40000, Currency::Vnd),
                Upload::new(vec![9], "latte.png"),
            )
            .unwrap();

        let updated = service
            .update_menu_item(&admin, &item.id, "Latte L", Money::new(45000, Currency::Vnd), None)
            .unwrap();
        assert_eq!(updated.name, "Latte L");
        assert_eq!(updated.image_url, item.image_url);
    }

    #[test]
    fn test_menu_item_crud() {
        let (service, admin, _, _) = seeded_service();
        let item = service
            .create_menu_item(
                &admin,
                "Espresso",
                Money::new(30000, Currency::Vnd),
                Upload::new(vec![9], "espresso.png"),
            )
            .unwrap();
        assert_eq!(service.menu().unwrap().len(), 1);

        service.delete_menu_item(&admin, &item.id).unwrap();
        assert!(service.menu().unwrap().is_empty());
    }
}
