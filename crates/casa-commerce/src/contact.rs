//! Customer contact messages.

use casa_db::{Record, Store};
use serde::{Deserialize, Serialize};

use crate::ids::ContactId;
use crate::CommerceError;

/// A message left through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl Record for Contact {
    const TABLE: &'static str = "contact";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}

/// Submit a contact message. Open to unauthenticated visitors.
pub fn submit(
    store: &Store,
    name: &str,
    phone: &str,
    message: &str,
) -> Result<Contact, CommerceError> {
    if name.trim().is_empty() {
        return Err(CommerceError::MissingField("name"));
    }
    if phone.trim().is_empty() {
        return Err(CommerceError::MissingField("phone"));
    }
    if message.trim().is_empty() {
        return Err(CommerceError::MissingField("message"));
    }

    let contact = Contact {
        id: ContactId::generate(),
        name: name.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
    };
    store.insert(&contact)?;
    Ok(contact)
}

/// Every contact message.
pub fn all(store: &Store) -> Result<Vec<Contact>, CommerceError> {
    Ok(store.all()?)
}

/// Delete a contact message.
pub fn delete(store: &Store, contact_id: &ContactId) -> Result<(), CommerceError> {
    store.transaction::<_, CommerceError, _>(|tx| {
        if !tx.delete::<Contact>(contact_id.as_str())? {
            return Err(CommerceError::ContactNotFound(contact_id.to_string()));
        }
        Ok(())
    })
}
