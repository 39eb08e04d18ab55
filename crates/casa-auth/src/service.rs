//! Registration, login, verification, and admin user management.

use casa_commerce::ids::UserId;
use casa_commerce::users::{Role, UserAccount};
use casa_db::{Store, Transaction};
use serde::{Deserialize, Serialize};

use crate::token::AccessToken;
use crate::{password, AuthError};

/// A verified caller identity, as consumed by the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
}

/// A successful login: the account plus its bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: UserAccount,
    pub token: String,
}

/// Identity service over the shared store.
pub struct AuthService {
    store: Store,
}

impl AuthService {
    /// Create an auth service over the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a new customer account.
    pub fn register(
        &self,
        email: &str,
        username: &str,
        plain_password: &str,
    ) -> Result<UserAccount, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        password::validate_strength(plain_password)?;
        let password_hash = password::hash(plain_password)?;

        self.store.transaction::<_, AuthError, _>(|tx| {
            ensure_unique(tx, "email", email, None)?;
            ensure_unique(tx, "username", username, None)?;

            let account = UserAccount {
                id: UserId::generate(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash: password_hash.clone(),
                role: Role::User,
            };
            tx.insert(&account)?;
            Ok(account)
        })
    }

    /// Log in with username and password, issuing a bearer token.
    pub fn login(&self, username: &str, plain_password: &str) -> Result<Session, AuthError> {
        let account = self
            .store
            .read::<_, AuthError, _>(|tx| {
                Ok(tx.find_one::<UserAccount>(|u| u.username == username)?)
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify(plain_password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = AccessToken::generate(account.id.clone());
        self.store.insert(&token)?;

        Ok(Session {
            user: account,
            token: token.token,
        })
    }

    /// Resolve a bearer token into a verified identity.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let stored: AccessToken = self
            .store
            .get(token)?
            .ok_or(AuthError::InvalidToken)?;
        stored.validate()?;
        Ok(Identity {
            user_id: stored.user_id,
        })
    }

    /// Revoke a bearer token.
    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.store.transaction::<_, AuthError, _>(|tx| {
            tx.delete::<AccessToken>(token)?;
            Ok(())
        })
    }

    // === Admin user management ===

    /// Every account. Requires the admin role.
    pub fn users(&self, acting: &UserId) -> Result<Vec<UserAccount>, AuthError> {
        self.store.read::<_, AuthError, _>(|tx| {
            require_admin(tx, acting)?;
            Ok(tx.all()?)
        })
    }

    /// Create an account with an explicit role. Requires the admin role.
    pub fn create_user(
        &self,
        acting: &UserId,
        email: &str,
        username: &str,
        plain_password: &str,
        role: Role,
    ) -> Result<UserAccount, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        password::validate_strength(plain_password)?;
        let password_hash = password::hash(plain_password)?;

        self.store.transaction::<_, AuthError, _>(|tx| {
            require_admin(tx, acting)?;
            ensure_unique(tx, "email", email, None)?;
            ensure_unique(tx, "username", username, None)?;

            let account = UserAccount {
                id: UserId::generate(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash: password_hash.clone(),
                role,
            };
            tx.insert(&account)?;
            Ok(account)
        })
    }

    /// Rename an account or change its role. Requires the admin role.
    pub fn update_user(
        &self,
        acting: &UserId,
        user_id: &UserId,
        username: &str,
        role: Role,
    ) -> Result<UserAccount, AuthError> {
        self.store.transaction::<_, AuthError, _>(|tx| {
            require_admin(tx, acting)?;
            let mut account: UserAccount = tx
                .get(user_id.as_str())?
                .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;
            ensure_unique(tx, "username", username, Some(user_id))?;

            account.username = username.to_string();
            account.role = role;
            tx.update(&account)?;
            Ok(account)
        })
    }

    /// Delete an account. Requires the admin role.
    pub fn delete_user(&self, acting: &UserId, user_id: &UserId) -> Result<(), AuthError> {
        self.store.transaction::<_, AuthError, _>(|tx| {
            require_admin(tx, acting)?;
            if !tx.delete::<UserAccount>(user_id.as_str())? {
                return Err(AuthError::UserNotFound(user_id.to_string()));
            }
            Ok(())
        })
    }
}

/// Reject a value already taken by a different account.
fn ensure_unique(
    tx: &Transaction,
    field: &'static str,
    value: &str,
    exclude: Option<&UserId>,
) -> Result<(), AuthError> {
    let taken = tx.find_one::<UserAccount>(|u| {
        let matches = match field {
            "email" => u.email == value,
            _ => u.username == value,
        };
        matches && exclude.map(|id| u.id != *id).unwrap_or(true)
    })?;
    match taken {
        Some(_) => Err(AuthError::AlreadyTaken {
            field,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn require_admin(tx: &Transaction, user_id: &UserId) -> Result<UserAccount, AuthError> {
    let account: UserAccount = tx
        .get(user_id.as_str())?
        .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;
    if !account.is_admin() {
        return Err(AuthError::InsufficientPermissions);
    }
    Ok(account)
}
