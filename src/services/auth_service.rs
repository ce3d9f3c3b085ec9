use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::user::{Role, User};
use crate::services::error_handling::{LogHelper, StorefrontError};
use crate::services::validation::InputValidator;
use crate::storage::{Storage, read_json, write_json};

struct Account {
    user: User,
    salt: String,
    password_digest: String,
}

impl Account {
    fn new(user: User, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let password_digest = digest(&salt, password);
        Self {
            user,
            salt,
            password_digest,
        }
    }

    fn verify(&self, password: &str) -> bool {
        digest(&self.salt, password) == self.password_digest
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Mock authentication against an in-memory account list.
///
/// Accounts live only for the lifetime of the service; the signed-in user is
/// remembered under the session key so a restart keeps the session as long
/// as the account still exists.
pub struct AuthService {
    accounts: Vec<Account>,
    current: Option<User>,
    storage: Arc<dyn Storage>,
    session_key: String,
}

impl AuthService {
    pub fn open(storage: Arc<dyn Storage>, session_key: impl Into<String>) -> Self {
        let mut service = Self {
            accounts: seed_accounts(),
            current: None,
            storage,
            session_key: session_key.into(),
        };
        service.current = service.restore_session();
        service
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User, StorefrontError> {
        let email = email.trim().to_lowercase();
        let account = self
            .accounts
            .iter()
            .find(|a| a.user.email == email)
            .filter(|a| a.verify(password))
            .ok_or_else(|| {
                warn!(email = %email, "Login rejected");
                StorefrontError::InvalidCredentials
            })?;

        let user = account.user.clone();
        info!(user_id = %user.id, "User signed in");
        self.start_session(user.clone());
        Ok(user)
    }

    /// Creates an account and signs it in.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, StorefrontError> {
        let email = InputValidator::validate_email(email)?;
        InputValidator::validate_password(password)?;
        let name = InputValidator::validate_required("name", name)?;

        if self.accounts.iter().any(|a| a.user.email == email) {
            return Err(StorefrontError::UserAlreadyExists { email });
        }

        let user = User {
            id: format!("user-{}", Uuid::new_v4().simple()),
            email,
            name,
            role: Role::User,
        };
        self.accounts.push(Account::new(user.clone(), password));
        info!(user_id = %user.id, "Registered user");

        self.start_session(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id, "User signed out");
        }
        if let Err(e) = self.storage.remove_item(&self.session_key) {
            LogHelper::log_error_with_context("clear session", &anyhow::Error::new(e));
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn require_user(&self) -> Result<&User, StorefrontError> {
        self.current.as_ref().ok_or(StorefrontError::NotAuthenticated)
    }

    fn start_session(&mut self, user: User) {
        if let Err(e) = write_json(self.storage.as_ref(), &self.session_key, &user) {
            LogHelper::log_error_with_context("persist session", &e);
        }
        self.current = Some(user);
    }

    fn restore_session(&self) -> Option<User> {
        match read_json::<User>(self.storage.as_ref(), &self.session_key) {
            Ok(Some(user)) if self.accounts.iter().any(|a| a.user.id == user.id) => {
                debug!(user_id = %user.id, "Restored session");
                Some(user)
            }
            Ok(Some(user)) => {
                debug!(user_id = %user.id, "Saved session refers to unknown account");
                None
            }
            Ok(None) => None,
            Err(e) => {
                LogHelper::log_error_with_context("restore session", &e);
                None
            }
        }
    }
}

fn seed_accounts() -> Vec<Account> {
    vec![
        Account::new(
            User {
                id: "1".to_string(),
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                role: Role::Admin,
            },
            "secret123",
        ),
        Account::new(
            User {
                id: "2".to_string(),
                email: "user@example.com".to_string(),
                name: "John Doe".to_string(),
                role: Role::User,
            },
            "password",
        ),
    ]
}
