//! Registration, login, and bearer-token sessions
//!
//! Tokens are opaque UUIDs stored server-side; handlers resolve
//! `Authorization: Bearer <token>` to a user id and pass it explicitly into
//! the engines. The core never sees transport credentials.

pub mod password;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{AppError, AppResult, PublicUser, UserId};
use crate::seed;
use crate::store::Store;

/// Successful register/login response payload.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Clone)]
pub struct AuthService {
    store: Store,
    /// Required email suffix, e.g. "@mavs.uta.edu".
    email_domain: String,
}

impl AuthService {
    pub fn new(store: Store, email_domain: String) -> Self {
        Self { store, email_domain }
    }

    /// Register a new user: institutional email, matching passwords, policy
    /// check, uniqueness checks, then seed default tasks and starter sets.
    pub fn register(&self, reg: &Registration) -> AppResult<AuthSession> {
        if !reg.email.ends_with(&self.email_domain) {
            return Err(AppError::invalid(format!(
                "Email must end with {}",
                self.email_domain
            )));
        }
        if reg.password != reg.password_confirm {
            return Err(AppError::invalid("Passwords do not match"));
        }
        if !password::is_valid_password(&reg.password) {
            return Err(AppError::invalid(
                "Password must be at least 10 characters with uppercase, lowercase, digit, and special character",
            ));
        }
        if reg.student_id.trim().is_empty() || reg.first_name.trim().is_empty() || reg.last_name.trim().is_empty() {
            return Err(AppError::invalid("Missing required field"));
        }
        if self.store.student_id_exists(&reg.student_id)? {
            return Err(AppError::conflict("Student ID already registered"));
        }
        if self.store.email_exists(&reg.email)? {
            return Err(AppError::conflict("Email already registered"));
        }

        let user = self.store.insert_user(
            &reg.student_id,
            &reg.email,
            &reg.first_name,
            &reg.last_name,
            &password::hash_password(&reg.password),
            &Utc::now().to_rfc3339(),
        )?;

        seed::create_default_tasks(&self.store, user.id)?;
        seed::create_starter_sets(&self.store, user.id)?;

        info!(user_id = user.id, "user registered");
        self.open_session(user.id)
    }

    /// Log in with email + password. Stamps `last_login` and backfills the
    /// starter sets for accounts that predate them.
    pub fn login(&self, email: &str, password_attempt: &str) -> AppResult<AuthSession> {
        let user = self
            .store
            .user_by_email(email)?
            .filter(|u| password::verify_password(password_attempt, &u.password_hash))
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        self.store.touch_last_login(user.id, &Utc::now().to_rfc3339())?;

        if self.store.sets_by_creator(user.id)?.is_empty() {
            seed::create_starter_sets(&self.store, user.id)?;
        }

        self.open_session(user.id)
    }

    /// Resolve a `Bearer` authorization header to a user id.
    pub fn authenticate(&self, auth_header: Option<&str>) -> AppResult<UserId> {
        let header = auth_header.ok_or_else(|| AppError::unauthorized("Missing credentials"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Malformed authorization header"))?;
        self.store
            .session_user(token)?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))
    }

    /// The authenticated user's own profile.
    pub fn current_user(&self, user_id: UserId) -> AppResult<PublicUser> {
        Ok(self.store.user_by_id(user_id)?.into())
    }

    fn open_session(&self, user_id: UserId) -> AppResult<AuthSession> {
        let token = Uuid::new_v4().to_string();
        self.store.insert_session(&token, user_id, &Utc::now().to_rfc3339())?;
        let user = self.store.user_by_id(user_id)?;
        Ok(AuthSession { token, user: user.into() })
    }
}
