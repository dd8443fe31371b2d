//! Customer and admin authentication.
//!
//! Customers register and log in with email and password and receive a
//! bearer token naming their user ID. The single admin account is configured
//! out of band and receives a token with the admin role.

pub mod password;
pub mod token;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::cart::Cart;
use crate::domain::id::UserId;
use crate::domain::user::{
    normalize_email, validate_name, validate_password, Registration, User, UserProfile,
};
use crate::error::{AuthError, ConfigError, Error, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::{OrderStore, UserStore};

pub use token::{Claims, Role, TokenIssuer};

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "STOREFRONT_JWT_SECRET";

/// Environment variable holding the admin password.
pub const ADMIN_PASSWORD_ENV: &str = "STOREFRONT_ADMIN_PASSWORD";

/// Credentials of the admin account.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A freshly issued token.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Registration, login and token checks.
pub struct AuthService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    tokens: Option<TokenIssuer>,
    admin: Option<AdminCredentials>,
}

impl<S> AuthService<S>
where
    S: UserStore + OrderStore,
{
    pub fn new(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        tokens: Option<TokenIssuer>,
        admin: Option<AdminCredentials>,
    ) -> Self {
        Self {
            store,
            clock,
            tokens,
            admin,
        }
    }

    fn tokens(&self) -> Result<&TokenIssuer> {
        self.tokens.as_ref().ok_or(Error::Config(ConfigError::MissingField {
            field: JWT_SECRET_ENV,
        }))
    }

    fn customer_session(&self, user: &User) -> Result<Session> {
        let token = self
            .tokens()?
            .issue(user.id.as_str(), Role::Customer, self.clock.now())?;
        Ok(Session {
            token,
            role: Role::Customer,
            user_id: Some(user.id.clone()),
        })
    }

    /// Create an account and log it in.
    pub async fn register(&self, registration: Registration) -> Result<Session> {
        self.tokens()?;
        let email = normalize_email(&registration.email)?;
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }
        validate_password(&registration.password)?;
        let name = validate_name(&registration.name)?;

        let now = self.clock.now();
        let user = User {
            id: UserId::generate(),
            name,
            email,
            password_hash: password::hash_password(&registration.password),
            cart: Cart::new(),
            wishlist: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.store.insert_user(&user).await?;
        info!(user = %user.id, "User registered");
        self.customer_session(&user)
    }

    /// Log a customer in.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_lowercase();
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownUser)?;
        if !password::verify_password(password, &user.password_hash) {
            warn!(user = %user.id, "Failed login");
            return Err(AuthError::InvalidCredentials.into());
        }
        self.customer_session(&user)
    }

    /// Log the admin in.
    pub fn admin_login(&self, email: &str, password: &str) -> Result<Session> {
        let tokens = self.tokens()?;
        let Some(admin) = &self.admin else {
            warn!("Admin login attempted without configured admin credentials");
            return Err(AuthError::InvalidCredentials.into());
        };
        let email_matches = admin.email.eq_ignore_ascii_case(email.trim());
        if !email_matches || admin.password != password {
            warn!("Failed admin login");
            return Err(AuthError::InvalidCredentials.into());
        }
        let token = tokens.issue(&admin.email, Role::Admin, self.clock.now())?;
        Ok(Session {
            token,
            role: Role::Admin,
            user_id: None,
        })
    }

    /// Validate a bearer token.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Claims> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;
        self.tokens()?.verify(token, self.clock.now())
    }

    /// Validate a customer token and return its user.
    pub fn require_customer(&self, token: Option<&str>) -> Result<UserId> {
        let claims = self.authenticate(token)?;
        match claims.role {
            Role::Customer => Ok(UserId::new(claims.sub)),
            Role::Admin => Err(AuthError::Forbidden("customer resources".to_string()).into()),
        }
    }

    /// Validate an admin token.
    pub fn require_admin(&self, token: Option<&str>) -> Result<Claims> {
        let claims = self.authenticate(token)?;
        if claims.role != Role::Admin {
            return Err(AuthError::AdminRequired.into());
        }
        Ok(claims)
    }

    /// Profile of the logged-in user, without credentials.
    pub async fn current_user(&self, user: &UserId) -> Result<UserProfile> {
        let account = self
            .store
            .get_user(user)
            .await?
            .ok_or_else(|| Error::not_found("user", user))?;
        let orders = self
            .store
            .list_orders_for_user(user)
            .await?
            .into_iter()
            .map(|order| order.id.to_string())
            .collect();
        Ok(account.profile(orders))
    }

    /// Change the display name.
    pub async fn update_name(&self, user: &UserId, name: &str) -> Result<UserProfile> {
        let mut account = self
            .store
            .get_user(user)
            .await?
            .ok_or_else(|| Error::not_found("user", user))?;
        account.rename(name, self.clock.now())?;
        self.store.update_user(&account).await?;
        info!(user = %user, "User renamed");
        self.current_user(user).await
    }
}
