//! Customer accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::error::DomainError;
use super::id::{ProductId, UserId};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum display name length after trimming.
pub const MIN_NAME_LEN: usize = 2;

/// A registered customer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Always stored lowercased and trimmed.
    pub email: String,
    pub password_hash: String,
    pub cart: Cart,
    pub wishlist: Vec<ProductId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Public view of the account without credentials.
    #[must_use]
    pub fn profile(&self, orders: Vec<String>) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            orders,
            wishlist: self.wishlist.clone(),
            cart: self.cart.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Add to wishlist unless already present. Returns true when added.
    pub fn wish(&mut self, product: &ProductId) -> bool {
        if self.wishlist.contains(product) {
            return false;
        }
        self.wishlist.push(product.clone());
        true
    }

    /// Remove from wishlist. Returns true when something was removed.
    pub fn unwish(&mut self, product: &ProductId) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|id| id != product);
        before != self.wishlist.len()
    }

    /// Rename after validating the new name.
    pub fn rename(&mut self, name: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.name = validate_name(name)?;
        self.updated_at = Some(now);
        Ok(())
    }
}

/// Account as returned to its owner.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub orders: Vec<String>,
    pub wishlist: Vec<ProductId>,
    pub cart: Cart,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration input.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Normalize and validate an email address (`local@domain.tld`).
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if email.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::InvalidEmail);
    };
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if local.is_empty() || !dotted {
        return Err(DomainError::InvalidEmail);
    }
    Ok(email)
}

/// Check password strength rules.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Trim and validate a display name.
pub fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err(DomainError::NameTooShort { min: MIN_NAME_LEN });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_trimmed() {
        assert_eq!(
            normalize_email("  Priya@Example.COM ").unwrap(),
            "priya@example.com"
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["", "plain", "@x.com", "a@b", "a@.com", "a@com.", "a b@c.com"] {
            assert_eq!(normalize_email(bad), Err(DomainError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn short_password_is_weak() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        assert_eq!(validate_name("  Al  ").unwrap(), "Al");
        assert!(validate_name(" A ").is_err());
    }

    #[test]
    fn wishlist_is_deduplicated() {
        let mut user = User {
            id: UserId::new("u"),
            name: "Uma".into(),
            email: "uma@example.com".into(),
            password_hash: String::new(),
            cart: Cart::new(),
            wishlist: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        let p = ProductId::new("p");
        assert!(user.wish(&p));
        assert!(!user.wish(&p));
        assert_eq!(user.wishlist.len(), 1);
        assert!(user.unwish(&p));
        assert!(!user.unwish(&p));
    }
}
