//! Catalog products and customer reviews.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ProductId, UserId};

/// Longest accepted review feedback, in characters.
pub const MAX_FEEDBACK_LEN: usize = 1000;

/// A customer review attached to a product.
///
/// Each user holds at most one review per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user_id: UserId,
    pub rating: u8,
    pub feedback: Option<String>,
    pub date: DateTime<Utc>,
}

impl Review {
    /// Build a review, validating rating and feedback length.
    pub fn new(
        user_id: UserId,
        rating: i64,
        feedback: Option<String>,
        date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::InvalidRating { rating });
        }
        if feedback
            .as_deref()
            .is_some_and(|text| text.chars().count() > MAX_FEEDBACK_LEN)
        {
            return Err(DomainError::FeedbackTooLong {
                max: MAX_FEEDBACK_LEN,
            });
        }
        Ok(Self {
            user_id,
            // Range-checked above.
            rating: rating as u8,
            feedback,
            date,
        })
    }
}

/// Whether a review was new or replaced the user's earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Added,
    Updated,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category: String,
    pub sub_category: String,
    pub sizes: Vec<String>,
    pub bestseller: bool,
    /// Whole-number percentage, always within 0..=100.
    pub discount: u8,
    pub stock: u32,
    pub reviews: Vec<Review>,
    pub is_active: bool,
    /// `None` when the stored timestamp could not be read.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price after applying the discount.
    #[must_use]
    pub fn final_price(&self) -> Decimal {
        self.price * (Decimal::ONE - Decimal::from(self.discount) / Decimal::ONE_HUNDRED)
    }

    /// True when the product carries any discount.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount > 0
    }

    /// Mean review rating, `None` without reviews.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(total) / self.reviews.len() as f64)
    }

    /// Insert the review, replacing an earlier review by the same user.
    pub fn upsert_review(&mut self, review: Review) -> ReviewOutcome {
        match self
            .reviews
            .iter_mut()
            .find(|existing| existing.user_id == review.user_id)
        {
            Some(existing) => {
                *existing = review;
                ReviewOutcome::Updated
            }
            None => {
                self.reviews.push(review);
                ReviewOutcome::Added
            }
        }
    }
}

/// Negative prices are stored as zero.
#[must_use]
pub fn clamp_price(price: Decimal) -> Decimal {
    price.max(Decimal::ZERO)
}

/// Discounts are clamped into 0..=100.
#[must_use]
pub fn clamp_discount(discount: i64) -> u8 {
    // Clamped into u8 range first.
    discount.clamp(0, 100) as u8
}

fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(())
}

/// Input for creating a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub stock: i64,
}

impl NewProduct {
    /// Validate and turn the input into a stored product.
    pub fn into_product(self, now: DateTime<Utc>) -> Result<Product, DomainError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("category", &self.category)?;
        require("sub_category", &self.sub_category)?;

        Ok(Product {
            id: ProductId::generate(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: clamp_price(self.price),
            images: self.images,
            category: self.category.trim().to_string(),
            sub_category: self.sub_category.trim().to_string(),
            sizes: self.sizes,
            bestseller: self.bestseller,
            discount: clamp_discount(self.discount),
            stock: u32::try_from(self.stock.max(0)).unwrap_or(u32::MAX),
            reviews: Vec::new(),
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }
}

/// Replacement fields for an existing product.
///
/// Images are only replaced when a non-empty list is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl ProductUpdate {
    /// Apply the update in place.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("category", &self.category)?;
        require("sub_category", &self.sub_category)?;

        product.name = self.name.trim().to_string();
        product.description = self.description;
        product.price = clamp_price(self.price);
        product.category = self.category.trim().to_string();
        product.sub_category = self.sub_category.trim().to_string();
        product.sizes = self.sizes;
        product.bestseller = self.bestseller;
        product.discount = clamp_discount(self.discount.unwrap_or(0));
        if let Some(images) = self.images.filter(|images| !images.is_empty()) {
            product.images = images;
        }
        product.updated_at = Some(now);
        Ok(())
    }
}
