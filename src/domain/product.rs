use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ProductError;

/// Textual shape of `expiration` at the API boundary.
pub const EXPIRATION_FORMAT: &str = "%d/%m/%Y";

/// Represents a product in the catalog.
///
/// Missing fields deserialize to their zero value, which the merge rule
/// treats as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

impl Product {
    #[cfg(test)]
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        code_value: impl Into<String>,
        is_published: bool,
        expiration: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            quantity,
            code_value: code_value.into(),
            is_published,
            expiration: expiration.into(),
            price,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Copies every non-empty, non-zero (or `true`) field of `update` onto `self`.
    /// The id is never touched.
    pub fn merge(&mut self, update: &Product) {
        if !update.name.is_empty() {
            self.name = update.name.clone();
        }
        if update.quantity != 0 {
            self.quantity = update.quantity;
        }
        if !update.code_value.is_empty() {
            self.code_value = update.code_value.clone();
        }
        if update.is_published {
            self.is_published = true;
        }
        if !update.expiration.is_empty() {
            self.expiration = update.expiration.clone();
        }
        if update.price != 0.0 {
            self.price = update.price;
        }
    }

    /// Checks the fields a complete product must carry.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.is_empty() {
            return Err(ProductError::Validation("name can't be empty".into()));
        }
        if self.code_value.is_empty() {
            return Err(ProductError::Validation("code_value can't be empty".into()));
        }
        if self.expiration.is_empty() {
            return Err(ProductError::Validation("expiration can't be empty".into()));
        }
        if self.quantity <= 0 {
            return Err(ProductError::Validation("quantity must be greater than 0".into()));
        }
        if self.price <= 0.0 {
            return Err(ProductError::Validation("price must be greater than 0".into()));
        }
        parse_expiration(&self.expiration)
            .map(|_| ())
            .ok_or_else(|| invalid_expiration(&self.expiration))
    }

    /// Whether one unit of this product may be sold right now.
    pub fn check_purchasable(&self) -> Result<(), ProductError> {
        if self.quantity <= 0 {
            return Err(ProductError::StockUnavailable(self.id));
        }
        if !self.is_published {
            return Err(ProductError::NotPublished(self.id));
        }
        Ok(())
    }
}

/// Parses a `dd/mm/yyyy` expiration into a calendar date.
pub fn parse_expiration(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), EXPIRATION_FORMAT).ok()
}

pub fn format_expiration(date: NaiveDate) -> String {
    date.format(EXPIRATION_FORMAT).to_string()
}

pub fn invalid_expiration(text: &str) -> ProductError {
    ProductError::Validation(format!(
        "invalid expiration date {text:?}, must be in format: dd/mm/yyyy"
    ))
}

/// Result of pricing a list of product ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerPrice {
    pub products: Vec<Product>,
    pub total_price: f64,
}
