//! Input validation for service operations.
//!
//! Each `validate_*` function checks every field and returns all failures
//! at once, so a form can show them together.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{CreateProduct, CreateUser, Credentials, UpdateProduct, UpdateUser};

/// A validation error for a specific field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The field that failed validation (e.g., "name", "email").
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PERSON_NAME: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").ok());

fn is_match(pattern: &Lazy<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

/// Collects field errors.
#[derive(Debug, Default)]
struct Checks {
    errors: Vec<ValidationError>,
}

impl Checks {
    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError::new(field, message));
    }

    /// Length in characters within `min..=max`.
    fn length(&mut self, field: &str, value: &str, min: usize, max: usize, label: &str) {
        let len = value.chars().count();
        if len < min {
            self.fail(field, &format!("{} must be at least {} characters", label, min));
        } else if len > max {
            self.fail(field, &format!("{} must be less than {} characters", label, max));
        }
    }

    fn email(&mut self, value: &str, required: bool) {
        if value.is_empty() && required {
            self.fail("email", "Email is required");
        } else if !is_match(&EMAIL, value) {
            self.fail("email", "Invalid email format");
        }
    }

    fn password(&mut self, value: &str, strong: bool) {
        self.length("password", value, 6, 100, "Password");
        if strong {
            let lower = value.chars().any(|c| c.is_ascii_lowercase());
            let upper = value.chars().any(|c| c.is_ascii_uppercase());
            let digit = value.chars().any(|c| c.is_ascii_digit());
            if !(lower && upper && digit) {
                self.fail(
                    "password",
                    "Password must contain at least one uppercase letter, one lowercase letter, and one number",
                );
            }
        }
    }

    fn person_name(&mut self, value: &str) {
        let before = self.errors.len();
        self.length("name", value, 2, 50, "Name");
        if self.errors.len() == before && !is_match(&PERSON_NAME, value) {
            self.fail("name", "Name can only contain letters and spaces");
        }
    }

    fn price(&mut self, value: f64) {
        if !(value >= 0.01) {
            self.fail("price", "Price must be greater than 0");
        } else if value > 999_999.99 {
            self.fail("price", "Price must be less than $1,000,000");
        }
    }

    fn stock(&mut self, value: i64) {
        if value < 0 {
            self.fail("stock", "Stock cannot be negative");
        } else if value > 999_999 {
            self.fail("stock", "Stock must be less than 1,000,000");
        }
    }

    /// Blank means "no SKU"; otherwise the trimmed value is checked.
    fn sku(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.length("sku", value, 3, 20, "SKU");
        }
    }

    fn finish(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), Vec<ValidationError>> {
    let mut checks = Checks::default();
    checks.email(&credentials.email, true);
    checks.password(&credentials.password, false);
    checks.finish()
}

pub fn validate_create_user(input: &CreateUser) -> Result<(), Vec<ValidationError>> {
    let mut checks = Checks::default();
    checks.person_name(&input.name);
    checks.email(&input.email, true);
    checks.password(&input.password, true);
    checks.finish()
}

pub fn validate_update_user(patch: &UpdateUser) -> Result<(), Vec<ValidationError>> {
    let mut checks = Checks::default();
    if let Some(name) = &patch.name {
        checks.person_name(name);
    }
    if let Some(email) = &patch.email {
        checks.email(email, false);
    }
    checks.finish()
}

pub fn validate_create_product(input: &CreateProduct) -> Result<(), Vec<ValidationError>> {
    let mut checks = Checks::default();
    checks.length("name", &input.name, 2, 100, "Product name");
    checks.length("description", &input.description, 10, 1000, "Description");
    checks.price(input.price);
    checks.length("category", &input.category, 2, 50, "Category");
    checks.stock(input.stock);
    checks.sku(&input.sku);
    checks.finish()
}

pub fn validate_update_product(patch: &UpdateProduct) -> Result<(), Vec<ValidationError>> {
    let mut checks = Checks::default();
    if let Some(name) = &patch.name {
        checks.length("name", name, 2, 100, "Product name");
    }
    if let Some(description) = &patch.description {
        checks.length("description", description, 10, 1000, "Description");
    }
    if let Some(price) = patch.price {
        checks.price(price);
    }
    if let Some(category) = &patch.category {
        checks.length("category", category, 2, 50, "Category");
    }
    if let Some(stock) = patch.stock {
        checks.stock(stock);
    }
    if let Some(sku) = &patch.sku {
        checks.sku(sku);
    }
    checks.finish()
}
