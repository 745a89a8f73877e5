//! Catalogue products.

use std::fmt;

use backoffice_macros::Record;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::user::day;

/// Publication status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    Draft,
}

impl AsRef<str> for ProductStatus {
    fn as_ref(&self) -> &str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Product {
    #[record(id)]
    pub id: String,

    #[record(text, search, sort)]
    pub name: String,

    #[record(text, search)]
    pub description: String,

    #[record(number, range, sort)]
    pub price: f64,

    #[record(text, filter)]
    pub category: String,

    #[record(number, sort)]
    pub stock: u32,

    #[record(text, filter)]
    pub status: ProductStatus,

    #[serde(default)]
    pub images: Vec<String>,

    #[record(text, search)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[record(date, sort)]
    pub created_at: DateTime<Utc>,

    #[record(date, sort)]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product.
///
/// `sku` may be empty, meaning "no SKU". `tags` is the comma-separated
/// form a user types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub status: ProductStatus,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub tags: String,
}

/// Partial update for a product; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub images: Option<Vec<String>>,
    pub sku: Option<String>,
    pub tags: Option<String>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        *self == UpdateProduct::default()
    }

    /// Applies the present fields to `product`, bumping `updated_at`.
    ///
    /// Numeric fields must already be validated.
    pub fn apply(&self, product: &Product, now: DateTime<Utc>) -> Product {
        let mut next = product.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(price) = self.price {
            next.price = price;
        }
        if let Some(category) = &self.category {
            next.category = category.clone();
        }
        if let Some(stock) = self.stock {
            next.stock = u32::try_from(stock).unwrap_or(next.stock);
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(images) = &self.images {
            next.images = images.clone();
        }
        if let Some(sku) = &self.sku {
            next.sku = non_empty(sku);
        }
        if let Some(tags) = &self.tags {
            next.tags = parse_tags(tags);
        }
        next.updated_at = now;
        next
    }
}

/// Splits a comma-separated tag list, dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The catalogue every fresh product store starts with.
pub fn seed_products() -> Vec<Product> {
    struct Seed {
        name: &'static str,
        description: &'static str,
        price: f64,
        category: &'static str,
        stock: u32,
        status: ProductStatus,
        image: &'static str,
        sku: &'static str,
        tags: [&'static str; 3],
        created: u32,
        updated: u32,
    }

    let seeds = [
        Seed {
            name: "Wireless Headphones Pro",
            description: "High-quality wireless headphones with noise cancellation",
            price: 299.99,
            category: "Electronics",
            stock: 45,
            status: ProductStatus::Active,
            image: "Headphones",
            sku: "WHP-001",
            tags: ["audio", "wireless", "premium"],
            created: 15,
            updated: 20,
        },
        Seed {
            name: "Smart Fitness Watch",
            description: "Advanced fitness tracking with heart rate monitor",
            price: 199.99,
            category: "Electronics",
            stock: 23,
            status: ProductStatus::Active,
            image: "Watch",
            sku: "SFW-002",
            tags: ["fitness", "smart", "health"],
            created: 10,
            updated: 18,
        },
        Seed {
            name: "Premium Coffee Beans",
            description: "Organic coffee beans from sustainable farms",
            price: 24.99,
            category: "Food & Beverage",
            stock: 156,
            status: ProductStatus::Active,
            image: "Coffee",
            sku: "PCB-003",
            tags: ["organic", "coffee", "premium"],
            created: 12,
            updated: 19,
        },
        Seed {
            name: "Ergonomic Office Chair",
            description: "Comfortable office chair with lumbar support",
            price: 449.99,
            category: "Furniture",
            stock: 12,
            status: ProductStatus::Active,
            image: "Chair",
            sku: "EOC-004",
            tags: ["office", "ergonomic", "furniture"],
            created: 8,
            updated: 16,
        },
        Seed {
            name: "Yoga Mat Premium",
            description: "Non-slip yoga mat made from eco-friendly materials",
            price: 79.99,
            category: "Sports & Fitness",
            stock: 67,
            status: ProductStatus::Active,
            image: "Yoga+Mat",
            sku: "YMP-005",
            tags: ["yoga", "fitness", "eco-friendly"],
            created: 14,
            updated: 21,
        },
        Seed {
            name: "Vintage Leather Jacket",
            description: "Classic leather jacket with vintage styling",
            price: 189.99,
            category: "Clothing",
            stock: 8,
            status: ProductStatus::Draft,
            image: "Jacket",
            sku: "VLJ-006",
            tags: ["leather", "vintage", "fashion"],
            created: 6,
            updated: 13,
        },
    ];

    seeds
        .into_iter()
        .enumerate()
        .map(|(i, s)| Product {
            id: (i + 1).to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            price: s.price,
            category: s.category.to_string(),
            stock: s.stock,
            status: s.status,
            images: vec![format!(
                "https://via.placeholder.com/300x300?text={}",
                s.image
            )],
            sku: Some(s.sku.to_string()),
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
            created_at: day(2024, 1, s.created),
            updated_at: day(2024, 1, s.updated),
        })
        .collect()
}

/// Id handed to the first product created after seeding.
pub const NEXT_PRODUCT_ID: u64 = 7;
