//! Domain records and their seed data.

pub mod analytics;
pub mod auth;
pub mod product;
pub mod user;

pub use auth::{AuthSession, AuthUser, Credentials};
pub use product::{
    parse_tags, seed_products, CreateProduct, Product, ProductStatus, UpdateProduct,
    NEXT_PRODUCT_ID,
};
pub use user::{seed_users, CreateUser, Role, UpdateUser, User, UserStatus, NEXT_USER_ID};
