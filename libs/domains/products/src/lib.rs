//! Products Domain
//!
//! CRUD for products owned by users, stored through SeaORM.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Existence checks, not-found / delete-failed mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + SeaORM and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, pagination
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_products::{handlers, PgProductRepository, ProductService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://localhost/catalog").await?;
//!
//! let repository = PgProductRepository::new(db, "http://localhost:8080");
//! let service = ProductService::new(repository);
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-very-long-secret-with-32-characters")?);
//! let router = handlers::router(service, auth);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    image_url, CreateProduct, ListQuery, NewProduct, PageRequest, Paginated, Product,
    SearchQuery, UpdateProduct, UserSummary, DEFAULT_PER_PAGE, MAX_PAGE, MAX_PER_PAGE,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
