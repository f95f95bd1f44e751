//! Sea-ORM entities for the `products` and `users` tables

pub mod product;
pub mod user;
