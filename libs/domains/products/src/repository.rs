use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entity::{product, user};
use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, PageRequest, Paginated, Product, UpdateProduct, UserSummary};

/// Repository trait for Product persistence
///
/// Lookups signal absence with `Ok(None)`; only storage failures are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, ordered by id
    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// One page of products, ordered by id
    async fn get_paginated_data(&self, page: PageRequest) -> ProductResult<Paginated<Product>>;

    /// Case-insensitive substring search over title and description.
    /// `None` behaves like [`ProductRepository::get_paginated_data`].
    async fn search_product(
        &self,
        term: Option<String>,
        page: PageRequest,
    ) -> ProductResult<Paginated<Product>>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Merge the present fields into an existing row; `None` if the id is unknown
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<MemoryState>>,
    base_url: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    products: BTreeMap<i32, product::Model>,
    users: BTreeMap<i32, user::Model>,
    last_id: i32,
}

impl MemoryState {
    fn render(&self, model: &product::Model, base_url: &str) -> Product {
        let owner = self.users.get(&model.user_id).cloned();
        model.clone().into_product(owner, base_url)
    }

    fn page<'a>(
        &self,
        rows: impl Iterator<Item = &'a product::Model>,
        page: PageRequest,
        base_url: &str,
    ) -> Paginated<Product> {
        let rows: Vec<_> = rows.collect();
        let total = rows.len() as u64;
        let data = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .map(|model| self.render(model, base_url))
            .collect();
        Paginated::new(data, page, total)
    }
}

impl InMemoryProductRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            base_url: base_url.into(),
        }
    }

    /// Register a user that products can reference
    pub async fn add_user(&self, user: UserSummary) {
        let mut state = self.state.write().await;
        state.users.insert(
            user.id,
            user::Model {
                id: user.id,
                name: user.name,
                email: user.email,
            },
        );
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .map(|model| state.render(model, &self.base_url))
            .collect())
    }

    async fn get_paginated_data(&self, page: PageRequest) -> ProductResult<Paginated<Product>> {
        let state = self.state.read().await;
        Ok(state.page(state.products.values(), page, &self.base_url))
    }

    async fn search_product(
        &self,
        term: Option<String>,
        page: PageRequest,
    ) -> ProductResult<Paginated<Product>> {
        let needle = term
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        let state = self.state.read().await;
        let rows = state.products.values().filter(|model| match &needle {
            Some(needle) => {
                model.title.to_lowercase().contains(needle)
                    || model.description.to_lowercase().contains(needle)
            }
            None => true,
        });
        Ok(state.page(rows, page, &self.base_url))
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .get(&id)
            .map(|model| state.render(model, &self.base_url)))
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&input.user_id) {
            return Err(ProductError::Database(format!(
                "user {} does not exist",
                input.user_id
            )));
        }

        state.last_id += 1;
        let now = Utc::now().fixed_offset();
        let model = product::Model {
            id: state.last_id,
            title: input.title,
            description: input.description,
            price: input.price,
            image: input.image,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };

        let product = state.render(&model, &self.base_url);
        state.products.insert(model.id, model);
        Ok(product)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;

        if let Some(user_id) = input.user_id {
            if !state.users.contains_key(&user_id) {
                return Err(ProductError::Database(format!(
                    "user {} does not exist",
                    user_id
                )));
            }
        }

        let Some(model) = state.products.get_mut(&id) else {
            return Ok(None);
        };

        if input.is_empty() {
            let model = model.clone();
            return Ok(Some(state.render(&model, &self.base_url)));
        }

        if let Some(title) = input.title {
            model.title = title;
        }
        if let Some(description) = input.description {
            model.description = description;
        }
        if let Some(price) = input.price {
            model.price = price;
        }
        if let Some(image) = input.image {
            model.image = image;
        }
        if let Some(user_id) = input.user_id {
            model.user_id = user_id;
        }
        model.updated_at = Utc::now().fixed_offset();

        let model = model.clone();
        Ok(Some(state.render(&model, &self.base_url)))
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "http://localhost:8080";

    async fn repository() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new(BASE_URL);
        repo.add_user(UserSummary {
            id: 1,
            name: "Owner".into(),
            email: "owner@example.com".into(),
        })
        .await;
        repo
    }

    fn new_product(title: &str) -> NewProduct {
        NewProduct {
            title: title.to_string(),
            description: format!("{} description", title),
            price: 9.99,
            image: None,
            user_id: 1,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repository().await;

        let created = repo
            .create(NewProduct {
                image: Some("pen.png".into()),
                ..new_product("Pen")
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(
            created.image_url.as_deref(),
            Some("http://localhost:8080/images/products/pen.png")
        );

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.user.unwrap().email, "owner@example.com");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_user() {
        let repo = repository().await;

        let result = repo
            .create(NewProduct {
                user_id: 42,
                ..new_product("Orphan")
            })
            .await;
        assert!(matches!(result, Err(ProductError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_merges_present_fields() {
        let repo = repository().await;
        let created = repo
            .create(NewProduct {
                image: Some("a.png".into()),
                ..new_product("Pen")
            })
            .await
            .unwrap();

        let untouched = repo
            .update(created.id, UpdateProduct::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched, created);

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    price: Some(2.5),
                    image: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 2.5);
        assert_eq!(updated.image, None);
        assert_eq!(updated.image_url, None);
        assert_eq!(updated.description, created.description);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = repository().await;
        assert!(repo
            .update(99, UpdateProduct::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = repository().await;
        let created = repo.create(new_product("Pen")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pages_cover_all_products_once() {
        let repo = repository().await;
        for i in 0..5 {
            repo.create(new_product(&format!("Item {}", i))).await.unwrap();
        }

        let mut seen = Vec::new();
        for page in 1..=3 {
            let result = repo
                .get_paginated_data(PageRequest::new(page, 2))
                .await
                .unwrap();
            assert_eq!(result.total, 5);
            assert_eq!(result.last_page, 3);
            assert_eq!(result.data.len(), if page == 3 { 1 } else { 2 });
            seen.extend(result.data.into_iter().map(|p| p.id));
        }

        let all: Vec<i32> = repo.get_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(seen, all);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = repository().await;
        repo.create(new_product("Test Widget")).await.unwrap();
        repo.create(new_product("Gadget")).await.unwrap();

        let found = repo
            .search_product(Some("test".into()), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.data[0].title, "Test Widget");

        let everything = repo
            .search_product(Some("  ".into()), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(everything.total, 2);
    }
}
