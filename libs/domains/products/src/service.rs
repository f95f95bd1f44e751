use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, NewProduct, PageRequest, Paginated, Product, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Service layer for Product operations
///
/// `show`, `update` and `destroy` resolve the product first, so a missing id
/// is always reported as [`ProductError::NotFound`] before any write happens.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every product, unpaginated
    pub async fn list_all(&self) -> ProductResult<Vec<Product>> {
        self.repository.get_all().await
    }

    pub async fn list_paginated(&self, page: PageRequest) -> ProductResult<Paginated<Product>> {
        self.repository.get_paginated_data(page).await
    }

    pub async fn search(
        &self,
        term: Option<&str>,
        page: PageRequest,
    ) -> ProductResult<Paginated<Product>> {
        self.repository
            .search_product(term.map(str::to_owned), page)
            .await
    }

    pub async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let input = NewProduct::try_from(input)?;
        self.repository.create(input).await
    }

    pub async fn show(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    pub async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        self.show(id).await?;

        // The row can vanish between the lookup and the write
        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product, returning it as it was before removal
    pub async fn destroy(&self, id: i32) -> ProductResult<Product> {
        let product = self.show(id).await?;

        if !self.repository.delete(id).await? {
            return Err(ProductError::DeleteFailed(id));
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn product(id: i32) -> Product {
        Product {
            id,
            title: "Pen".into(),
            description: "Blue pen".into(),
            price: 1.5,
            image: None,
            image_url: None,
            user_id: 1,
            user: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_show_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.show(999).await;

        assert!(matches!(result, Err(ProductError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_destroy_reports_failed_delete() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(product(id))));
        mock_repo.expect_delete().with(eq(7)).returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.destroy(7).await;

        assert!(matches!(result, Err(ProductError::DeleteFailed(7))));
    }

    #[tokio::test]
    async fn test_destroy_returns_prefetched_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id))));
        mock_repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        let deleted = service.destroy(3).await.unwrap();

        assert_eq!(deleted.id, 3);
    }

    #[tokio::test]
    async fn test_destroy_missing_never_calls_delete() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);

        assert!(matches!(
            service.destroy(5).await,
            Err(ProductError::NotFound(5))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_never_calls_update() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service.update(5, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_update_row_vanished_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id))));
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.update(5, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_create_validates_before_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service.create(CreateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_all()
            .returning(|| Err(ProductError::Database("connection reset".into())));

        let service = ProductService::new(mock_repo);
        let err = service.list_all().await.unwrap_err();

        assert_eq!(err.to_string(), "connection reset");
    }
}
