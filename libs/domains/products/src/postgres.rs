use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};

use crate::{
    entity::{product, user},
    error::ProductResult,
    models::{NewProduct, PageRequest, Paginated, Product, UpdateProduct},
    repository::ProductRepository,
};

/// SeaORM-backed repository.
///
/// Runs against PostgreSQL in production; the queries stay portable so the
/// same code is exercised against SQLite in tests.
pub struct PgProductRepository {
    db: DatabaseConnection,
    base_url: String,
}

impl PgProductRepository {
    /// `base_url` is the public origin used to build `image_url`
    pub fn new(db: DatabaseConnection, base_url: impl Into<String>) -> Self {
        Self {
            db,
            base_url: base_url.into(),
        }
    }

    fn render(&self, rows: Vec<(product::Model, Option<user::Model>)>) -> Vec<Product> {
        rows.into_iter()
            .map(|(model, owner)| model.into_product(owner, &self.base_url))
            .collect()
    }

    async fn paginate(
        &self,
        select: Select<product::Entity>,
        page: PageRequest,
    ) -> ProductResult<Paginated<Product>> {
        let paginator = select
            .find_also_related(user::Entity)
            .order_by_asc(product::Column::Id)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page - 1).await?;

        Ok(Paginated::new(self.render(rows), page, total))
    }

    async fn with_owner(&self, model: product::Model) -> ProductResult<Product> {
        let owner = model.find_related(user::Entity).one(&self.db).await?;
        Ok(model.into_product(owner, &self.base_url))
    }
}

const LIKE_ESCAPE: char = '!';

/// `LOWER(col) LIKE '%term%'` over title and description.
/// `%` and `_` in `term` match literally.
fn search_condition(term: &str) -> Condition {
    let mut pattern = String::from("%");
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    let like = LikeExpr::new(pattern).escape(LIKE_ESCAPE);
    let lower = |column: product::Column| Expr::expr(Func::lower(Expr::col((product::Entity, column))));

    Condition::any()
        .add(lower(product::Column::Title).like(like.clone()))
        .add(lower(product::Column::Description).like(like))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let rows = product::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(self.render(rows))
    }

    async fn get_paginated_data(&self, page: PageRequest) -> ProductResult<Paginated<Product>> {
        self.paginate(product::Entity::find(), page).await
    }

    async fn search_product(
        &self,
        term: Option<String>,
        page: PageRequest,
    ) -> ProductResult<Paginated<Product>> {
        let mut select = product::Entity::find();

        if let Some(term) = term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            tracing::debug!(term, "Searching products");
            select = select.filter(search_condition(term));
        }

        self.paginate(select, page).await
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let row = product::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(model, owner)| model.into_product(owner, &self.base_url)))
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let now = Utc::now().fixed_offset();
        let active_model = product::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            image: Set(input.image),
            user_id: Set(input.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, user_id = model.user_id, "Created product");
        self.with_owner(model).await
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let Some(existing) = product::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            return self.with_owner(existing).await.map(Some);
        }

        let mut active_model: product::ActiveModel = existing.into();

        if let Some(title) = input.title {
            active_model.title = Set(title);
        }
        if let Some(description) = input.description {
            active_model.description = Set(description);
        }
        if let Some(price) = input.price {
            active_model.price = Set(price);
        }
        if let Some(image) = input.image {
            active_model.image = Set(image);
        }
        if let Some(user_id) = input.user_id {
            active_model.user_id = Set(user_id);
        }
        active_model.updated_at = Set(Utc::now().fixed_offset());

        let model = active_model.update(&self.db).await?;

        tracing::info!(product_id = id, "Updated product");
        self.with_owner(model).await.map(Some)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}
