//! HTTP handlers for Products API

use axum::{
    extract::State,
    http::HeaderMap,
    middleware,
    response::Response,
    routing::get,
    Extension, Router,
};
use axum_helpers::{
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestIdResponse, InternalServerErrorResponse, InvalidInputResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware, response_success, ApiResponse, AuditEvent, AuditOutcome, IdPath, JwtAuth,
    JwtClaims, QueryParams, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ListQuery, Paginated, Product, SearchQuery, UpdateProduct, UserSummary,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const LIST_ALL_MESSAGE: &str = "Product List Fetch Successfully !";
pub const LIST_PAGE_MESSAGE: &str = "Product List Fetched Successfully !";
pub const CREATED_MESSAGE: &str = "New Product Created Successfully !";
pub const SHOW_MESSAGE: &str = "Product Details Fetch Successfully !";
pub const UPDATED_MESSAGE: &str = "Product Updated Successfully !";
pub const DELETED_MESSAGE: &str = "Product Deleted Successfully !";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        index,
        index_all,
        search,
        store,
        show,
        update,
        destroy,
    ),
    components(
        schemas(Product, UserSummary, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            InvalidInputResponse,
            BadRequestIdResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router.
///
/// `/view/all` and `/view/search` are public; every other route requires a
/// bearer token verified by `auth`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/view/all", get(index_all))
        .route("/view/search", get(search));

    let protected = Router::new()
        .route("/", get(index).post(store))
        .route(
            "/{id}",
            get(show).put(update).patch(update).delete(destroy),
        )
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    public
        .merge(protected)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

fn actor(claims: &Option<Extension<JwtClaims>>) -> Option<&JwtClaims> {
    claims.as_ref().map(|Extension(claims)| claims)
}

/// List every product
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All products", body = ApiResponse<Vec<Product>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn index<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Response> {
    let products = service.list_all().await?;
    Ok(response_success(products, LIST_ALL_MESSAGE))
}

/// Paginated product list (public)
#[utoipa::path(
    get,
    path = "/view/all",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of products", body = ApiResponse<Paginated<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn index_all<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ProductResult<Response> {
    let page = service.list_paginated(query.page_request()).await?;
    Ok(response_success(page, LIST_PAGE_MESSAGE))
}

/// Search products by title or description (public)
#[utoipa::path(
    get,
    path = "/view/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matching products", body = ApiResponse<Paginated<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> ProductResult<Response> {
    let page = service.search(query.term(), query.page_request()).await?;
    Ok(response_success(page, LIST_PAGE_MESSAGE))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    security(("bearerAuth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 401, response = UnauthorizedResponse),
        (status = 422, response = InvalidInputResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn store<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Response> {
    let product = service.create(input).await?;

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_actor(actor(&claims))
    .with_request(&headers)
    .log();

    Ok(response_success(product, CREATED_MESSAGE))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn show<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Response> {
    let product = service.show(id).await?;
    Ok(response_success(product, SHOW_MESSAGE))
}

/// Update a product; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = InvalidInputResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Response> {
    let fields = input.present_fields();
    let product = service.update(id, input).await?;

    AuditEvent::new(
        "product.update",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_actor(actor(&claims))
    .with_request(&headers)
    .with_details(serde_json::json!({ "fields": fields }))
    .log();

    Ok(response_success(product, UPDATED_MESSAGE))
}

/// Delete a product, returning it as it was
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<Product>),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn destroy<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProductResult<Response> {
    let result = service.destroy(id).await;

    if !matches!(result, Err(ProductError::NotFound(_))) {
        let outcome = if result.is_ok() {
            AuditOutcome::Success
        } else {
            AuditOutcome::Failure
        };
        AuditEvent::new("product.delete", Some(format!("product:{}", id)), outcome)
            .with_actor(actor(&claims))
            .with_request(&headers)
            .log();
    }

    Ok(response_success(result?, DELETED_MESSAGE))
}
