use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

pub const NOT_FOUND_MESSAGE: &str = "Product Not Found";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete the product.";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product Not Found")]
    NotFound(i32),

    #[error("Failed to delete the product.")]
    DeleteFailed(i32),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            ProductError::DeleteFailed(id) => {
                tracing::error!(product_id = id, "Repository reported no row deleted");
                AppError::InternalServerError(DELETE_FAILED_MESSAGE.to_string())
            }
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
