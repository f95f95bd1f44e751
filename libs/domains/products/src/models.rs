use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

/// Page size used when `perPage` is absent or unusable
pub const DEFAULT_PER_PAGE: u64 = 20;
/// Upper bound on `perPage`
pub const MAX_PER_PAGE: u64 = 100;
/// Upper bound on `page`; keeps the row offset within a signed 64-bit SQL `OFFSET`
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

/// Path segment, relative to the public base URL, under which product images are served
pub const IMAGE_PATH: &str = "/images/products/";

/// Public URL of a product image, or `None` when there is no image
pub fn image_url(base_url: &str, image: Option<&str>) -> Option<String> {
    match image {
        Some(name) if !name.is_empty() => Some(format!(
            "{}{}{}",
            base_url.trim_end_matches('/'),
            IMAGE_PATH,
            name
        )),
        _ => None,
    }
}

/// Public projection of the owning user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Stored file name, relative to the product image directory
    pub image: Option<String>,
    /// Absolute URL of `image`; null when there is no image
    pub image_url: Option<String>,
    pub user_id: i32,
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a product
///
/// Fields are optional at the type level so a missing field is reported as
/// a validation error instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(required, length(min = 1, max = 255))]
    #[schema(example = "Pen", min_length = 1, max_length = 255)]
    pub title: Option<String>,

    #[validate(
        required,
        length(min = 1, message = "The description field is required.")
    )]
    #[schema(example = "Blue pen")]
    pub description: Option<String>,

    #[validate(required, range(min = 0.0))]
    #[schema(example = 1.5, minimum = 0.0)]
    pub price: Option<f64>,

    #[validate(length(max = 255))]
    #[schema(example = "pen.png", max_length = 255)]
    pub image: Option<String>,

    #[validate(required, range(min = 1))]
    #[schema(example = 1, minimum = 1)]
    pub user_id: Option<i32>,
}

/// Validated create payload handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub user_id: i32,
}

impl TryFrom<CreateProduct> for NewProduct {
    type Error = ValidationErrors;

    fn try_from(input: CreateProduct) -> Result<Self, Self::Error> {
        input.validate()?;

        match (input.title, input.description, input.price, input.user_id) {
            (Some(title), Some(description), Some(price), Some(user_id)) => Ok(Self {
                title,
                description,
                price,
                image: input.image,
                user_id,
            }),
            // validate() rejects any missing required field
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// DTO for updating a product
///
/// Absent fields are left unchanged. `image` distinguishes an absent key
/// from an explicit `null`, which clears the stored image.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "The description field must not be empty."))]
    pub description: Option<String>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "present_or_null")]
    #[validate(length(max = 255))]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,

    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
}

impl UpdateProduct {
    /// Names of the fields this payload touches
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("price", self.price.is_some()),
            ("image", self.image.is_some()),
            ("user_id", self.user_id.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// True when the payload names no field at all
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Normalized pagination input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Clamp raw values: `page < 1` becomes 1, `per_page < 1` the default,
    /// and anything above [`MAX_PAGE`] or [`MAX_PER_PAGE`] is capped.
    pub fn new(page: i64, per_page: i64) -> Self {
        let page = if page < 1 { 1 } else { (page as u64).min(MAX_PAGE) };
        let per_page = if per_page < 1 {
            DEFAULT_PER_PAGE
        } else {
            (per_page as u64).min(MAX_PER_PAGE)
        };
        Self { page, per_page }
    }

    /// Lenient parse of raw query-string values
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(
            parse(page).unwrap_or(1),
            parse(per_page).unwrap_or(DEFAULT_PER_PAGE as i64),
        )
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// One page of results plus the metadata needed to fetch the others
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            current_page: request.page,
            per_page: request.per_page,
            total,
            last_page: total.div_ceil(request.per_page).max(1),
        }
    }
}

/// Query string of the public paginated listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    /// Items per page (default 20, max 100)
    #[serde(rename = "perPage")]
    #[param(value_type = Option<u64>)]
    pub per_page: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.per_page.as_deref())
    }
}

/// Query string of the public search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against title and description
    pub search: Option<String>,
    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>)]
    pub page: Option<String>,
    /// Items per page (default 20, max 100)
    #[serde(rename = "perPage")]
    #[param(value_type = Option<u64>)]
    pub per_page: Option<String>,
}

impl SearchQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.per_page.as_deref())
    }

    /// Trimmed search term, `None` when blank
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("http://localhost:8080", Some("pen.png")).as_deref(),
            Some("http://localhost:8080/images/products/pen.png")
        );
        assert_eq!(
            image_url("https://shop.example/", Some("a.jpg")).as_deref(),
            Some("https://shop.example/images/products/a.jpg")
        );
        assert_eq!(image_url("http://localhost", Some("")), None);
        assert_eq!(image_url("http://localhost", None), None);
    }

    #[test]
    fn test_page_request_normalization() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::from_raw(Some("3"), Some("2")),
            PageRequest { page: 3, per_page: 2 }
        );
        assert_eq!(
            PageRequest::from_raw(Some("0"), Some("-5")),
            PageRequest { page: 1, per_page: DEFAULT_PER_PAGE }
        );
        assert_eq!(
            PageRequest::from_raw(Some("abc"), Some("ten")),
            PageRequest::default()
        );
        assert_eq!(PageRequest::from_raw(None, Some("5000")).per_page, MAX_PER_PAGE);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_huge_page_is_capped() {
        let request = PageRequest::from_raw(Some("9223372036854775807"), Some("100"));
        assert_eq!(request.page, MAX_PAGE);
        assert!(request.offset() <= i64::MAX as u64);

        let request = PageRequest::new(i64::MAX, 20);
        assert_eq!(request.page, MAX_PAGE);
        assert_eq!(request.offset(), (MAX_PAGE - 1) * 20);
    }

    #[test]
    fn test_last_page() {
        let request = PageRequest::new(1, 2);
        assert_eq!(Paginated::<i32>::new(vec![], request, 0).last_page, 1);
        assert_eq!(Paginated::<i32>::new(vec![], request, 5).last_page, 3);
        assert_eq!(Paginated::<i32>::new(vec![], request, 6).last_page, 3);
    }

    #[test]
    fn test_create_requires_fields() {
        let errors = NewProduct::try_from(CreateProduct::default()).unwrap_err();
        let fields = errors.field_errors();

        for field in ["title", "description", "price", "user_id"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
        assert!(!fields.contains_key("image"));
    }

    #[test]
    fn test_create_rejects_negative_price_and_empty_description() {
        let input = CreateProduct {
            title: Some("Pen".into()),
            description: Some(String::new()),
            price: Some(-1.0),
            image: None,
            user_id: Some(1),
        };

        let errors = NewProduct::try_from(input).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn test_create_ignores_unknown_fields() {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "title": "Pen",
            "description": "Blue pen",
            "price": 1.5,
            "user_id": 1,
            "is_admin": true
        }))
        .unwrap();

        let product = NewProduct::try_from(input).unwrap();
        assert_eq!(product.title, "Pen");
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_update_image_null_vs_absent() {
        let absent: UpdateProduct = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(absent.image, None);

        let cleared: UpdateProduct = serde_json::from_str(r#"{"image":null}"#).unwrap();
        assert_eq!(cleared.image, Some(None));

        let set: UpdateProduct = serde_json::from_str(r#"{"image":"a.png"}"#).unwrap();
        assert_eq!(set.image, Some(Some("a.png".to_string())));
        assert_eq!(cleared.present_fields(), vec!["image"]);
        assert_eq!(absent.present_fields(), vec!["title"]);
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        assert!(UpdateProduct::default().validate().is_ok());

        let update = UpdateProduct {
            title: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_search_term_blank_is_none() {
        let query = SearchQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.term(), None);

        let query = SearchQuery {
            search: Some(" Widget ".into()),
            ..Default::default()
        };
        assert_eq!(query.term(), Some("Widget"));
    }
}
