use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Product as exchanged with clients and with the upstream API.
///
/// Every field has a serde default so loosely-shaped upstream objects still
/// decode; inbound payloads are held to the declared constraints by
/// [`Validate`] before they reach the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    /// Identifier assigned by the upstream API. Omitted on create.
    #[serde(
        default,
        deserialize_with = "lenient::id",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(example = 7)]
    pub id: Option<i64>,
    /// Product name
    #[serde(default)]
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Name cannot exceed 100 characters")
    )]
    #[schema(example = "Apple iPad", max_length = 100)]
    pub name: String,
    /// Product attributes
    #[serde(default)]
    #[validate(nested)]
    pub data: ProductData,
}

/// Nested product attributes.
///
/// Decoding is forgiving because the upstream stores free-form objects:
/// keys match case-insensitively (`"Price"` and `"price"` are the same
/// field), numbers may be sent as numeric strings, and `null`, missing or
/// unparsable values fall back to the default. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate, ToSchema)]
pub struct ProductData {
    /// Model year
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    #[schema(example = 2021, minimum = 1900, maximum = 2100)]
    pub year: i32,
    /// Price, must be positive
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    #[schema(example = 549.99)]
    pub price: f64,
    #[serde(rename = "CPU model", skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
    #[serde(rename = "Hard disk size", skip_serializing_if = "Option::is_none")]
    pub hard_disk_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Silver")]
    pub color: Option<String>,
}

impl<'de> Deserialize<'de> for ProductData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Object(fields) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let mut data = Self::default();
        for (key, value) in &fields {
            match key.to_lowercase().as_str() {
                "year" => data.year = lenient::number(value).unwrap_or_default(),
                "price" => data.price = lenient::number(value).unwrap_or_default(),
                "cpu model" => data.cpu_model = lenient::text(value),
                "hard disk size" => data.hard_disk_size = lenient::text(value),
                "color" => data.color = lenient::text(value),
                _ => {}
            }
        }
        Ok(data)
    }
}

/// Query parameters for listing products
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductSearchParams {
    /// Page number, starting from 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be greater than 0"))]
    #[param(default = 1, minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Case-insensitive substring match on the product name
    pub name_filter: Option<String>,
}

impl Default for ProductSearchParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            name_filter: None,
        }
    }
}

/// One page of products plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// Products on this page, in upstream order
    pub products: Vec<Product>,
    /// Number of products matching the filter, across all pages
    pub total_count: usize,
    pub page: i64,
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("Name is required")));
    }
    Ok(())
}

/// Upstream values arrive as JSON numbers or as strings holding numbers
/// (seeded ids are `"7"`, some prices are `"419.99"`). Anything that does
/// not parse, including upstream-generated hex ids, becomes `None` instead
/// of failing the whole document.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    /// `deserialize_with` target for `Product::id`
    pub fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(number))
    }

    pub fn number<T: FromStr>(value: &Value) -> Option<T> {
        match value {
            Value::Number(n) => n.to_string().parse().ok(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
