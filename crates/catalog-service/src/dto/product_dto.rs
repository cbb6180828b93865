//! Product-related DTOs.

use catalog_core::rules::not_blank;
use catalog_core::{NewProduct, Pagination, Product};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new product.
///
/// Every field is required. `price` and `quantity` may be zero but must be
/// present, which is why they are optional here and checked by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name is required"))]
    #[schema(example = "LG TV")]
    pub name: String,

    #[validate(required(message = "price is required"))]
    #[schema(example = 5_000_000)]
    pub price: Option<i64>,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "description is required"))]
    #[schema(example = "55 inch OLED television")]
    pub description: String,

    #[validate(required(message = "quantity is required"))]
    #[schema(example = 3)]
    pub quantity: Option<i32>,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "created_by is required"))]
    #[schema(example = "admin")]
    pub created_by: String,
}

impl CreateProductRequest {
    /// Converts a validated request into a product ready to insert.
    ///
    /// Missing numeric fields become zero; call after validation.
    #[must_use]
    pub fn into_new_product(self) -> NewProduct {
        NewProduct::new(
            self.name,
            self.price.unwrap_or_default(),
            self.description,
            self.quantity.unwrap_or_default(),
            self.created_by,
        )
    }
}

/// A page of products with freshly computed page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{CatalogError, ValidateExt};

    fn valid_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "LG TV".to_string(),
            price: Some(5_000_000),
            description: "55 inch".to_string(),
            quantity: Some(3),
            created_by: "admin".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(valid_request().validate_request().is_ok());
    }

    #[test]
    fn test_zero_price_and_quantity_are_accepted() {
        let request = CreateProductRequest {
            price: Some(0),
            quantity: Some(0),
            ..valid_request()
        };
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let request: CreateProductRequest = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        let err = request.validate_request().unwrap_err();
        let CatalogError::Validation(message) = err else {
            panic!("expected validation error");
        };
        for field in ["name", "price", "description", "quantity", "created_by"] {
            assert!(message.contains(&format!("{field} is required")), "{message}");
        }
    }

    #[test]
    fn test_into_new_product() {
        let product = valid_request().into_new_product();
        assert_eq!(product.name, "LG TV");
        assert_eq!(product.price, 5_000_000);
        assert_eq!(product.quantity, 3);
        assert_eq!(product.created_by, "admin");
    }
}
