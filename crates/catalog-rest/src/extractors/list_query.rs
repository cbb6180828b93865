//! Product listing query parameters.

use catalog_core::{ListQuery, ProductSort};
use serde::Deserialize;
use utoipa::IntoParams;

/// Raw query parameters for product listings.
///
/// Every value is taken as text so malformed numbers fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Case-insensitive match against name or description.
    #[serde(default)]
    pub search: Option<String>,
    /// One of `newest`, `cheapest`, `expensive`, `name asc`, `name desc`.
    #[serde(default)]
    pub sort: Option<String>,
    /// Page number, default 1.
    #[serde(default)]
    pub page: Option<String>,
    /// Page size, default 10.
    #[serde(default)]
    pub limit: Option<String>,
}

impl From<ProductListQuery> for ListQuery {
    fn from(query: ProductListQuery) -> Self {
        ListQuery::new(
            query.search.unwrap_or_default(),
            ProductSort::parse(query.sort.as_deref().unwrap_or_default()),
            parse_number(query.page.as_deref()),
            parse_number(query.limit.as_deref()),
        )
    }
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}
