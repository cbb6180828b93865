//! Cache key generators for consistent key naming.

use catalog_core::{ListQuery, ProductId};
use url::form_urlencoded;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "catalog:products";

/// Generate a cache key for a single product.
#[must_use]
pub fn product_detail(id: ProductId) -> String {
    format!("{CACHE_PREFIX}:detail:{id}")
}

/// Generate a cache key for a product listing.
///
/// Every field is always present and always in the same order, so equal
/// queries produce equal keys however they were built.
#[must_use]
pub fn product_list(query: &ListQuery) -> String {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair("limit", &query.limit.to_string())
        .append_pair("page", &query.page.to_string())
        .append_pair("search", &query.search)
        .append_pair("sort", query.sort.as_str())
        .finish();
    format!("{CACHE_PREFIX}:list:{encoded}")
}

/// Pattern matching every cached product listing.
#[must_use]
pub fn product_list_pattern() -> String {
    format!("{CACHE_PREFIX}:list:*")
}
