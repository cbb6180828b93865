//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, ListQuery, NewProduct, Product, ProductId, ProductSort,
};
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

const PRODUCT_COLUMNS: &str = "id, name, price, description, quantity, created_by, created_at, \
                               updated_at, updated_by, deleted_at, deleted_by";

/// PostgreSQL product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct PostgresProductRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    description: String,
    quantity: i32,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
    deleted_by: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            quantity: row.quantity,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
            deleted_at: row.deleted_at,
            deleted_by: row.deleted_by,
        }
    }
}

/// Returns the ORDER BY clause for a sort order.
///
/// `id` breaks ties so page boundaries stay stable between requests.
const fn order_by(sort: ProductSort) -> &'static str {
    match sort {
        ProductSort::Newest => "created_at DESC, id DESC",
        ProductSort::Cheapest => "price ASC, id ASC",
        ProductSort::Expensive => "price DESC, id DESC",
        ProductSort::NameAsc => "name ASC, id ASC",
        ProductSort::NameDesc => "name DESC, id DESC",
    }
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_search_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if query.has_search() {
        let pattern = like_pattern(&query.search);
        builder
            .push(" WHERE name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern);
    }
}

fn count_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_search_filter(&mut builder, query);
    builder
}

fn select_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    push_search_filter(&mut builder, query);
    builder
        .push(" ORDER BY ")
        .push(order_by(query.sort))
        .push(" LIMIT ")
        .push_bind(i64::from(query.limit))
        .push(" OFFSET ")
        .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));
    builder
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
        debug!("Inserting product: {}", product.name);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, price, description, quantity, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.quantity)
        .bind(&product.created_by)
        .bind(product.created_at)
        .fetch_one(self.pool.inner())
        .await
        .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Product::from)
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    async fn query(&self, query: &ListQuery) -> CatalogResult<(Vec<Product>, u64)> {
        debug!(
            search = %query.search,
            sort = %query.sort,
            page = query.page,
            limit = query.limit,
            "Querying products"
        );

        let total: i64 = count_query(query)
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        let rows: Vec<ProductRow> = select_query(query)
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let products = rows.into_iter().map(Product::from).collect();
        Ok((products, u64::try_from(total).unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_covers_every_sort() {
        assert!(order_by(ProductSort::Newest).starts_with("created_at DESC"));
        assert!(order_by(ProductSort::Cheapest).starts_with("price ASC"));
        assert!(order_by(ProductSort::Expensive).starts_with("price DESC"));
        assert!(order_by(ProductSort::NameAsc).starts_with("name ASC"));
        assert!(order_by(ProductSort::NameDesc).starts_with("name DESC"));
    }

    #[test]
    fn test_unrecognized_sort_orders_like_newest() {
        assert_eq!(
            order_by(ProductSort::parse("bogus")),
            order_by(ProductSort::parse("newest"))
        );
        assert_eq!(order_by(ProductSort::parse("")), order_by(ProductSort::Newest));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("LG"), "%LG%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_count_query_without_search() {
        let builder = count_query(&ListQuery::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM products");
    }

    #[test]
    fn test_count_query_with_search() {
        let builder = count_query(&ListQuery::default().with_search("LG"));
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM products WHERE name ILIKE $1 OR description ILIKE $2"
        );
    }

    #[test]
    fn test_select_query_applies_sort_and_paging() {
        let query = ListQuery::default()
            .with_search("tv")
            .with_sort(ProductSort::Cheapest)
            .with_page(3);
        let builder = select_query(&query);
        let sql = builder.sql();
        assert!(sql.contains("WHERE name ILIKE $1 OR description ILIKE $2"));
        assert!(sql.contains("ORDER BY price ASC, id ASC"));
        assert!(sql.ends_with("LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn test_row_into_product() {
        let now = Utc::now();
        let row = ProductRow {
            id: 9,
            name: "LG TV".to_string(),
            price: 1000,
            description: "55 inch".to_string(),
            quantity: 2,
            created_by: "admin".to_string(),
            created_at: now,
            updated_at: Some(now),
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
        };
        let product = Product::from(row);
        assert_eq!(product.id, ProductId::new(9));
        assert_eq!(product.updated_at, Some(now));
    }
}
