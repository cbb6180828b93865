//! Product entity and list query types.

use crate::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog product.
///
/// The ID is assigned by the store and never changes afterwards. The
/// update/delete audit fields are carried for schema compatibility but no
/// operation writes them after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub quantity: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_by: Option<String>,
}

/// A product that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub quantity: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    /// Creates a new product stamped with the current time.
    #[must_use]
    pub fn new(
        name: String,
        price: i64,
        description: String,
        quantity: i32,
        created_by: String,
    ) -> Self {
        Self {
            name,
            price,
            description,
            quantity,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Converts into a stored product once the store has assigned an ID.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            quantity: self.quantity,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: Some(self.created_at),
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
        }
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Lowest price first.
    #[serde(rename = "cheapest")]
    Cheapest,
    /// Highest price first.
    #[serde(rename = "expensive")]
    Expensive,
    /// Name A-Z.
    #[serde(rename = "name asc")]
    NameAsc,
    /// Name Z-A.
    #[serde(rename = "name desc")]
    NameDesc,
}

impl ProductSort {
    /// Parses a sort value. Empty and unrecognized values fall back to [`ProductSort::Newest`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "cheapest" => Self::Cheapest,
            "expensive" => Self::Expensive,
            "name asc" => Self::NameAsc,
            "name desc" => Self::NameDesc,
            _ => Self::Newest,
        }
    }

    /// Returns the canonical name of this sort order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Cheapest => "cheapest",
            Self::Expensive => "expensive",
            Self::NameAsc => "name asc",
            Self::NameDesc => "name desc",
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filtered, sorted, paginated product listing request.
///
/// Values are normalized on construction, so two queries that select the
/// same rows compare equal and derive the same cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring matched against name or description.
    pub search: String,
    /// Sort order.
    pub sort: ProductSort,
    /// 1-indexed page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl ListQuery {
    /// The default page.
    pub const DEFAULT_PAGE: u32 = 1;
    /// The default page size.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Creates a list query. Missing, zero, or negative page/limit values use the defaults.
    #[must_use]
    pub fn new(
        search: impl Into<String>,
        sort: ProductSort,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        Self {
            search: search.into(),
            sort,
            page: positive_or(page, Self::DEFAULT_PAGE),
            limit: positive_or(limit, Self::DEFAULT_LIMIT),
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn with_sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page number.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Returns the row offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Returns true when a search filter applies.
    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(String::new(), ProductSort::Newest, None, None)
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}
