//! Read-only product repository.
//!
//! Queries are checked at runtime (`query_as` with explicit binds); the
//! schema lives in the admin crate's migrations.

use sqlx::PgPool;

use bakehuset_core::catalog::{PricingRule, Product};
use bakehuset_core::{Price, ProductId};

use super::RepositoryError;

/// One `product` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    image: String,
    category: String,
    variants: Vec<String>,
    bundle_size: Option<i32>,
    bundle_price: Option<Price>,
}

impl ProductRow {
    /// Bundle columns must be both set or both null; anything else is a
    /// corrupt row.
    fn into_product(self) -> Result<Product, RepositoryError> {
        let pricing = match (self.bundle_size, self.bundle_price) {
            (None, None) => PricingRule::Unit,
            (Some(size), Some(price)) => {
                let size = u32::try_from(size).map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "product {} has negative bundle_size {size}",
                        self.id
                    ))
                })?;
                PricingRule::Bundle { size, price }
            }
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "product {} has a partial bundle rule",
                    self.id
                )));
            }
        };

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            variants: self.variants,
            pricing,
        })
    }
}

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for rows with a partial bundle rule.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, image, category, variants,
                   bundle_size, bundle_price
            FROM product
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
