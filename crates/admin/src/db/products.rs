//! Product repository: full CRUD.
//!
//! Updates replace the whole record; there are no partial patches.

use sqlx::PgPool;

use bakehuset_core::catalog::{PricingRule, Product};
use bakehuset_core::{Price, ProductId};

use super::RepositoryError;

/// Fields for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: String,
    pub variants: Vec<String>,
    pub pricing: PricingRule,
}

impl ProductInput {
    /// Bundle rule split into its two nullable columns.
    fn bundle_columns(&self) -> (Option<i32>, Option<Price>) {
        match self.pricing {
            PricingRule::Unit => (None, None),
            PricingRule::Bundle { size, price } => (i32::try_from(size).ok(), Some(price)),
        }
    }
}

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

/// Repository for product CRUD.
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
    /// Returns `RepositoryError::Database` if the query fails.
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

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let (bundle_size, bundle_price) = input.bundle_columns();

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO product (name, description, price, image, category, variants,
                                 bundle_size, bundle_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, price, image, category, variants,
                      bundle_size, bundle_price
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image)
        .bind(&input.category)
        .bind(&input.variants)
        .bind(bundle_size)
        .bind(bundle_price)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// Replace the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let (bundle_size, bundle_price) = input.bundle_columns();

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE product
            SET name = $2, description = $3, price = $4, image = $5, category = $6,
                variants = $7, bundle_size = $8, bundle_price = $9, updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, price, image, category, variants,
                      bundle_size, bundle_price
            ",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image)
        .bind(&input.category)
        .bind(&input.variants)
        .bind(bundle_size)
        .bind(bundle_price)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_product()
    }

    /// Delete the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
