//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        catalog::{Category, Color},
        products::{
            data::NewProduct,
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

/// Check a new product against the catalog sets.
///
/// Returns the parsed category and colors; the first unknown value wins.
fn validate_new_product(
    product: &NewProduct,
) -> Result<(Category, Vec<Color>), ProductsServiceError> {
    let category = product
        .category
        .parse::<Category>()
        .map_err(|_| ProductsServiceError::InvalidCategory(product.category.clone()))?;

    let colors = product
        .colors
        .iter()
        .map(|color| {
            color
                .parse::<Color>()
                .map_err(|_| ProductsServiceError::InvalidColor(color.clone()))
        })
        .collect::<Result<Vec<Color>, _>>()?;

    Ok((category, colors))
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let (category, colors) = validate_new_product(&product)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                ProductUuid::new(),
                &product.title,
                category,
                product.description.as_deref(),
                product.base_price,
                &colors,
                &product.images,
                product.in_stock,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products in catalog order.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product after validating its category and colors.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
