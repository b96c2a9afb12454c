//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    catalog::{Category, Color},
    products::records::{ProductRecord, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCTS_BY_UUIDS_SQL: &str = include_str!("sql/get_products_by_uuids.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Resolve a set of products in one round trip.
    pub(crate) async fn get_products_by_uuids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, ProductRecord>(GET_PRODUCTS_BY_UUIDS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        title: &str,
        category: Category,
        description: Option<&str>,
        base_price: u64,
        colors: &[Color],
        images: &[String],
        in_stock: bool,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price_i64 = i64::try_from(base_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "base_price".to_string(),
            source: Box::new(e),
        })?;

        let color_names: Vec<String> = colors.iter().map(|color| color.to_string()).collect();

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(title)
            .bind(category.to_string())
            .bind(description)
            .bind(price_i64)
            .bind(color_names)
            .bind(images)
            .bind(in_stock)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Decode a non-negative money column stored as BIGINT.
pub(crate) fn try_get_amount(row: &PgRow, index: &str) -> Result<u64, sqlx::Error> {
    let amount: i64 = row.try_get(index)?;

    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category = row
            .try_get::<String, _>("category")?
            .parse::<Category>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "category".to_string(),
                source: Box::new(e),
            })?;

        let colors = row
            .try_get::<Vec<String>, _>("colors")?
            .into_iter()
            .map(|color| color.parse::<Color>())
            .collect::<Result<Vec<Color>, _>>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "colors".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            category,
            description: row.try_get("description")?,
            base_price: try_get_amount(row, "base_price")?,
            colors,
            images: row.try_get("images")?,
            in_stock: row.try_get("in_stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
