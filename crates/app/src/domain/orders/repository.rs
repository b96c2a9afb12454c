//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::{Category, Color},
    orders::records::{OrderItemRecord, OrderRecord, OrderUuid},
    products::{records::ProductUuid, repository::try_get_amount},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order row. Items are written separately, in the same
    /// transaction, by [`create_order_items`](Self::create_order_items).
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        customer_name: &str,
        customer_email: &str,
        notes: Option<&str>,
        sub_total: u64,
        embroidery_total: u64,
        grand_total: u64,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer_name)
            .bind(customer_email)
            .bind(amount_to_db(sub_total, "sub_total")?)
            .bind(amount_to_db(embroidery_total, "embroidery_total")?)
            .bind(amount_to_db(grand_total, "grand_total")?)
            .bind(notes)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert the line items, keyed by ordinal so the request order
    /// survives round trips.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[OrderItemRecord],
    ) -> Result<(), sqlx::Error> {
        for (ordinal, item) in items.iter().enumerate() {
            let ordinal = i32::try_from(ordinal).map_err(|e| sqlx::Error::ColumnDecode {
                index: "ordinal".to_string(),
                source: Box::new(e),
            })?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(order.into_uuid())
                .bind(ordinal)
                .bind(item.product_uuid.into_uuid())
                .bind(&item.title)
                .bind(item.category.to_string())
                .bind(item.color.to_string())
                .bind(i64::from(item.quantity))
                .bind(amount_to_db(item.unit_price, "unit_price")?)
                .bind(item.embroidery_text.as_deref())
                .bind(amount_to_db(item.embroidery_fee, "embroidery_fee")?)
                .bind(amount_to_db(item.line_total, "line_total")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

fn amount_to_db(amount: u64, index: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            items: Vec::new(),
            sub_total: try_get_amount(row, "sub_total")?,
            embroidery_total: try_get_amount(row, "embroidery_total")?,
            grand_total: try_get_amount(row, "grand_total")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category = row
            .try_get::<String, _>("category")?
            .parse::<Category>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "category".to_string(),
                source: Box::new(e),
            })?;

        let color = row
            .try_get::<String, _>("color")?
            .parse::<Color>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "color".to_string(),
                source: Box::new(e),
            })?;

        let quantity = row.try_get::<i64, _>("quantity").and_then(|quantity| {
            u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })
        })?;

        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            category,
            color,
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            embroidery_text: row.try_get("embroidery_text")?,
            embroidery_fee: try_get_amount(row, "embroidery_fee")?,
            line_total: try_get_amount(row, "line_total")?,
        })
    }
}
