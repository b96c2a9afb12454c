//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            pricing::{self, PricingConfig},
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    config: PricingConfig,
    orders_repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_config(db, PricingConfig::default())
    }

    #[must_use]
    pub fn with_config(db: Db, config: PricingConfig) -> Self {
        Self {
            db,
            config,
            orders_repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let validated = pricing::validate_items(&order, &self.config)?;

        let mut tx = self.db.begin().await?;

        // One batched lookup over the unique id set.
        let unique: Vec<ProductUuid> = {
            let mut seen = FxHashSet::default();
            validated
                .iter()
                .map(|item| item.product)
                .filter(|product| seen.insert(*product))
                .collect()
        };

        let products: FxHashMap<ProductUuid, ProductRecord> = self
            .products_repository
            .get_products_by_uuids(&mut tx, &unique)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let priced = pricing::price_order(&order, &products, &self.config)?;

        let uuid = OrderUuid::new();

        let mut created = self
            .orders_repository
            .create_order(
                &mut tx,
                uuid,
                &order.customer_name,
                &order.customer_email,
                order.notes.as_deref(),
                priced.sub_total,
                priced.embroidery_total,
                priced.grand_total,
            )
            .await?;

        self.orders_repository
            .create_order_items(&mut tx, uuid, &priced.items)
            .await?;

        tx.commit().await?;

        info!(order = %uuid, grand_total = priced.grand_total, "order placed");

        created.items = priced.items;

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.orders_repository.get_order(&mut tx, order).await?;

        let items = self.orders_repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        record.items = items;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, price and persist an order as a unit.
    ///
    /// Either every item validates and resolves and the whole order is
    /// written, or nothing is.
    async fn place_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order with its line items in placement order.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;
}
