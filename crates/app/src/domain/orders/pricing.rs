//! Order pricing.
//!
//! The pricing engine is pure: it validates a raw order request and turns
//! it plus the already-resolved products into a persist-ready set of line
//! items and totals. Product resolution and persistence stay with the
//! caller, so this module can be exercised without a database.

use rustc_hash::FxHashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    catalog::Color,
    orders::{data::NewOrder, records::OrderItemRecord},
    products::records::{ProductRecord, ProductUuid},
};

/// Flat per-unit charge, in minor units, applied when embroidery text is
/// requested.
pub const EMBROIDERY_FEE_PER_ITEM: u64 = 800;

/// Pricing rules for one deployment.
///
/// The palette is the set of colors orderable storewide. It deliberately
/// is not derived from any single product's `colors` list.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub embroidery_fee: u64,
    pub palette: Vec<Color>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            embroidery_fee: EMBROIDERY_FEE_PER_ITEM,
            palette: Color::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("order contains no items")]
    EmptyOrder,

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("quantity must be >= 1")]
    InvalidQuantity,

    #[error("invalid product id")]
    InvalidProductId,

    #[error("one or more products not found")]
    ProductNotFound,
}

/// One order item with its raw fields parsed and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedItem {
    pub product: ProductUuid,
    pub color: Color,
    pub quantity: u32,
}

/// A fully priced order, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub items: Vec<OrderItemRecord>,
    pub sub_total: u64,
    pub embroidery_total: u64,
    pub grand_total: u64,
}

/// Validate the items of an order request.
///
/// Colors and quantities are checked across all items first, then product
/// ids are parsed; the first failure in request order wins. Returns the
/// parsed items in request order, duplicates preserved.
///
/// # Errors
///
/// Returns the first [`PricingError`] encountered.
pub fn validate_items(
    order: &NewOrder,
    config: &PricingConfig,
) -> Result<Vec<ValidatedItem>, PricingError> {
    if order.items.is_empty() {
        return Err(PricingError::EmptyOrder);
    }

    let mut selections = Vec::with_capacity(order.items.len());

    for item in &order.items {
        let color = item
            .color
            .parse::<Color>()
            .ok()
            .filter(|color| config.palette.contains(color))
            .ok_or_else(|| PricingError::InvalidColor(item.color.clone()))?;

        let quantity = u32::try_from(item.quantity)
            .ok()
            .filter(|quantity| *quantity >= 1)
            .ok_or(PricingError::InvalidQuantity)?;

        selections.push((color, quantity));
    }

    order
        .items
        .iter()
        .zip(selections)
        .map(|(item, (color, quantity))| {
            let product = item
                .product_id
                .parse::<Uuid>()
                .map(ProductUuid::from_uuid)
                .map_err(|_| PricingError::InvalidProductId)?;

            Ok(ValidatedItem {
                product,
                color,
                quantity,
            })
        })
        .collect()
}

/// Price an order against the resolved products.
///
/// Every item must resolve; a single missing product rejects the whole
/// order. Line items are snapshots: title, category and unit price are
/// copied out of the product at this moment and never recomputed.
///
/// # Errors
///
/// Returns a [`PricingError`] when validation fails or any product is
/// missing from `products`.
pub fn price_order(
    order: &NewOrder,
    products: &FxHashMap<ProductUuid, ProductRecord>,
    config: &PricingConfig,
) -> Result<PricedOrder, PricingError> {
    let validated = validate_items(order, config)?;

    let mut items = Vec::with_capacity(validated.len());
    let mut sub_total = 0u64;
    let mut embroidery_total = 0u64;

    for (request, item) in order.items.iter().zip(validated) {
        let product = products
            .get(&item.product)
            .ok_or(PricingError::ProductNotFound)?;

        let quantity = u64::from(item.quantity);

        let embroidery_fee = request
            .embroidery_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map_or(0, |_| config.embroidery_fee);

        let unit_price = product.base_price;
        let line_total = (unit_price + embroidery_fee) * quantity;

        sub_total += unit_price * quantity;
        embroidery_total += embroidery_fee * quantity;

        items.push(OrderItemRecord {
            product_uuid: item.product,
            title: product.title.clone(),
            category: product.category,
            color: item.color,
            quantity: item.quantity,
            unit_price,
            embroidery_text: request.embroidery_text.clone(),
            embroidery_fee,
            line_total,
        });
    }

    let grand_total = sub_total + embroidery_total;

    Ok(PricedOrder {
        items,
        sub_total,
        embroidery_total,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::{catalog::Category, orders::data::NewOrderItem};

    use super::*;

    fn make_product(uuid: ProductUuid, base_price: u64) -> ProductRecord {
        ProductRecord {
            uuid,
            title: "Classic Hoodie".to_string(),
            category: Category::Hoodie,
            description: None,
            base_price,
            colors: Color::ALL.to_vec(),
            images: vec![],
            in_stock: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_item(product: ProductUuid, quantity: i64, embroidery_text: Option<&str>) -> NewOrderItem {
        NewOrderItem {
            product_id: product.to_string(),
            color: "black".to_string(),
            quantity,
            embroidery_text: embroidery_text.map(ToString::to_string),
        }
    }

    fn make_order(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            customer_name: "Sam Taylor".to_string(),
            customer_email: "sam@example.com".to_string(),
            items,
            notes: None,
        }
    }

    fn resolved(products: Vec<ProductRecord>) -> FxHashMap<ProductUuid, ProductRecord> {
        products
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect()
    }

    #[test]
    fn prices_single_item_with_embroidery() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 2000)]);
        let order = make_order(vec![make_item(uuid, 2, Some("Sam"))]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items.len(), 1);
        assert_eq!(priced.items[0].unit_price, 2000);
        assert_eq!(priced.items[0].embroidery_fee, 800);
        assert_eq!(priced.items[0].line_total, 5600);
        assert_eq!(priced.sub_total, 4000);
        assert_eq!(priced.embroidery_total, 1600);
        assert_eq!(priced.grand_total, 5600);
    }

    #[test]
    fn blank_embroidery_text_carries_no_fee() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 2000)]);
        let order = make_order(vec![make_item(uuid, 2, Some(""))]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items[0].embroidery_fee, 0);
        assert_eq!(priced.items[0].line_total, 4000);
        assert_eq!(priced.embroidery_total, 0);
        assert_eq!(priced.grand_total, 4000);
    }

    #[test]
    fn whitespace_only_embroidery_text_carries_no_fee() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 1500)]);
        let order = make_order(vec![make_item(uuid, 1, Some("   \t"))]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items[0].embroidery_fee, 0);
        assert_eq!(priced.grand_total, 1500);
    }

    #[test]
    fn absent_embroidery_text_carries_no_fee() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 1500)]);
        let order = make_order(vec![make_item(uuid, 3, None)]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items[0].embroidery_fee, 0);
        assert_eq!(priced.grand_total, 4500);
    }

    #[test]
    fn embroidery_text_is_stored_untrimmed() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 1000)]);
        let order = make_order(vec![make_item(uuid, 1, Some("  Sam "))]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items[0].embroidery_text.as_deref(), Some("  Sam "));
        assert_eq!(priced.items[0].embroidery_fee, 800);
    }

    #[test]
    fn totals_hold_across_mixed_items() {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();
        let products = resolved(vec![make_product(uuid_a, 2500), make_product(uuid_b, 900)]);
        let order = make_order(vec![
            make_item(uuid_a, 2, Some("Team")),
            make_item(uuid_b, 5, None),
        ]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        let item_sub: u64 = priced
            .items
            .iter()
            .map(|item| item.unit_price * u64::from(item.quantity))
            .sum();
        let item_embroidery: u64 = priced
            .items
            .iter()
            .map(|item| item.embroidery_fee * u64::from(item.quantity))
            .sum();

        assert_eq!(priced.sub_total, item_sub);
        assert_eq!(priced.embroidery_total, item_embroidery);
        assert_eq!(priced.grand_total, priced.sub_total + priced.embroidery_total);

        for item in &priced.items {
            assert_eq!(
                item.line_total,
                (item.unit_price + item.embroidery_fee) * u64::from(item.quantity),
                "line total mismatch"
            );
        }
    }

    #[test]
    fn duplicate_products_stay_independent_line_items() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 1000)]);
        let order = make_order(vec![make_item(uuid, 1, None), make_item(uuid, 3, None)]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items.len(), 2, "items must not be merged");
        assert_eq!(priced.items[0].quantity, 1);
        assert_eq!(priced.items[1].quantity, 3);
        assert_eq!(priced.sub_total, 4000);
        assert_eq!(priced.grand_total, 4000);
    }

    #[test]
    fn item_order_is_preserved() {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();
        let uuid_c = ProductUuid::new();
        let products = resolved(vec![
            make_product(uuid_a, 100),
            make_product(uuid_b, 200),
            make_product(uuid_c, 300),
        ]);
        let order = make_order(vec![
            make_item(uuid_b, 1, None),
            make_item(uuid_c, 1, None),
            make_item(uuid_a, 1, None),
        ]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        let uuids: Vec<ProductUuid> = priced.items.iter().map(|item| item.product_uuid).collect();

        assert_eq!(uuids, vec![uuid_b, uuid_c, uuid_a]);
    }

    #[test]
    fn snapshot_copies_product_fields() {
        let uuid = ProductUuid::new();
        let mut product = make_product(uuid, 1200);
        product.title = "Varsity Beanie".to_string();
        product.category = Category::Beanie;
        let products = resolved(vec![product]);
        let order = make_order(vec![make_item(uuid, 1, None)]);

        let priced = price_order(&order, &products, &PricingConfig::default()).unwrap();

        assert_eq!(priced.items[0].title, "Varsity Beanie");
        assert_eq!(priced.items[0].category, Category::Beanie);
        assert_eq!(priced.items[0].unit_price, 1200);
        assert_eq!(priced.items[0].color, Color::Black);
    }

    #[test]
    fn rejects_unknown_color() {
        let uuid = ProductUuid::new();
        let mut item = make_item(uuid, 1, None);
        item.color = "red".to_string();
        let order = make_order(vec![item]);

        let result = validate_items(&order, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::InvalidColor("red".to_string())));
    }

    #[test]
    fn rejects_color_outside_configured_palette() {
        let uuid = ProductUuid::new();
        let order = make_order(vec![make_item(uuid, 1, None)]);
        let config = PricingConfig {
            palette: vec![Color::Green, Color::White],
            ..PricingConfig::default()
        };

        let result = validate_items(&order, &config);

        assert_eq!(result, Err(PricingError::InvalidColor("black".to_string())));
    }

    #[test]
    fn rejects_zero_quantity() {
        let uuid = ProductUuid::new();
        let order = make_order(vec![make_item(uuid, 0, None)]);

        let result = validate_items(&order, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::InvalidQuantity));
    }

    #[test]
    fn rejects_negative_quantity() {
        let uuid = ProductUuid::new();
        let order = make_order(vec![make_item(uuid, -3, None)]);

        let result = validate_items(&order, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::InvalidQuantity));
    }

    #[test]
    fn rejects_malformed_product_id() {
        let order = make_order(vec![NewOrderItem {
            product_id: "not-a-uuid".to_string(),
            color: "green".to_string(),
            quantity: 1,
            embroidery_text: None,
        }]);

        let result = validate_items(&order, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::InvalidProductId));
    }

    #[test]
    fn color_errors_take_precedence_over_id_errors() {
        // All colors and quantities are checked before any id is parsed.
        let order = make_order(vec![
            NewOrderItem {
                product_id: "not-a-uuid".to_string(),
                color: "green".to_string(),
                quantity: 1,
                embroidery_text: None,
            },
            NewOrderItem {
                product_id: ProductUuid::new().to_string(),
                color: "red".to_string(),
                quantity: 1,
                embroidery_text: None,
            },
        ]);

        let result = validate_items(&order, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::InvalidColor("red".to_string())));
    }

    #[test]
    fn rejects_unresolved_product() {
        let known = ProductUuid::new();
        let unknown = ProductUuid::new();
        let products = resolved(vec![make_product(known, 1000)]);
        let order = make_order(vec![make_item(known, 1, None), make_item(unknown, 1, None)]);

        let result = price_order(&order, &products, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::ProductNotFound));
    }

    #[test]
    fn rejects_empty_order() {
        let order = make_order(vec![]);

        let result = validate_items(&order, &PricingConfig::default());

        assert_eq!(result, Err(PricingError::EmptyOrder));
    }

    #[test]
    fn custom_embroidery_fee_is_honored() {
        let uuid = ProductUuid::new();
        let products = resolved(vec![make_product(uuid, 1000)]);
        let order = make_order(vec![make_item(uuid, 2, Some("Sam"))]);
        let config = PricingConfig {
            embroidery_fee: 500,
            ..PricingConfig::default()
        };

        let priced = price_order(&order, &products, &config).unwrap();

        assert_eq!(priced.items[0].embroidery_fee, 500);
        assert_eq!(priced.embroidery_total, 1000);
        assert_eq!(priced.grand_total, 3000);
    }
}
