//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        catalog::{Category, Color},
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item Record
///
/// A frozen snapshot of the product at placement time. Title, category and
/// unit price are value copies; later product edits never change them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub product_uuid: ProductUuid,
    pub title: String,
    pub category: Category,
    pub color: Color,
    pub quantity: u32,
    pub unit_price: u64,
    pub embroidery_text: Option<String>,
    pub embroidery_fee: u64,
    pub line_total: u64,
}

/// Order Record
///
/// Items keep the request order; totals are computed once at placement and
/// never recomputed.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItemRecord>,
    pub sub_total: u64,
    pub embroidery_total: u64,
    pub grand_total: u64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}
