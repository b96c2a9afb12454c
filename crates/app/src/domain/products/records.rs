//! Product Records

use jiff::Timestamp;

use crate::{
    domain::catalog::{Category, Color},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// The catalog entry as stored. Orders copy the fields they need out of
/// this record at placement time; later edits never reach past orders.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub category: Category,
    pub description: Option<String>,
    pub base_price: u64,
    pub colors: Vec<Color>,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
