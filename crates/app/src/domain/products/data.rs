//! Products Data

/// New Product Data
///
/// Category and colors arrive as raw strings; the service validates them
/// against the catalog sets before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub base_price: u64,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub in_stock: bool,
}
