//! Orders Data

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<NewOrderItem>,
    pub notes: Option<String>,
}

/// New Order Item Data
///
/// Product id and color stay raw strings here so bad values surface as
/// pricing errors with the offending input, not as decode failures.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: String,
    pub color: String,
    pub quantity: i64,
    pub embroidery_text: Option<String>,
}
