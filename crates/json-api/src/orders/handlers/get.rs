//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merchstore_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Id of the ordered product
    pub product_id: Uuid,

    /// Product title at placement time
    pub title: String,

    /// Product category at placement time
    pub category: String,

    /// Selected color
    pub color: String,

    /// Number of units
    pub quantity: u32,

    /// Unit price at placement time, in minor units
    pub unit_price: u64,

    /// Custom embroidery text, as submitted
    pub embroidery_text: Option<String>,

    /// Per-unit embroidery fee, in minor units
    pub embroidery_fee: u64,

    /// Line total in minor units
    pub line_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            product_id: item.product_uuid.into(),
            title: item.title,
            category: item.category.to_string(),
            color: item.color.to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            embroidery_text: item.embroidery_text,
            embroidery_fee: item.embroidery_fee,
            line_total: item.line_total,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order, rendered as a string
    pub id: Uuid,

    pub customer_name: String,

    pub customer_email: String,

    /// Line items in placement order
    pub items: Vec<OrderItemResponse>,

    /// Sum of unit prices times quantities, in minor units
    pub sub_total: u64,

    /// Sum of embroidery fees times quantities, in minor units
    pub embroidery_total: u64,

    /// Order total in minor units
    pub grand_total: u64,

    pub notes: Option<String>,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.uuid.into(),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            items: order.items.into_iter().map(Into::into).collect(),
            sub_total: order.sub_total,
            embroidery_total: order.embroidery_total,
            grand_total: order.grand_total,
            notes: order.notes,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its frozen line items.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
