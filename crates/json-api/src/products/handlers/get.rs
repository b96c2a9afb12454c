//! Get Product Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merchstore_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product, rendered as a string
    pub id: Uuid,

    /// Display name
    pub title: String,

    /// Category wire form (hoodie, beanie, shirt, trackpants)
    pub category: String,

    /// Optional product description
    pub description: Option<String>,

    /// Base price in minor units
    pub base_price: u64,

    /// Available colors
    pub colors: Vec<String>,

    /// Image URLs
    pub images: Vec<String>,

    /// Whether the product is currently in stock
    pub in_stock: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into(),
            title: product.title,
            category: product.category.to_string(),
            description: product.description,
            base_price: product.base_price,
            colors: product.colors.iter().map(ToString::to_string).collect(),
            images: product.images,
            in_stock: product.in_stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
