//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use merchstore_app::domain::orders::{OrdersServiceError, pricing::PricingError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Pricing(PricingError::EmptyOrder) => {
            StatusError::bad_request().brief("Order must contain at least one item")
        }
        OrdersServiceError::Pricing(PricingError::InvalidColor(color)) => {
            StatusError::bad_request().brief(format!("Invalid color: {color}"))
        }
        OrdersServiceError::Pricing(PricingError::InvalidQuantity) => {
            StatusError::bad_request().brief("Quantity must be >= 1")
        }
        OrdersServiceError::Pricing(PricingError::InvalidProductId) => {
            StatusError::bad_request().brief("Invalid product id")
        }
        OrdersServiceError::Pricing(PricingError::ProductNotFound) => {
            StatusError::bad_request().brief("One or more products not found")
        }
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::Sql(source) => {
            error!("failed to persist order: {source}");

            StatusError::internal_server_error()
        }
    }
}
