//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merchstore_app::domain::orders::data::{NewOrder, NewOrderItem};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Create Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderItemRequest {
    /// Id of the product to order
    pub product_id: String,

    /// Selected color
    pub color: String,

    /// Number of units, at least one
    pub quantity: i64,

    /// Optional custom embroidery text
    pub embroidery_text: Option<String>,
}

impl From<CreateOrderItemRequest> for NewOrderItem {
    fn from(request: CreateOrderItemRequest) -> Self {
        NewOrderItem {
            product_id: request.product_id,
            color: request.color,
            quantity: request.quantity,
            embroidery_text: request.embroidery_text,
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<CreateOrderItemRequest>,
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            items: request.items.into_iter().map(Into::into).collect(),
            notes: request.notes,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    /// Created order id
    pub id: Uuid,

    /// Order total in minor units
    pub grand_total: u64,
}

/// Create Order Handler
///
/// Validates, prices and persists the order as a unit; the first
/// validation failure rejects the whole request.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .place_order(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        id: order.uuid.into(),
        grand_total: order.grand_total,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use merchstore_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, pricing::PricingError, records::OrderUuid},
        products::records::ProductUuid,
    };

    use crate::{orders::handlers::tests::make_order, test_helpers::orders_service};

    use super::*;

    fn make_service(repo: MockOrdersService) -> Service {
        orders_service(repo, Router::with_path("orders").post(handler))
    }

    fn order_payload(product_id: &str) -> serde_json::Value {
        json!({
            "customer_name": "Sam Taylor",
            "customer_email": "sam@example.com",
            "items": [{
                "product_id": product_id,
                "color": "black",
                "quantity": 2,
                "embroidery_text": "Sam",
            }],
        })
    }

    #[tokio::test]
    async fn test_place_order_success() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid);
        let product_id = order.items[0].product_uuid.to_string();
        let expected_product_id = product_id.clone();

        let mut repo = MockOrdersService::new();

        repo.expect_place_order()
            .once()
            .withf(move |new| {
                new.customer_name == "Sam Taylor"
                    && new.items.len() == 1
                    && new.items[0].product_id == expected_product_id
                    && new.items[0].quantity == 2
            })
            .return_once(move |_| Ok(order));

        repo.expect_get_order().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&order_payload(&product_id))
            .send(&make_service(repo))
            .await;

        let body: OrderPlacedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/orders/{uuid}").as_str()));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.grand_total, 5600);

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_invalid_color_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_place_order().once().return_once(|_| {
            Err(OrdersServiceError::Pricing(PricingError::InvalidColor(
                "red".to_string(),
            )))
        });

        repo.expect_get_order().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&order_payload(&ProductUuid::new().to_string()))
            .send(&make_service(repo))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            body.contains("Invalid color: red"),
            "message should name the color, got {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_invalid_quantity_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Pricing(PricingError::InvalidQuantity)));

        repo.expect_get_order().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&order_payload(&ProductUuid::new().to_string()))
            .send(&make_service(repo))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            body.contains("Quantity must be >= 1"),
            "unexpected message {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_invalid_product_id_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Pricing(PricingError::InvalidProductId)));

        repo.expect_get_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&order_payload("not-a-uuid"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_unresolved_product_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Pricing(PricingError::ProductNotFound)));

        repo.expect_get_order().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&order_payload(&ProductUuid::new().to_string()))
            .send(&make_service(repo))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            body.contains("One or more products not found"),
            "unexpected message {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_empty_items_returns_400() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_place_order()
            .once()
            .withf(|new| new.items.is_empty())
            .return_once(|_| Err(OrdersServiceError::Pricing(PricingError::EmptyOrder)));

        repo.expect_get_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "customer_name": "Sam Taylor",
                "customer_email": "sam@example.com",
                "items": [],
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_storage_error_returns_500() -> TestResult {
        let mut repo = MockOrdersService::new();

        repo.expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolClosed)));

        repo.expect_get_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&order_payload(&ProductUuid::new().to_string()))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
