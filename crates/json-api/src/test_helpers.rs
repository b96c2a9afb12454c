//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use merchstore_app::{
    context::AppContext,
    domain::{
        diagnostics::MockDiagnosticsService, orders::MockOrdersService,
        products::MockProductsService,
    },
};

use crate::state::State;

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();

    orders
}

fn strict_diagnostics_mock() -> MockDiagnosticsService {
    let mut diagnostics = MockDiagnosticsService::new();

    diagnostics.expect_database_status().never();

    diagnostics
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        products: Arc::new(products),
        orders: Arc::new(strict_orders_mock()),
        diagnostics: Arc::new(strict_diagnostics_mock()),
    }))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        products: Arc::new(strict_products_mock()),
        orders: Arc::new(orders),
        diagnostics: Arc::new(strict_diagnostics_mock()),
    }))
}

pub(crate) fn state_with_diagnostics(diagnostics: MockDiagnosticsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        products: Arc::new(strict_products_mock()),
        orders: Arc::new(strict_orders_mock()),
        diagnostics: Arc::new(diagnostics),
    }))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .push(route),
    )
}

pub(crate) fn diagnostics_service(diagnostics: MockDiagnosticsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_diagnostics(diagnostics)))
            .push(route),
    )
}
