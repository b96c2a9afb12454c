//! Liveness and store diagnostic handlers

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// Service banner
    pub message: String,
}

/// Liveness handler
///
/// Confirms the service is up without touching the store.
#[endpoint(tags("health"), summary = "Liveness banner")]
pub(crate) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Merch Store Backend".to_string(),
    })
}

/// Store diagnostic response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    /// Service status
    pub backend: String,

    /// Store connectivity status
    pub database: String,

    /// Visible tables, capped at ten
    pub tables: Vec<String>,
}

/// Store diagnostic handler
///
/// Probes the store; an unreachable store is reported, not an error.
#[endpoint(tags("health"), summary = "Store diagnostics")]
pub(crate) async fn database(depot: &mut Depot) -> Result<Json<DiagnosticsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let response = match state.app.diagnostics.database_status().await {
        Ok(status) => DiagnosticsResponse {
            backend: "running".to_string(),
            database: "connected".to_string(),
            tables: status.tables.into_iter().take(10).collect(),
        },
        Err(error) => {
            warn!("database diagnostic failed: {error}");

            DiagnosticsResponse {
                backend: "running".to_string(),
                database: "unavailable".to_string(),
                tables: vec![],
            }
        }
    };

    Ok(Json(response))
}
