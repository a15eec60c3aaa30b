//! Stock ledger routes: record movements, read history, read levels.

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;

use morpankh_catalog::{ProductDirectory, TransactionTarget};
use morpankh_core::{LedgerError, ProductId, StockChannel, VariantId};
use morpankh_ledger::{Pagination, TransactionFilter};

use crate::app::AppServices;
use crate::app::dto::{
    ListTransactionsParams, RecordTransactionRequest, level_to_json, page_to_json, recorded_to_json,
};
use crate::app::errors::ledger_error_to_response;

pub fn router() -> Router {
    Router::new()
        .route("/transactions", post(record_transaction).get(list_transactions))
        .route("/levels/:product_id", get(product_levels))
}

async fn record_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RecordTransactionRequest>,
) -> Response {
    let request = match body.into_request() {
        Ok(request) => request,
        Err(e) => return ledger_error_to_response(e),
    };

    match services.ledger.record_transaction(request) {
        Ok(recorded) => (StatusCode::CREATED, Json(recorded_to_json(&recorded))).into_response(),
        Err(e) => ledger_error_to_response(e),
    }
}

async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ListTransactionsParams>,
) -> Response {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(e) => return ledger_error_to_response(e),
    };
    let pagination = Pagination::new(params.page, params.page_size);

    match services.ledger.list_transactions(filter, pagination) {
        Ok(page) => Json(page_to_json(&page)).into_response(),
        Err(e) => ledger_error_to_response(e),
    }
}

async fn product_levels(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<String>,
) -> Response {
    let product_id: ProductId = match product_id.parse() {
        Ok(id) => id,
        Err(e) => return ledger_error_to_response(e),
    };

    // Unknown products 404 rather than reading as an empty level set.
    let target = TransactionTarget::Ids {
        product_id,
        variant_id: None,
    };
    if let Err(e) = services.directory.resolve(&target) {
        return ledger_error_to_response(e);
    }

    match services.ledger.levels_for_product(product_id) {
        Ok(levels) => Json(json!({
            "product_id": product_id.to_string(),
            "levels": levels.iter().map(level_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => ledger_error_to_response(e),
    }
}

fn parse_filter(params: &ListTransactionsParams) -> Result<TransactionFilter, LedgerError> {
    let product_id: Option<ProductId> = params.product_id.as_deref().map(str::parse).transpose()?;
    let variant_id: Option<VariantId> = params.variant_id.as_deref().map(str::parse).transpose()?;
    let channel: Option<StockChannel> = params.channel.as_deref().map(str::parse).transpose()?;
    Ok(TransactionFilter {
        product_id,
        variant_id,
        channel,
    })
}
