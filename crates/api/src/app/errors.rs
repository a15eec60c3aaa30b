use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use morpankh_core::LedgerError;

/// Map a ledger error to a structured JSON response.
///
/// The scanning UI keys off the `error` code; `insufficient_stock` carries
/// the remaining amount so it can render "only N remaining".
pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        LedgerError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        LedgerError::InsufficientStock {
            available,
            requested,
        } => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": format!("insufficient stock: only {available} remaining, requested {requested}"),
                "available": available,
                "requested": requested,
            })),
        )
            .into_response(),
        LedgerError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        LedgerError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
