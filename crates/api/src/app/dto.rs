use serde::Deserialize;

use morpankh_catalog::TransactionTarget;
use morpankh_core::{ActorId, LedgerError, MovementKind, StockChannel};
use morpankh_ledger::{RecordedTransaction, StockLevel, StockTransaction, TransactionPage, TransactionRequest};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /stock/transactions`.
///
/// The target is one of: explicit `product_id` (+ optional `variant_id`),
/// a scanned `barcode`, or a `variant_code`.
#[derive(Debug, Deserialize)]
pub struct RecordTransactionRequest {
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
    pub barcode: Option<String>,
    pub variant_code: Option<String>,
    pub movement: String,
    pub quantity: i64,
    pub channel: String,
    pub reason: Option<String>,
    pub scanned_by: Option<String>,
    pub notes: Option<String>,
}

impl RecordTransactionRequest {
    /// Validate and convert into a typed ledger request.
    pub fn into_request(self) -> Result<TransactionRequest, LedgerError> {
        let target = match (self.barcode, self.variant_code, self.product_id) {
            (Some(barcode), _, _) => TransactionTarget::Barcode(barcode),
            (None, Some(code), _) => TransactionTarget::VariantCode(code),
            (None, None, Some(product_id)) => TransactionTarget::Ids {
                product_id: product_id.parse()?,
                variant_id: self.variant_id.as_deref().map(str::parse).transpose()?,
            },
            (None, None, None) => {
                return Err(LedgerError::validation(
                    "one of product_id, barcode, or variant_code is required",
                ));
            }
        };

        let movement: MovementKind = self.movement.parse()?;
        let channel: StockChannel = self.channel.parse()?;

        if self.quantity <= 0 {
            return Err(LedgerError::validation("quantity must be a positive integer"));
        }
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| LedgerError::validation("quantity out of range"))?;

        let scanned_by: Option<ActorId> = self.scanned_by.as_deref().map(str::parse).transpose()?;

        let mut request = TransactionRequest::new(target, movement, quantity, channel);
        request.reason = self.reason;
        request.scanned_by = scanned_by;
        request.notes = self.notes;
        Ok(request)
    }
}

/// Query string of `GET /stock/transactions`.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsParams {
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
    pub channel: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn transaction_to_json(tx: &StockTransaction) -> serde_json::Value {
    serde_json::json!({
        "id": tx.id.to_string(),
        "product_id": tx.product_id.to_string(),
        "variant_id": tx.variant_id.map(|v| v.to_string()),
        "movement": tx.movement.as_str(),
        "quantity": tx.quantity,
        "channel": tx.channel.as_str(),
        "reason": tx.reason,
        "scanned_by": tx.scanned_by.map(|a| a.to_string()),
        "notes": tx.notes,
        "created_at": tx.created_at.to_rfc3339(),
    })
}

pub fn recorded_to_json(recorded: &RecordedTransaction) -> serde_json::Value {
    serde_json::json!({
        "transaction": transaction_to_json(&recorded.transaction),
        "new_quantity": recorded.new_quantity,
    })
}

pub fn page_to_json(page: &TransactionPage) -> serde_json::Value {
    serde_json::json!({
        "transactions": page.transactions.iter().map(transaction_to_json).collect::<Vec<_>>(),
        "total": page.total,
        "page": page.page,
        "page_size": page.page_size,
        "page_count": page.page_count,
    })
}

pub fn level_to_json(level: &StockLevel) -> serde_json::Value {
    serde_json::json!({
        "variant_id": level.key.variant_id.map(|v| v.to_string()),
        "channel": level.key.channel.as_str(),
        "quantity": level.quantity,
    })
}
