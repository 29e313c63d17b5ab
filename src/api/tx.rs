use actix_web::{HttpResponse, get, post, web};
use log::debug;

use super::models::{ApiResponse, AppState, TransactionRequest};
use crate::error::LedgerError;

/// Submit a transfer into the pending pool.
#[post("/transactions")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<TransactionRequest>,
) -> Result<HttpResponse, LedgerError> {
    debug!(
        "POST /transactions - {} -> {} ({})",
        body.sender, body.recipient, body.value
    );
    let receipt = state
        .ledger()
        .create_transaction(&body.sender, &body.recipient, body.value)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(receipt)))
}

#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger().pending()))
}

/// Every transaction that made it into a block.
#[get("/transactions/history")]
pub async fn get_history(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger().history()))
}
