use actix_web::{HttpResponse, get, post, web};

use super::models::{ApiResponse, AppState, ClientRequest};
use crate::error::LedgerError;

/// Register a named client with a fresh key pair.
#[post("/clients")]
pub async fn create_client(
    state: web::Data<AppState>,
    body: web::Json<ClientRequest>,
) -> Result<HttpResponse, LedgerError> {
    let record = state.ledger().create_client(body.name.trim())?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(record)))
}

#[get("/clients")]
pub async fn list_clients(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger().clients()))
}
