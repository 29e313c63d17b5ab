use actix_web::{HttpResponse, get, post, web};

use super::models::{ApiResponse, AppState};
use crate::error::LedgerError;

/// Get the full chain as block views.
#[get("/blockchain")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger().blocks()))
}

#[get("/blockchain/{index}")]
pub async fn get_block(
    state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<HttpResponse, LedgerError> {
    let view = state.ledger().block(path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(view)))
}

/// Validate the whole chain. Violations are reported in the body, not as an
/// error status.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger().validate_chain()))
}

#[post("/tamper/{index}")]
pub async fn tamper_block(
    state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<HttpResponse, LedgerError> {
    let report = state.ledger().tamper_block(path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(report)))
}

#[post("/reset")]
pub async fn reset(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.ledger().reset()))
}
