use actix_web::{HttpResponse, Responder, get};

use super::models::HomeResponse;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(HomeResponse {
        name: "Ledger Simulator API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("API is up and running 🦀")
}
