mod chain;
mod clients;
mod health;
mod mining;
pub mod models;
mod tx;

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpResponse, ResponseError};
use log::warn;

use crate::error::LedgerError;
pub use models::AppState;
use models::ErrorResponse;

pub fn init_routes(cfg: &mut ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let detail = format!("invalid request body: {err}");
        InternalError::from_response(err, bad_request(detail)).into()
    });

    cfg.app_data(json_config).service(health::home).service(
        web::scope("/api")
            .service(health::health_check)
            .service(clients::create_client)
            .service(clients::list_clients)
            .service(tx::post_transaction)
            .service(tx::get_pending)
            .service(tx::get_history)
            .service(mining::mine_block)
            .service(mining::cancel_mining)
            .service(chain::get_chain)
            .service(chain::get_block)
            .service(chain::validate_chain)
            .service(chain::tamper_block)
            .service(chain::reset),
    );
}

/// 400 with the error envelope.
pub(crate) fn bad_request(detail: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        success: false,
        detail,
    })
}

/// Every domain error is the caller's to correct: 400 with the message.
impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        warn!("request rejected: {self}");
        bad_request(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(LedgerConfig::default(), 1))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(init_routes)).await
        };
    }

    #[actix_web::test]
    async fn home_reports_running() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/").to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["status"], "running");
    }

    #[actix_web::test]
    async fn full_flow_over_http() {
        let state = state();
        let app = app!(state);

        for name in ["Alice", "Bob"] {
            let req = test::TestRequest::post()
                .uri("/api/clients")
                .set_json(json!({ "name": name }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["data"]["name"], name);
        }

        let req = test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({ "sender": "Alice", "recipient": "Bob", "value": 10.0 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["signature"].as_str().is_some_and(|s| !s.is_empty()));

        // No body: falls back to the configured default difficulty.
        let req = test::TestRequest::post().uri("/api/mine").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["block_number"], 0);
        assert!(body["data"]["block_hash"].as_str().unwrap().starts_with('0'));

        let req = test::TestRequest::get().uri("/api/transactions/pending").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        let req = test::TestRequest::get().uri("/api/blockchain").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["is_tampered"], false);

        let req = test::TestRequest::post().uri("/api/tamper/0").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["block_number"], 0);

        let req = test::TestRequest::get().uri("/api/blockchain/0").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["is_tampered"], true);
        assert_eq!(body["data"]["actual_hash"], body["data"]["block_hash"]);

        let req = test::TestRequest::get().uri("/api/validate").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["block_count"], 1);

        let req = test::TestRequest::post().uri("/api/reset").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["message"], "Blockchain reset successfully");
        assert!(state.ledger().is_empty());
    }

    #[actix_web::test]
    async fn domain_errors_map_to_400() {
        let app = app!(state());

        let req = test::TestRequest::post()
            .uri("/api/mine")
            .set_json(json!({ "difficulty": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["detail"], "no pending transactions to mine");

        let req = test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({ "sender": "Nobody", "recipient": "Bob", "value": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/api/tamper/3").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unparseable_difficulty_is_rejected() {
        let state = state();
        let app = app!(state);
        {
            let mut ledger = state.ledger();
            ledger.create_client("Alice").unwrap();
            ledger.create_client("Bob").unwrap();
            ledger.create_transaction("Alice", "Bob", 1.0).unwrap();
        }

        for body in [json!({ "difficulty": -3 }), json!({ "difficulty": "two" })] {
            let req = test::TestRequest::post()
                .uri("/api/mine")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
        }

        let req = test::TestRequest::post()
            .uri("/api/mine")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert!(state.ledger().blocks().is_empty());
        assert_eq!(state.ledger().pending().len(), 1);
    }

    #[actix_web::test]
    async fn explicit_difficulty_is_used() {
        let state = state();
        let app = app!(state);
        {
            let mut ledger = state.ledger();
            ledger.create_client("Alice").unwrap();
            ledger.create_client("Bob").unwrap();
            ledger.create_transaction("Alice", "Bob", 1.0).unwrap();
        }

        let req = test::TestRequest::post()
            .uri("/api/mine")
            .set_json(json!({ "difficulty": 2 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["block_hash"].as_str().unwrap().starts_with("00"));
    }

    #[actix_web::test]
    async fn malformed_json_body_uses_error_envelope() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/api/clients")
            .set_json(json!({ "nickname": "Alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["detail"].as_str().unwrap().starts_with("invalid request body"));
    }

    #[actix_web::test]
    async fn duplicate_client_is_400() {
        let app = app!(state());
        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/api/clients")
                .set_json(json!({ "name": "Alice" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn cancel_without_mining_is_harmless() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post().uri("/api/mine/cancel").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
        assert!(state.cancel.is_cancelled());
    }
}
