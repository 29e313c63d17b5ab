use actix_web::{Error, HttpResponse, post, web};
use log::{info, warn};

use super::bad_request;
use super::models::{ApiResponse, AppState, MessageResponse, MineRequest};

/// Mine the pending pool. An empty body mines at the default difficulty; a
/// body that does not parse is rejected. The search runs on the blocking pool
/// with the ledger unlocked.
#[post("/mine")]
pub async fn mine_block(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, Error> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        MineRequest::default()
    } else {
        match serde_json::from_slice::<MineRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!("POST /mine - bad body: {e}");
                return Ok(bad_request(format!("invalid mine request: {e}")));
            }
        }
    };
    let difficulty = request.difficulty.unwrap_or(state.default_difficulty);
    info!("POST /mine - difficulty {difficulty}");

    let state = state.clone();
    let mined = web::block(move || state.mine(difficulty)).await??;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(mined)))
}

/// Ask a running search to stop. Has no effect when nothing is mining.
#[post("/mine/cancel")]
pub async fn cancel_mining(state: web::Data<AppState>) -> HttpResponse {
    state.cancel.cancel();
    HttpResponse::Ok().json(ApiResponse::ok(MessageResponse {
        message: "Mining cancellation requested".into(),
    }))
}
