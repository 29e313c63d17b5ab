mod api;
mod blockchain;
mod config;
mod error;
mod transaction;
mod wallet;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = AppConfig::from_env();
    info!(
        "⛓️ Starting ledger API at http://{}:{} (mine difficulty {}, validation difficulty {})",
        config.host, config.port, config.default_difficulty, config.ledger.validation_difficulty
    );

    let state = web::Data::new(AppState::new(
        config.ledger.clone(),
        config.default_difficulty,
    ));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
