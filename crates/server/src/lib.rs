//! Unified Backend Server
//!
//! Combines auth/profile HTTP routes and the live game socket
//! into a single actix-web server. All realtime state lives behind
//! the [`Lobby`] task; HTTP handlers only touch the shared member
//! roster and the lobby's message handle.

mod bridge;
mod handlers;
mod lobby;
mod stats;

pub use bridge::*;
pub use handlers::*;
pub use lobby::*;
pub use stats::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use arb_auth::Roster;
use std::sync::Arc;
use tokio::sync::RwLock;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let roster = Arc::new(RwLock::new(Roster::new()));
    let crypto = web::Data::new(arb_auth::Crypto::from_env());
    let lobby = web::Data::new(Lobby::spawn(Stats::new(roster.clone())));
    let roster = web::Data::new(roster);
    log::info!("starting chess server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .app_data(crypto.clone())
            .app_data(roster.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(arb_auth::register))
                    .route("/login", web::post().to(arb_auth::login))
                    .route("/me", web::get().to(arb_auth::me)),
            )
            .route("/profile", web::get().to(arb_auth::profile))
            .route("/profile/level", web::post().to(arb_auth::set_level))
            .route("/tournament/reset", web::post().to(reset))
            .route("/ws", web::get().to(connect))
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()))?
    .run()
    .await
}
