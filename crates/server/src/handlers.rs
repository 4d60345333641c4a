use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;

/// Upgrades an authenticated client onto the game socket. The token rides
/// the query string because browsers cannot set headers on a WebSocket
/// handshake; a bad or missing one refuses the connection before the
/// lobby hears anything about it.
pub async fn connect(
    lobby: web::Data<LobbyHandle>,
    tokens: web::Data<arb_auth::Crypto>,
    query: web::Query<std::collections::HashMap<String, String>>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let identity = query
        .get("token")
        .and_then(|t| tokens.decode(t).ok())
        .filter(|c| !c.expired())
        .map(|c| c.identity());
    let Some(identity) = identity else {
        log::info!("refusing unauthenticated socket");
        return HttpResponse::Unauthorized()
            .body("missing or invalid token")
            .map_into_right_body();
    };
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            match Bridge::spawn(&lobby, identity, session, stream) {
                Ok(()) => response.map_into_left_body(),
                Err(e) => HttpResponse::InternalServerError()
                    .body(e.to_string())
                    .map_into_right_body(),
            }
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}

/// Replaces the open tournament with a fresh one.
pub async fn reset(lobby: web::Data<LobbyHandle>) -> impl Responder {
    match lobby.reset() {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "reset" })),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
