use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;
use tokio::sync::RwLock;

pub async fn register(
    roster: web::Data<Arc<RwLock<Roster>>>,
    tokens: web::Data<Crypto>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if req.username.len() < 3 || req.username.len() > 32 {
        return HttpResponse::BadRequest().body("username must be 3-32 characters");
    }
    if req.password.len() < 8 {
        return HttpResponse::BadRequest().body("password must be at least 8 characters");
    }
    let hashword = match password::hash(&req.password) {
        Ok(h) => h,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    let identity = match roster.write().await.create(&req.username, hashword) {
        Ok(identity) => identity,
        Err(RosterError::Taken(_)) => {
            return HttpResponse::Conflict().body("username already exists");
        }
    };
    let claims = Claims::new(identity.id, identity.username.clone());
    let token = match tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserInfo {
            id: identity.id.to_string(),
            username: identity.username,
        },
    })
}

pub async fn login(
    roster: web::Data<Arc<RwLock<Roster>>>,
    tokens: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    let identity = match roster.read().await.authenticate(&req.username, &req.password) {
        Some(identity) => identity,
        None => return HttpResponse::Unauthorized().body("invalid credentials"),
    };
    let claims = Claims::new(identity.id, identity.username.clone());
    let token = match tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserInfo {
            id: identity.id.to_string(),
            username: identity.username,
        },
    })
}

pub async fn me(auth: Auth) -> impl Responder {
    HttpResponse::Ok().json(UserInfo {
        id: auth.user().to_string(),
        username: auth.claims().username().to_string(),
    })
}

pub async fn profile(roster: web::Data<Arc<RwLock<Roster>>>, auth: Auth) -> impl Responder {
    match roster.read().await.get(auth.user()) {
        Some(member) => HttpResponse::Ok().json(ProfileResponse::from(member)),
        None => HttpResponse::NotFound().body("user not found"),
    }
}

pub async fn set_level(
    roster: web::Data<Arc<RwLock<Roster>>>,
    auth: Auth,
    req: web::Json<LevelRequest>,
) -> impl Responder {
    let level: SkillLevel = match req.level.parse() {
        Ok(level) => level,
        Err(()) => return HttpResponse::BadRequest().body("invalid level"),
    };
    match roster.write().await.set_level(auth.user(), level) {
        true => HttpResponse::Ok().json(serde_json::json!({"status": "updated", "level": level})),
        false => HttpResponse::NotFound().body("user not found"),
    }
}
