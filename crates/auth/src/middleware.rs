use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use arb_core::ID;
use std::future::Ready;
use std::future::ready;

/// Extractor for authenticated requests.
/// Validates the bearer JWT and rejects expired tokens.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Member> {
        self.0.user()
    }
    pub fn identity(&self) -> Identity {
        self.0.identity()
    }

    /// Token validation is stateless, so extraction never awaits.
    fn extract(req: &HttpRequest) -> Result<Self, actix_web::Error> {
        let service = req.app_data::<web::Data<Crypto>>().ok_or_else(|| {
            actix_web::error::ErrorInternalServerError("token service not configured")
        })?;
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| actix_web::error::ErrorUnauthorized("missing bearer token"))?;
        let claims = service
            .decode(token)
            .map_err(|_| actix_web::error::ErrorUnauthorized("invalid token"))?;
        if claims.expired() {
            return Err(actix_web::error::ErrorUnauthorized("token expired"));
        }
        Ok(Auth(claims))
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}
