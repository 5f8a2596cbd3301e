//! Identity carried in the session cookie.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims of the JWT issued by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub business_id: i32,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| error::ErrorInternalServerError("Server config is not registered"))?;

    let token = req
        .get_identity()
        .map_err(|_| error::ErrorUnauthorized("Not signed in"))?
        .id()
        .map_err(|_| error::ErrorUnauthorized("Not signed in"))?;

    AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected identity token: {err}");
        error::ErrorUnauthorized("Invalid identity token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
