//! Sign-in handoff with the external auth service.
//!
//! The auth service issues a JWT; the dashboard stores it as the session
//! identity and decodes it on every request (see [`AuthenticatedUser`]).

use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::redirect;

#[get("/auth/signin")]
pub async fn signin(server_config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&server_config.auth_service_url)
}

#[derive(Deserialize)]
struct CallbackQuery {
    token: String,
}

/// Accepts the token handed back by the auth service.
#[get("/auth/callback")]
pub async fn callback(
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(err) = AuthenticatedUser::from_jwt(&query.token, &server_config.secret) {
        log::warn!("Rejected sign-in token: {err}");
        FlashMessage::error("Sign-in failed.").send();
        return redirect(&server_config.auth_service_url);
    }

    match Identity::login(&req.extensions(), query.token.clone()) {
        Ok(_) => redirect("/"),
        Err(err) => {
            log::error!("Failed to store identity: {err}");
            redirect(&server_config.auth_service_url)
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}
