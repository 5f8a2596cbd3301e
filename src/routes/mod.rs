//! HTTP handlers: server-rendered dashboard pages, the JSON API and the
//! public shop.

use actix_web::http::header;
use actix_web::{HttpResponse, http::StatusCode};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::dto::ApiError;
use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod api;
pub mod auth;
pub mod main;
pub mod resource;
pub mod settings;
pub mod shop;

/// Bootstrap alert class of a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Serialize)]
struct Alert {
    level: &'static str,
    message: String,
}

/// Context shared by every dashboard page.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    auth_service_url: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            level: alert_level_to_str(&message.level()),
            message: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", auth_service_url);
    context
}

/// Status code the JSON API answers a service error with.
pub fn api_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// JSON error response; internal details are logged, not returned.
pub fn api_error(err: ServiceError) -> HttpResponse {
    let status = api_status(&err);
    let message = if status.is_server_error() {
        log::error!("API request failed: {err}");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };
    HttpResponse::build(status).json(ApiError { error: message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(
            api_status(&ServiceError::Form("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            api_status(&ServiceError::Unauthorized),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(api_status(&ServiceError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            api_status(&ServiceError::Conflict("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            api_status(&ServiceError::Repository(RepositoryError::Unexpected(
                "x".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/products?pageNo=2");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/products?pageNo=2"
        );
    }
}
