//! JSON API under `/api/v1`.
//!
//! Request and response bodies use camelCase. The business is always taken
//! from the signed-in identity.

use std::path::Path;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Resource, Scope, web};

use crate::controller::modal::DraftForm;
use crate::controller::resource::Entity;
use crate::domain::types::EntityStatus;
use crate::dto::{ApiError, ListQueryParams, UploadResponse};
use crate::forms::business::BusinessProfileForm;
use crate::forms::status::StatusForm;
use crate::forms::upload::{MAX_UPLOAD_BYTES, UploadImageForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api_error;
use crate::services::business as business_service;
use crate::services::upload as upload_service;

/// Mounts the list, create, update, status and delete endpoints of `E`.
pub fn scope<E: Entity>() -> Scope {
    web::scope(&format!("/{}", E::SLUG))
        .route("", web::get().to(list::<E>))
        .route("", web::post().to(create::<E>))
        .route("/{id}", web::get().to(show::<E>))
        .route("/{id}", web::put().to(update::<E>))
        .route("/{id}", web::delete().to(delete::<E>))
        .route("/{id}/status", web::put().to(set_status::<E>))
}

async fn list<E: Entity>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
) -> HttpResponse {
    let params = match query.to_fetch_params() {
        Ok(params) => params,
        Err(err) => return api_error(err.into()),
    };

    match E::list(repo.get_ref(), &user, &params) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => api_error(err),
    }
}

async fn show<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match E::get(repo.get_ref(), &user, id.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => api_error(err),
    }
}

async fn create<E: Entity>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<E::Form>,
) -> HttpResponse {
    let result = form
        .into_payload()
        .map_err(Into::into)
        .and_then(|payload| E::create(repo.get_ref(), &user, payload));

    match result {
        Ok(record) => HttpResponse::Created().json(record),
        Err(err) => api_error(err),
    }
}

async fn update<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<E::Form>,
) -> HttpResponse {
    let result = form
        .into_payload()
        .map_err(Into::into)
        .and_then(|payload| E::update(repo.get_ref(), &user, id.into_inner(), payload));

    match result {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => api_error(err),
    }
}

async fn set_status<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<StatusForm>,
) -> HttpResponse {
    let result = EntityStatus::try_from(form)
        .map_err(Into::into)
        .and_then(|status| E::set_status(repo.get_ref(), &user, id.into_inner(), status));

    match result {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => api_error(err),
    }
}

async fn delete<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match E::delete(repo.get_ref(), &user, id.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(true),
        Err(err) => api_error(err),
    }
}

/// Accepts `{base64, type}` and answers `{imageUrl}`.
/// Default body limit of JSON API requests.
pub const JSON_BODY_LIMIT: usize = 256 * 1024;

/// Upload bodies carry the image base64-encoded plus the JSON envelope.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES.div_ceil(3) * 4 + 64 * 1024;

/// JSON extractor settings whose rejections use the `{"error"}` body.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let status = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                _ => StatusCode::BAD_REQUEST,
            };
            let response = HttpResponse::build(status).json(ApiError {
                error: err.to_string(),
            });
            InternalError::from_response(err, response).into()
        })
}

/// `POST /upload`, with a body limit large enough for a full-size image.
pub fn upload() -> Resource {
    web::resource("/upload")
        .app_data(json_config(UPLOAD_BODY_LIMIT))
        .route(web::post().to(upload_image))
}

pub async fn upload_image(
    user: AuthenticatedUser,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<UploadImageForm>,
) -> HttpResponse {
    match upload_service::upload_image(&user, form, Path::new(&server_config.upload_dir)) {
        Ok(image_url) => HttpResponse::Ok().json(UploadResponse { image_url }),
        Err(err) => api_error(err),
    }
}

pub async fn show_business(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match business_service::load_business_profile(repo.get_ref(), &user) {
        Ok((Some(profile), _)) => HttpResponse::Ok().json(profile),
        Ok((None, _)) => HttpResponse::NotFound().json(ApiError {
            error: "business profile is not set up".to_string(),
        }),
        Err(err) => api_error(err),
    }
}

pub async fn save_business(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<BusinessProfileForm>,
) -> HttpResponse {
    match business_service::save_business_profile(repo.get_ref(), &user, form) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => api_error(err),
    }
}
