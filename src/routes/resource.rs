//! Server-rendered list pages shared by every managed table.
//!
//! Each handler is generic over an [`Entity`]; [`scope`] mounts the full set
//! under `/<slug>`. Mutations redirect back to the list with the same
//! filters and report the outcome as a flash message.

use actix_web::http::header;
use actix_web::{HttpResponse, Scope, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Serialize;
use tera::{Context, Tera};

use crate::controller::modal::{DraftForm, FieldError};
use crate::controller::resource::Entity;
use crate::domain::Record;
use crate::domain::types::EntityStatus;
use crate::dto::table::{TableColumn, TableRecord, TableRow};
use crate::dto::{DeleteForm, ListQueryParams};
use crate::forms::FormError;
use crate::forms::status::StatusForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::{ListPage, PAGE_SIZE_OPTIONS, page_after_delete};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;

/// Mounts the list page, modal bodies, mutations and export of `E`.
pub fn scope<E: Entity>() -> Scope {
    web::scope(&format!("/{}", E::SLUG))
        .route("", web::get().to(index::<E>))
        .route("/modal", web::get().to(new_modal::<E>))
        .route("/export", web::get().to(export::<E>))
        .route("/add", web::post().to(add::<E>))
        .route("/{id}/modal", web::get().to(edit_modal::<E>))
        .route("/{id}/detail", web::get().to(detail::<E>))
        .route("/{id}/save", web::post().to(save::<E>))
        .route("/{id}/status", web::post().to(set_status::<E>))
        .route("/{id}/delete", web::post().to(delete::<E>))
}

#[derive(Serialize)]
struct ResourceMeta {
    slug: &'static str,
    label: &'static str,
    title: &'static str,
}

fn meta<E: Entity>() -> ResourceMeta {
    ResourceMeta {
        slug: E::SLUG,
        label: E::LABEL,
        title: E::TITLE,
    }
}

#[derive(Serialize)]
struct PageLink {
    number: usize,
    url: String,
    current: bool,
}

fn list_url<E: Entity>(query: &ListQueryParams) -> String {
    let query_string = query.query_string();
    if query_string.is_empty() {
        format!("/{}", E::SLUG)
    } else {
        format!("/{}?{query_string}", E::SLUG)
    }
}

/// Flashes the failure and picks where to send the user.
fn failure<E: Entity>(err: ServiceError, action: &str, back: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        ServiceError::NotFound => {
            FlashMessage::error(format!("{} not found.", E::LABEL)).send();
        }
        ServiceError::Form(message)
        | ServiceError::TypeConstraint(message)
        | ServiceError::Conflict(message) => {
            FlashMessage::error(message).send();
        }
        err => {
            log::error!("Failed to {action} {}: {err}", E::LABEL.to_lowercase());
            FlashMessage::error(format!(
                "Failed to {action} {}.",
                E::LABEL.to_lowercase()
            ))
            .send();
        }
    }
    redirect(back)
}

async fn index<E: Entity>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let params = match query.to_fetch_params() {
        Ok(params) => params,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&format!("/{}", E::SLUG));
        }
    };

    let page = match E::list(repo.get_ref(), &user, &params) {
        Ok(page) => page,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(err) => {
            log::error!("Failed to list {}: {err}", E::SLUG);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let filter = ListQueryParams::from_fetch_params(&params);
    let pages: Vec<Option<PageLink>> = page
        .pages()
        .into_iter()
        .map(|number| {
            number.map(|number| PageLink {
                number,
                url: list_url::<E>(&filter.with_page(number)),
                current: number == page.page_no,
            })
        })
        .collect();
    let previous_url = page
        .has_previous
        .then(|| list_url::<E>(&filter.with_page(page.page_no - 1)));
    let next_url = page
        .has_next
        .then(|| list_url::<E>(&filter.with_page(page.page_no + 1)));
    let columns: Vec<TableColumn> = E::Record::columns();
    let rows: ListPage<TableRow> = page.map(|record| record.to_row());

    let mut context = base_context(
        &flash_messages,
        &user,
        E::SLUG,
        &server_config.auth_service_url,
    );
    context.insert("resource", &meta::<E>());
    context.insert("columns", &columns);
    context.insert("page", &rows);
    context.insert("pages", &pages);
    context.insert("previous_url", &previous_url);
    context.insert("next_url", &next_url);
    context.insert("search_query", &params.search);
    context.insert("status_filter", &params.status);
    context.insert("page_size", &params.page_size.get());
    context.insert("page_sizes", &PAGE_SIZE_OPTIONS);
    context.insert("statuses", &[EntityStatus::Active, EntityStatus::Inactive]);
    context.insert("query_string", &filter.query_string());

    render_template(&tera, "resource/index.html", &context)
}

fn modal_response<E: Entity>(
    repo: &DieselRepository,
    user: &AuthenticatedUser,
    tera: &Tera,
    form: &E::Form,
    action: String,
) -> HttpResponse {
    let mut context = Context::new();
    context.insert("resource", &meta::<E>());
    context.insert("form", form);
    context.insert("action", &action);

    match E::extend_modal(repo, user, &mut context) {
        Ok(()) => render_template(tera, &format!("{}/modal_body.html", E::SLUG), &context),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to load {} modal: {err}", E::SLUG);
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn new_modal<E: Entity>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let action = format!("/{}/add?{}", E::SLUG, query.query_string());
    modal_response::<E>(repo.get_ref(), &user, &tera, &E::Form::default(), action)
}

async fn edit_modal<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let id = id.into_inner();
    match E::get(repo.get_ref(), &user, id) {
        Ok(record) => {
            let action = format!("/{}/{id}/save?{}", E::SLUG, query.query_string());
            modal_response::<E>(
                repo.get_ref(),
                &user,
                &tera,
                &E::Form::from_record(&record),
                action,
            )
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load {} {id}: {err}", E::LABEL.to_lowercase());
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Read-only modal body for one record.
async fn detail<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let id = id.into_inner();
    match E::get(repo.get_ref(), &user, id) {
        Ok(record) => {
            let mut context = Context::new();
            context.insert("resource", &meta::<E>());
            context.insert("status", &record.status());
            context.insert("image_url", &record.image_url());
            context.insert("sections", &record.details());
            render_template(&tera, "resource/detail.html", &context)
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load {} {id}: {err}", E::LABEL.to_lowercase());
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flashes the first invalid field of a rejected draft.
fn invalid_form<E: Entity>(err: &FormError, back: &str) -> HttpResponse {
    let field = FieldError::new(err, E::Form::FIELDS);
    let message = match field.field {
        Some(name) => format!("{name}: {}", field.message),
        None => field.message,
    };
    FlashMessage::error(message).send();
    redirect(back)
}

async fn add<E: Entity>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    web::Form(form): web::Form<E::Form>,
) -> HttpResponse {
    let back = list_url::<E>(&query);

    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(err) => return invalid_form::<E>(&err, &back),
    };

    match E::create(repo.get_ref(), &user, payload) {
        Ok(_) => {
            FlashMessage::success(format!("{} created.", E::LABEL)).send();
            redirect(&back)
        }
        Err(err) => failure::<E>(err, "create", &back),
    }
}

async fn save<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    web::Form(form): web::Form<E::Form>,
) -> HttpResponse {
    let back = list_url::<E>(&query);

    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(err) => return invalid_form::<E>(&err, &back),
    };

    match E::update(repo.get_ref(), &user, id.into_inner(), payload) {
        Ok(_) => {
            FlashMessage::success(format!("{} updated.", E::LABEL)).send();
            redirect(&back)
        }
        Err(err) => failure::<E>(err, "update", &back),
    }
}

async fn set_status<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    web::Form(form): web::Form<StatusForm>,
) -> HttpResponse {
    let back = list_url::<E>(&query);

    let status = match EntityStatus::try_from(form) {
        Ok(status) => status,
        Err(err) => return invalid_form::<E>(&err, &back),
    };

    match E::set_status(repo.get_ref(), &user, id.into_inner(), status) {
        Ok(_) => {
            let verb = if status.is_active() { "enabled" } else { "disabled" };
            FlashMessage::success(format!("{} {verb}.", E::LABEL)).send();
            redirect(&back)
        }
        Err(err) => failure::<E>(err, "change the status of", &back),
    }
}

async fn delete<E: Entity>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
    web::Form(form): web::Form<DeleteForm>,
) -> HttpResponse {
    let query = query.into_inner();

    match E::delete(repo.get_ref(), &user, id.into_inner()) {
        Ok(()) => {
            FlashMessage::success(format!("{} deleted.", E::LABEL)).send();
            let page_no = query.page_no.unwrap_or(1);
            let target = match form
                .items_on_page
                .and_then(|items| page_after_delete(page_no, items))
            {
                Some(previous) => query.with_page(previous),
                None => query,
            };
            redirect(&list_url::<E>(&target))
        }
        Err(err) => failure::<E>(err, "delete", &list_url::<E>(&query)),
    }
}

async fn export<E: Entity>(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListQueryParams>,
) -> HttpResponse {
    let back = format!("/{}", E::SLUG);
    let params = match query.to_fetch_params() {
        Ok(params) => params,
        Err(err) => return invalid_form::<E>(&err, &back),
    };

    match E::export(repo.get_ref(), &user, &params) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.csv\"", E::SLUG),
            ))
            .body(csv),
        Err(err) => failure::<E>(err, "export", &back),
    }
}
