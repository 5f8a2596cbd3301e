use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::business::BusinessProfileForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::business::{load_business_profile, save_business_profile};

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (profile, form) = match load_business_profile(repo.get_ref(), &user) {
        Ok(loaded) => loaded,
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(err) => {
            log::error!("Failed to load business profile: {err}");
            FlashMessage::error("Failed to load business settings.").send();
            return redirect("/");
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "settings",
        &server_config.auth_service_url,
    );
    context.insert("profile", &profile);
    context.insert("form", &form);

    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<BusinessProfileForm>,
) -> impl Responder {
    match save_business_profile(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Business settings saved.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(ServiceError::Form(message) | ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save business profile: {err}");
            FlashMessage::error("Failed to save business settings.").send();
        }
    }
    redirect("/settings")
}
