pub mod controller;
pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "dashboard";
pub const SERVICE_ADMIN_ROLE: &str = "dashboard_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: models::config::ServerConfig) -> std::io::Result<()> {
    use std::fs;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::controller::resource::{Addresses, Banners, Brands, Categories, Products, Users};
    use crate::db::{establish_connection_pool, run_migrations};
    use crate::middleware::RedirectUnauthorized;
    use crate::repository::DieselRepository;
    use crate::routes::auth::{callback, logout, signin};
    use crate::routes::main::{index, not_assigned};
    use crate::routes::settings::{save_settings, show_settings};
    use crate::routes::shop::{shop_index, shop_product};
    use crate::routes::{api, resource};
    use crate::services::upload::UPLOADS_URL;

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let repo = DieselRepository::new(pool);

    fs::create_dir_all(&server_config.upload_dir)?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new(UPLOADS_URL, &server_config.upload_dir))
            .service(signin)
            .service(callback)
            .service(shop_index)
            .service(shop_product)
            .service(
                web::scope("/api/v1")
                    .app_data(api::json_config(api::JSON_BODY_LIMIT))
                    .service(api::upload())
                    .service(api::scope::<Users>())
                    .service(api::scope::<Products>())
                    .service(api::scope::<Categories>())
                    .service(api::scope::<Brands>())
                    .service(api::scope::<Banners>())
                    .service(api::scope::<Addresses>())
                    .route("/business", web::get().to(api::show_business))
                    .route("/business", web::put().to(api::save_business)),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(index)
                    .service(not_assigned)
                    .service(show_settings)
                    .service(save_settings)
                    .service(logout)
                    .service(resource::scope::<Users>())
                    .service(resource::scope::<Products>())
                    .service(resource::scope::<Categories>())
                    .service(resource::scope::<Brands>())
                    .service(resource::scope::<Banners>())
                    .service(resource::scope::<Addresses>()),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
