//! Public storefront. Pages are rendered without a signed-in user.

use actix_web::{HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::domain::business::BusinessProfile;
use crate::domain::types::CurrencyCode;
use crate::dto::ListQueryParams;
use crate::repository::DieselRepository;
use crate::routes::render_template;
use crate::services::ServiceError;
use crate::services::shop::{load_shop_page, load_shop_product};

fn shop_failure(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().finish()
        }
        err => {
            log::error!("Failed to render shop page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by both shop pages.
fn shop_context(profile: Option<&BusinessProfile>) -> Context {
    let currency = profile.map_or_else(CurrencyCode::default, |profile| profile.currency.clone());

    let mut context = Context::new();
    context.insert("currency", &currency.to_string());
    context
}

#[get("/shop/{business_id}")]
pub async fn shop_index(
    business_id: web::Path<i32>,
    query: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let business_id = business_id.into_inner();
    let params = match query.to_fetch_params() {
        Ok(params) => params,
        Err(err) => return shop_failure(err.into()),
    };

    let data = match load_shop_page(repo.get_ref(), business_id, &params) {
        Ok(data) => data,
        Err(err) => return shop_failure(err),
    };

    let pages: Vec<Option<(usize, String)>> = data
        .products
        .pages()
        .into_iter()
        .map(|number| {
            number.map(|number| {
                let query = ListQueryParams::from_fetch_params(&params).with_page(number);
                (number, format!("/shop/{business_id}?{}", query.query_string()))
            })
        })
        .collect();

    let mut context = shop_context(data.profile.as_ref());
    context.insert("shop", &data);
    context.insert("pages", &pages);
    context.insert("search_query", &params.search);

    render_template(&tera, "shop/index.html", &context)
}

#[get("/shop/{business_id}/product/{product_id}")]
pub async fn shop_product(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (business_id, product_id) = path.into_inner();

    match load_shop_product(repo.get_ref(), business_id, product_id) {
        Ok(data) => {
            let mut context = shop_context(data.profile.as_ref());
            context.insert("shop", &data);
            render_template(&tera, "shop/product.html", &context)
        }
        Err(err) => shop_failure(err),
    }
}
