//! REST API for the lotto backend: registration and login, coupon purchase,
//! ticket results and the admin panel, on top of the engine's lottery store.

pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;

use actix_web::{web, HttpResponse, Responder};

use crate::controllers::admin_coupon_controller::{
    admin_delete_coupon, admin_get_coupon, admin_list_coupons, admin_update_coupon,
};
use crate::controllers::admin_draw_controller::{
    admin_create_draw, admin_delete_draw, admin_get_draw, admin_update_draw,
};
use crate::controllers::admin_user_controller::{
    admin_delete_user, admin_get_user, admin_list_users, admin_update_user,
};
use crate::controllers::coupon_controller::{get_ticket_results, purchase_coupon};
use crate::controllers::draw_controller::get_all_draws;
use crate::controllers::user_controller::{
    get_current_user, get_user_coupons, login_user, logout_user, register_user,
};
use crate::error::ApiError;
use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"status": "Ok"}"#)
}

/// Registers every route. Signed-in routes carry `AuthMiddleware` on the
/// resource itself; the admin scope wraps both middlewares. Unknown paths
/// fall through to the default 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    let admin_scope = web::scope("/admin")
        .wrap(AdminMiddleware)
        .wrap(AuthMiddleware)
        .service(admin_list_users)
        .service(admin_get_user)
        .service(admin_update_user)
        .service(admin_delete_user)
        .service(admin_list_coupons)
        .service(admin_get_coupon)
        .service(admin_update_coupon)
        .service(admin_delete_coupon)
        .service(admin_create_draw)
        .service(admin_get_draw)
        .service(admin_update_draw)
        .service(admin_delete_draw);

    cfg.app_data(json_config)
        .app_data(query_config)
        .route("/health", web::get().to(health))
        .service(register_user)
        .service(login_user)
        .service(get_all_draws)
        .service(logout_user)
        .service(get_current_user)
        .service(get_user_coupons)
        .service(purchase_coupon)
        .service(get_ticket_results)
        .service(admin_scope);
}
