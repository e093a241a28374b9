use actix_web::{delete, get, put, web, HttpResponse};
use engine::types::coupon_types::CouponUpdate;
use engine::validate_numbers;
use log::info;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::coupon_types::UpdateCouponInput;
use crate::utils::listing::{paginate, ListQuery};
use crate::utils::responses::paged_json;
use crate::utils::views::{coupon_view, coupon_views};

#[get("/coupons")]
pub async fn admin_list_coupons(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let coupons = state.store.list_coupons().await?;
    let coupons = coupon_views(&state.store, coupons).await?;
    Ok(paged_json(paginate(coupons, &query)))
}

#[get("/coupons/{id}")]
pub async fn admin_get_coupon(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let coupon = state.store.get_coupon(path.into_inner()).await?;
    let coupon = coupon_view(&state.store, coupon).await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "coupon": coupon,
    })))
}

#[put("/coupons/{id}")]
pub async fn admin_update_coupon(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<UpdateCouponInput>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    let numbers = input
        .numbers
        .as_deref()
        .map(validate_numbers)
        .transpose()?;

    let update = CouponUpdate {
        numbers,
        user_id: input.user_id,
        draw_ids: input.draw_ids,
    };
    let coupon = state.store.update_coupon(path.into_inner(), update).await?;
    info!("Updated coupon {}", coupon.id);

    let coupon = coupon_view(&state.store, coupon).await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Coupon updated successfully",
        "coupon": coupon,
    })))
}

#[delete("/coupons/{id}")]
pub async fn admin_delete_coupon(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let coupon = state.store.delete_coupon(path.into_inner()).await?;
    info!("Deleted coupon {}", coupon.id);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Coupon deleted successfully",
    })))
}
