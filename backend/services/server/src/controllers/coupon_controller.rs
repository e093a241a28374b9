use actix_web::{get, post, web, HttpRequest, HttpResponse};
use engine::validate_numbers;
use log::info;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::auth::AuthMiddleware;
use crate::state::AppState;
use crate::types::coupon_types::PurchaseCouponInput;
use crate::utils::jwt::extract_claims;
use crate::utils::views::coupon_view;

#[post("/coupons", wrap = "AuthMiddleware")]
pub async fn purchase_coupon(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<PurchaseCouponInput>,
) -> Result<HttpResponse, ApiError> {
    let claims = extract_claims(&req)?;
    let input = body.into_inner();
    let numbers = validate_numbers(&input.numbers)?;

    let coupon = state
        .store
        .create_coupon(claims.sub, numbers, input.draw_ids)
        .await?;
    info!(
        "User {} bought coupon {} for {} draw(s)",
        claims.sub,
        coupon.id,
        coupon.draw_ids.len()
    );

    let coupon = coupon_view(&state.store, coupon).await?;
    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "message": "Coupon purchased successfully",
        "coupon": coupon,
    })))
}

/// Per-draw results for one ticket. Owners see their own, admins see any.
#[get("/tickets/{id}/results", wrap = "AuthMiddleware")]
pub async fn get_ticket_results(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let claims = extract_claims(&req)?;
    let ticket_id = path.into_inner();

    let (coupon, results) = state.store.coupon_results(ticket_id).await?;
    if coupon.user_id != claims.sub && !claims.is_admin() {
        return Err(ApiError::Forbidden("You do not own this ticket"));
    }

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "success": true,
        "ticket_id": ticket_id,
        "results": results,
    })))
}
