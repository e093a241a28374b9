use actix_web::{delete, get, put, web, HttpRequest, HttpResponse};
use log::info;
use serde_json::json;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::user_types::{UpdateUserInput, UserView};
use crate::utils::jwt::extract_claims;
use crate::utils::listing::{paginate, ListQuery};
use crate::utils::responses::paged_json;

#[get("/users")]
pub async fn admin_list_users(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let users: Vec<UserView> = state
        .store
        .list_users()
        .await?
        .iter()
        .map(UserView::from)
        .collect();
    Ok(paged_json(paginate(users, &query)))
}

#[get("/users/{id}")]
pub async fn admin_get_user(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let user = state.store.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "user": UserView::from(&user),
    })))
}

#[put("/users/{id}")]
pub async fn admin_update_user(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<UpdateUserInput>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner().trimmed();
    input.validate()?;
    let user = state
        .store
        .update_user(path.into_inner(), input.into())
        .await?;
    info!("Updated user {}", user.id);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "User updated successfully",
        "user": UserView::from(&user),
    })))
}

#[delete("/users/{id}")]
pub async fn admin_delete_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let claims = extract_claims(&req)?;
    let user_id = path.into_inner();
    if user_id == claims.sub {
        return Err(ApiError::BadRequest(
            "Administrators cannot delete their own account".into(),
        ));
    }

    let user = state.store.delete_user(user_id).await?;
    info!("Deleted user {} and their coupons", user.id);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "User deleted successfully",
    })))
}
