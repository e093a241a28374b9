use actix_web::{get, post, web, HttpRequest, HttpResponse};
use engine::types::store_types::StoreError;
use engine::types::user_types::{NewUser, Role};
use log::info;
use serde_json::json;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::auth::AuthMiddleware;
use crate::state::AppState;
use crate::types::auth_types::{LoginUserInput, RegisterUserInput};
use crate::types::user_types::UserView;
use crate::utils::jwt::{create_jwt, extract_claims};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::views::coupon_views;

#[post("/register")]
pub async fn register_user(
    state: web::Data<AppState>,
    req: web::Json<RegisterUserInput>,
) -> Result<HttpResponse, ApiError> {
    let input = req.into_inner().trimmed();
    input.validate()?;
    if input.password != input.password_confirmation {
        return Err(ApiError::BadRequest("Passwords do not match".into()));
    }

    let password = hash_password(input.password, state.bcrypt_cost).await?;
    let user = state
        .store
        .add_user(NewUser {
            name: input.name,
            email: input.email,
            password,
            role: Role::User,
        })
        .await?;
    info!("Registered user {} ({})", user.id, user.email);

    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "message": "User registered successfully",
        "user": UserView::from(&user),
    })))
}

#[post("/login")]
pub async fn login_user(
    state: web::Data<AppState>,
    req: web::Json<LoginUserInput>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let input = req.into_inner();

    let user = match state.store.get_user_by_email(input.email.trim()).await {
        Ok(user) => user,
        Err(StoreError::UserNotFound) => {
            return Err(ApiError::Unauthorized("Invalid email or password"))
        }
        Err(e) => return Err(e.into()),
    };

    if !verify_password(input.password, user.password.clone()).await? {
        return Err(ApiError::Unauthorized("Invalid email or password"));
    }

    let token = create_jwt(user.id, user.role, &state.jwt)?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Logged in successfully",
        "token": token,
        "user": UserView::from(&user),
    })))
}

#[post("/logout", wrap = "AuthMiddleware")]
pub async fn logout_user(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = extract_claims(&req)?;
    state.revoked.revoke(&claims.jti, claims.exp)?;
    info!("User {} logged out", claims.sub);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Logged out successfully",
    })))
}

#[get("/user", wrap = "AuthMiddleware")]
pub async fn get_current_user(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = extract_claims(&req)?;
    let user = state.store.get_user(claims.sub).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "user": UserView::from(&user),
    })))
}

#[get("/user/coupons", wrap = "AuthMiddleware")]
pub async fn get_user_coupons(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = extract_claims(&req)?;
    let coupons = state.store.list_user_coupons(claims.sub).await?;
    let coupons = coupon_views(&state.store, coupons).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "coupons": coupons,
    })))
}
