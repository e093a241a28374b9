use actix_web::{delete, get, post, put, web, HttpResponse};
use engine::types::draw_types::DrawUpdate;
use engine::validate_numbers;
use log::info;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::draw_types::{CreateDrawInput, UpdateDrawInput};

#[post("/draws")]
pub async fn admin_create_draw(
    state: web::Data<AppState>,
    body: web::Json<CreateDrawInput>,
) -> Result<HttpResponse, ApiError> {
    let draw = state.store.create_draw(body.draw_date).await?;
    info!("Scheduled draw {} for {}", draw.id, draw.draw_date);

    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "message": "Draw created successfully",
        "draw": draw,
    })))
}

#[get("/draws/{id}")]
pub async fn admin_get_draw(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let draw = state.store.get_draw(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "draw": draw,
    })))
}

/// Setting winning numbers completes the draw and settles every ticket on it.
#[put("/draws/{id}")]
pub async fn admin_update_draw(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<UpdateDrawInput>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    let winning_numbers = input
        .winning_numbers
        .as_deref()
        .map(validate_numbers)
        .transpose()?;

    let update = DrawUpdate {
        draw_date: input.draw_date,
        winning_numbers,
    };
    let draw = state.store.update_draw(path.into_inner(), update).await?;
    if draw.is_completed() {
        info!("Draw {} completed", draw.id);
    } else {
        info!("Updated draw {}", draw.id);
    }

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Draw updated successfully",
        "draw": draw,
    })))
}

#[delete("/draws/{id}")]
pub async fn admin_delete_draw(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let draw = state.store.delete_draw(path.into_inner()).await?;
    info!("Deleted draw {}", draw.id);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Draw deleted successfully",
    })))
}
