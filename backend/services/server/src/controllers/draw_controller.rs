use actix_web::{get, web, HttpResponse};

use crate::error::ApiError;
use crate::state::AppState;
use crate::utils::listing::{paginate, ListQuery};
use crate::utils::responses::paged_json;

#[get("/draws")]
pub async fn get_all_draws(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let draws = state.store.list_draws().await?;
    Ok(paged_json(paginate(draws, &query)))
}
