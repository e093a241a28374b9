use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use crate::utils::listing::Page;

pub fn paged_json<T: Serialize>(page: Page<T>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": page.data,
        "total": page.total,
        "page": page.page,
        "per_page": page.per_page,
    }))
}
