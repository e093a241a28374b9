use actix_web::web;

use crate::error::ApiError;

/// bcrypt is slow on purpose; both helpers run on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    web::block(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("failed to verify password: {e}")))
}
