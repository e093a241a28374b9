use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use engine::LotteryStore;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Token ids invalidated by logout, kept until the token would have expired
/// anyway. Lives in memory only.
#[derive(Clone, Default)]
pub struct RevokedTokens {
    inner: Arc<RwLock<HashMap<String, usize>>>,
}

fn now_secs() -> usize {
    Utc::now().timestamp().max(0) as usize
}

impl RevokedTokens {
    /// Revokes `jti` until `exp` (seconds since the epoch) and forgets every
    /// entry that has already expired.
    pub fn revoke(&self, jti: &str, exp: usize) -> Result<(), ApiError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| ApiError::Internal("revocation list poisoned".into()))?;
        let now = now_secs();
        guard.retain(|_, expires| *expires > now);
        guard.insert(jti.to_string(), exp);
        Ok(())
    }

    pub fn is_revoked(&self, jti: &str) -> Result<bool, ApiError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApiError::Internal("revocation list poisoned".into()))?;
        Ok(guard.get(jti).is_some_and(|exp| *exp > now_secs()))
    }

    pub fn tracked(&self) -> Result<usize, ApiError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApiError::Internal("revocation list poisoned".into()))?;
        Ok(guard.len())
    }
}

pub struct AppState {
    pub store: LotteryStore,
    pub jwt: JwtSettings,
    pub revoked: RevokedTokens,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: LotteryStore, jwt: JwtSettings) -> Self {
        Self {
            store,
            jwt,
            revoked: RevokedTokens::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
