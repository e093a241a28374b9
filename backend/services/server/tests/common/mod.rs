#![allow(dead_code)]

use actix_web::web;
use chrono::{Duration, Utc};
use engine::{spawn_lottery_actor, LotteryStore};
use engine::types::user_types::{NewUser, Role};
use server::state::{AppState, JwtSettings};
use server::utils::jwt::create_jwt;

macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(server::configure),
        )
        .await
    };
}

pub fn test_state() -> web::Data<AppState> {
    state_for(spawn_lottery_actor())
}

pub fn state_for(store: LotteryStore) -> web::Data<AppState> {
    web::Data::new(
        AppState::new(
            store,
            JwtSettings {
                secret: "integration-secret".into(),
                ttl_hours: 1,
            },
        )
        .with_bcrypt_cost(4),
    )
}

/// Inserts a user straight into the store and signs a token for them.
pub async fn user_with_token(state: &web::Data<AppState>, email: &str, role: Role) -> (u64, String) {
    let user = state
        .store
        .add_user(NewUser {
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: email.to_string(),
            password: "not-a-real-hash".into(),
            role,
        })
        .await
        .unwrap();
    let token = create_jwt(user.id, role, &state.jwt).unwrap();
    (user.id, token)
}

pub async fn future_draw(state: &web::Data<AppState>, days: i64) -> u64 {
    let draw = state
        .store
        .create_draw(Utc::now() + Duration::days(days))
        .await
        .unwrap();
    draw.id
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
