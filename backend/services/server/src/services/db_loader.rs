use std::collections::HashMap;

use engine::types::coupon_types::Coupon;
use engine::types::draw_types::Draw;
use engine::types::store_types::{IdWatermarks, Snapshot};
use engine::types::ticket_types::TicketNumbers;
use engine::types::user_types::{Role, User};
use engine::validate_numbers;
use log::{info, warn};
use sqlx::PgPool;

use crate::models::coupon_model::{CouponDrawTable, CouponTable};
use crate::models::draw_model::DrawTable;
use crate::models::user_model::UserTable;
use crate::models::watermark_model::IdWatermarkTable;

fn stored_numbers(numbers: &[i16]) -> Result<TicketNumbers, String> {
    let widened: Vec<i64> = numbers.iter().map(|n| i64::from(*n)).collect();
    validate_numbers(&widened).map_err(|e| e.to_string())
}

fn user_from_row(row: UserTable) -> User {
    let role = row.role.parse().unwrap_or_else(|e| {
        warn!("User {} has {}, treating as user", row.id, e);
        Role::User
    });
    User {
        id: row.id as u64,
        name: row.name,
        email: row.email,
        password: row.password,
        role,
        created_at: row.created_at,
    }
}

fn draw_from_row(row: DrawTable) -> Draw {
    let winning_numbers = row.winning_numbers.as_deref().and_then(|n| {
        stored_numbers(n)
            .map_err(|e| warn!("Draw {} has invalid winning numbers: {}", row.id, e))
            .ok()
    });
    Draw {
        id: row.id as u64,
        draw_date: row.draw_date,
        winning_numbers,
        created_at: row.created_at,
    }
}

/// Reads every table into a store snapshot. Rows that break ticket rules
/// are skipped with a warning.
pub async fn load_snapshot(pool: &PgPool) -> Result<Snapshot, sqlx::Error> {
    let users: Vec<User> = sqlx::query_as::<_, UserTable>(
        "SELECT id, name, email, password, role, created_at FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(user_from_row)
    .collect();

    let draws: Vec<Draw> = sqlx::query_as::<_, DrawTable>(
        "SELECT id, draw_date, winning_numbers, created_at FROM draws ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(draw_from_row)
    .collect();

    let links = sqlx::query_as::<_, CouponDrawTable>(
        "SELECT coupon_id, draw_id FROM coupon_draws ORDER BY coupon_id, draw_id",
    )
    .fetch_all(pool)
    .await?;
    let mut draw_ids: HashMap<i64, Vec<u64>> = HashMap::new();
    for link in links {
        draw_ids
            .entry(link.coupon_id)
            .or_default()
            .push(link.draw_id as u64);
    }

    let coupons: Vec<Coupon> = sqlx::query_as::<_, CouponTable>(
        "SELECT id, user_id, numbers, created_at FROM coupons ORDER BY id",
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .filter_map(|row| match stored_numbers(&row.numbers) {
        Ok(numbers) => Some(Coupon {
            id: row.id as u64,
            user_id: row.user_id as u64,
            numbers,
            draw_ids: draw_ids.remove(&row.id).unwrap_or_default(),
            created_at: row.created_at,
        }),
        Err(e) => {
            warn!("Skipping coupon {}: {}", row.id, e);
            None
        }
    })
    .collect();

    info!(
        "Loaded {} users, {} draws and {} coupons from Postgres",
        users.len(),
        draws.len(),
        coupons.len()
    );

    let watermarks = sqlx::query_as::<_, IdWatermarkTable>(
        "SELECT entity, last_id FROM id_watermarks",
    )
    .fetch_all(pool)
    .await?;

    Ok(Snapshot {
        users,
        draws,
        coupons,
        last_ids: id_watermarks(&watermarks),
    })
}

fn id_watermarks(rows: &[IdWatermarkTable]) -> IdWatermarks {
    let mut last_ids = IdWatermarks::default();
    for row in rows {
        let last_id = u64::try_from(row.last_id).unwrap_or(0);
        match row.entity.as_str() {
            "users" => last_ids.user = last_id,
            "draws" => last_ids.draw = last_id,
            "coupons" => last_ids.coupon = last_id,
            other => warn!("Ignoring id watermark for unknown collection {}", other),
        }
    }
    last_ids
}
