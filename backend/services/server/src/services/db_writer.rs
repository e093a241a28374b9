use engine::types::db_event_types::{CouponWrittenEvent, DbEvent};
use log::{error, info, warn};
use sqlx::PgPool;
use tokio::sync::mpsc;

pub async fn start_db_event_consumer(pool: PgPool, mut rx: mpsc::UnboundedReceiver<DbEvent>) {
    info!("Starting DB event consumer");

    while let Some(event) = rx.recv().await {
        match handle_db_event(&event, &pool).await {
            Ok(_) => info!("Persisted {} event", event.name()),
            Err(e) => error!("Failed to persist {} event: {}", event.name(), e),
        }
    }

    info!("DB event consumer stopped");
}

fn db_id(id: u64) -> Result<i64, String> {
    i64::try_from(id).map_err(|_| format!("id {} exceeds i64::MAX", id))
}

fn db_numbers(numbers: &[u8]) -> Vec<i16> {
    numbers.iter().map(|n| i16::from(*n)).collect()
}

pub async fn handle_db_event(event: &DbEvent, pool: &PgPool) -> Result<(), String> {
    match event {
        DbEvent::UserCreated(e) => {
            sqlx::query(
                r#"
                INSERT INTO users (id, name, email, password, role, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(db_id(e.user_id)?)
            .bind(&e.name)
            .bind(&e.email)
            .bind(&e.password)
            .bind(&e.role)
            .bind(e.created_at)
            .execute(pool)
            .await
            .map_err(|err| format!("Failed to insert user: {}", err))?;
        }
        DbEvent::UserUpdated(e) => {
            sqlx::query("UPDATE users SET name = $2, email = $3, role = $4 WHERE id = $1")
                .bind(db_id(e.user_id)?)
                .bind(&e.name)
                .bind(&e.email)
                .bind(&e.role)
                .execute(pool)
                .await
                .map_err(|err| format!("Failed to update user: {}", err))?;
        }
        DbEvent::UserDeleted(e) => {
            // coupons and their draw links go with the user via ON DELETE CASCADE
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(db_id(e.user_id)?)
                .execute(pool)
                .await
                .map_err(|err| format!("Failed to delete user: {}", err))?;
        }
        DbEvent::DrawCreated(e) => {
            sqlx::query(
                r#"
                INSERT INTO draws (id, draw_date, winning_numbers, created_at)
                VALUES ($1, $2, NULL, $3)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(db_id(e.draw_id)?)
            .bind(e.draw_date)
            .bind(e.created_at)
            .execute(pool)
            .await
            .map_err(|err| format!("Failed to insert draw: {}", err))?;
        }
        DbEvent::DrawUpdated(e) => {
            sqlx::query("UPDATE draws SET draw_date = $2, winning_numbers = $3 WHERE id = $1")
                .bind(db_id(e.draw_id)?)
                .bind(e.draw_date)
                .bind(e.winning_numbers.as_deref().map(db_numbers))
                .execute(pool)
                .await
                .map_err(|err| format!("Failed to update draw: {}", err))?;
        }
        DbEvent::DrawDeleted(e) => {
            sqlx::query("DELETE FROM draws WHERE id = $1")
                .bind(db_id(e.draw_id)?)
                .execute(pool)
                .await
                .map_err(|err| format!("Failed to delete draw: {}", err))?;
        }
        DbEvent::CouponCreated(e) => {
            write_coupon(e, pool, true).await?;
        }
        DbEvent::CouponUpdated(e) => {
            write_coupon(e, pool, false).await?;
        }
        DbEvent::CouponDeleted(e) => {
            sqlx::query("DELETE FROM coupons WHERE id = $1")
                .bind(db_id(e.coupon_id)?)
                .execute(pool)
                .await
                .map_err(|err| format!("Failed to delete coupon: {}", err))?;
        }
    }

    if let Some((entity, id)) = created_id(event) {
        sqlx::query(
            r#"
            INSERT INTO id_watermarks (entity, last_id)
            VALUES ($1, $2)
            ON CONFLICT (entity) DO UPDATE
            SET last_id = GREATEST(id_watermarks.last_id, EXCLUDED.last_id)
            "#,
        )
        .bind(entity)
        .bind(db_id(id)?)
        .execute(pool)
        .await
        .map_err(|err| format!("Failed to advance {} id watermark: {}", entity, err))?;
    }

    Ok(())
}

/// Collection and id handed out by a create event.
fn created_id(event: &DbEvent) -> Option<(&'static str, u64)> {
    match event {
        DbEvent::UserCreated(e) => Some(("users", e.user_id)),
        DbEvent::DrawCreated(e) => Some(("draws", e.draw_id)),
        DbEvent::CouponCreated(e) => Some(("coupons", e.coupon_id)),
        _ => None,
    }
}

/// Creates or rewrites a coupon and its draw links in one transaction. An
/// update for a coupon that is already gone is a no-op.
async fn write_coupon(e: &CouponWrittenEvent, pool: &PgPool, create: bool) -> Result<(), String> {
    let coupon_id = db_id(e.coupon_id)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|err| format!("Failed to start the database transaction: {}", err))?;

    let statement = if create {
        r#"
        INSERT INTO coupons (id, user_id, numbers, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO NOTHING
        "#
    } else {
        "UPDATE coupons SET user_id = $2, numbers = $3 WHERE id = $1"
    };
    let mut query = sqlx::query(statement)
        .bind(coupon_id)
        .bind(db_id(e.user_id)?)
        .bind(db_numbers(&e.numbers));
    if create {
        query = query.bind(e.created_at);
    }
    let written = query
        .execute(&mut *tx)
        .await
        .map_err(|err| format!("Failed to write coupon: {}", err))?;

    if !create && written.rows_affected() == 0 {
        warn!("Coupon {} no longer exists, skipping update", e.coupon_id);
        return tx
            .rollback()
            .await
            .map_err(|err| format!("Failed to roll back coupon {}: {}", e.coupon_id, err));
    }

    sqlx::query("DELETE FROM coupon_draws WHERE coupon_id = $1")
        .bind(coupon_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| format!("Failed to clear coupon draws: {}", err))?;

    for draw_id in &e.draw_ids {
        sqlx::query("INSERT INTO coupon_draws (coupon_id, draw_id) VALUES ($1, $2)")
            .bind(coupon_id)
            .bind(db_id(*draw_id)?)
            .execute(&mut *tx)
            .await
            .map_err(|err| format!("Failed to link coupon {} to draw {}: {}", e.coupon_id, draw_id, err))?;
    }

    tx.commit()
        .await
        .map_err(|err| format!("Failed to commit coupon {}: {}", e.coupon_id, err))
}
