use std::collections::HashMap;

use engine::types::coupon_types::Coupon;
use engine::types::draw_types::Draw;
use engine::types::user_types::User;
use engine::LotteryStore;

use crate::error::ApiError;
use crate::types::coupon_types::CouponView;
use crate::types::draw_types::DrawSummary;
use crate::types::user_types::UserSummary;

pub fn draw_summary(draw: &Draw) -> DrawSummary {
    DrawSummary {
        id: draw.id,
        draw_date: draw.draw_date,
        winning_numbers: draw.winning_numbers.as_ref().map(|n| n.to_vec()),
    }
}

pub fn build_coupon_view(
    coupon: &Coupon,
    users: &HashMap<u64, User>,
    draws: &HashMap<u64, Draw>,
) -> CouponView {
    CouponView {
        id: coupon.id,
        user: users.get(&coupon.user_id).map(UserSummary::from),
        numbers: coupon.numbers.to_vec(),
        draws: coupon
            .draw_ids
            .iter()
            .filter_map(|id| draws.get(id))
            .map(draw_summary)
            .collect(),
        created_at: coupon.created_at,
    }
}

/// Resolves owners and draws for a batch of coupons in two store round trips.
pub async fn coupon_views(
    store: &LotteryStore,
    coupons: Vec<Coupon>,
) -> Result<Vec<CouponView>, ApiError> {
    let users: HashMap<u64, User> = store
        .list_users()
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let draws: HashMap<u64, Draw> = store
        .list_draws()
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    Ok(coupons
        .iter()
        .map(|coupon| build_coupon_view(coupon, &users, &draws))
        .collect())
}

pub async fn coupon_view(store: &LotteryStore, coupon: Coupon) -> Result<CouponView, ApiError> {
    coupon_views(store, vec![coupon])
        .await?
        .pop()
        .ok_or_else(|| ApiError::Internal("coupon view missing".into()))
}
