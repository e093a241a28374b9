use std::collections::BTreeMap;

use crate::store::matching::match_numbers;
use crate::store::prize::resolve_prize;
use crate::types::coupon_types::Coupon;
use crate::types::draw_types::Draw;
use crate::types::result_types::{DrawResult, MatchStatus};

/// Builds the result sheet of a coupon, one row per attached draw, ordered
/// by draw date. Draw ids that no longer resolve are left out.
pub fn ticket_results(coupon: &Coupon, draws: &BTreeMap<u64, Draw>) -> Vec<DrawResult> {
    let mut results: Vec<DrawResult> = coupon
        .draw_ids
        .iter()
        .filter_map(|id| draws.get(id))
        .map(|draw| {
            let outcome = match_numbers(&coupon.numbers, draw.winning_numbers.as_ref());
            let prize = match outcome.status {
                MatchStatus::Pending => None,
                MatchStatus::Settled => outcome.matched.map(resolve_prize),
            };
            DrawResult {
                draw_id: draw.id,
                draw_date: draw.draw_date,
                user_numbers: coupon.numbers.clone(),
                winning_numbers: draw.winning_numbers.clone(),
                matched_numbers: outcome.matched,
                status: outcome.status,
                prize,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        a.draw_date
            .cmp(&b.draw_date)
            .then_with(|| a.draw_id.cmp(&b.draw_id))
    });
    results
}
