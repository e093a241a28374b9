/// Fixed payout per matched-number count, in whole currency units.
pub const PRIZE_TIERS: [(u8, u64); 4] = [(3, 100), (4, 1_000), (5, 10_000), (6, 1_000_000)];

pub fn resolve_prize(matched: u8) -> u64 {
    PRIZE_TIERS
        .iter()
        .find(|(count, _)| *count == matched)
        .map(|(_, amount)| *amount)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table() {
        assert_eq!(resolve_prize(0), 0);
        assert_eq!(resolve_prize(1), 0);
        assert_eq!(resolve_prize(2), 0);
        assert_eq!(resolve_prize(3), 100);
        assert_eq!(resolve_prize(4), 1_000);
        assert_eq!(resolve_prize(5), 10_000);
        assert_eq!(resolve_prize(6), 1_000_000);
    }

    #[test]
    fn counts_beyond_a_full_ticket_pay_nothing() {
        assert_eq!(resolve_prize(7), 0);
        assert_eq!(resolve_prize(u8::MAX), 0);
    }
}
