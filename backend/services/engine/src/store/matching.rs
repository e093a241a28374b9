use crate::types::result_types::MatchOutcome;
use crate::types::ticket_types::TicketNumbers;

/// Counts how many of the ticket's numbers were drawn.
///
/// A draw that has not happened yet has no winning numbers and yields a
/// pending outcome; that is a normal case, not an error.
pub fn match_numbers(ticket: &TicketNumbers, winning: Option<&TicketNumbers>) -> MatchOutcome {
    let Some(winning) = winning else {
        return MatchOutcome::pending();
    };

    let matched = ticket.iter().filter(|n| winning.contains(*n)).count();
    MatchOutcome::settled(matched as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::validator::validate_numbers;
    use crate::types::result_types::MatchStatus;

    fn pick(numbers: [i64; 6]) -> TicketNumbers {
        validate_numbers(&numbers).unwrap()
    }

    #[test]
    fn counts_the_intersection() {
        let ticket = pick([1, 2, 3, 4, 5, 6]);
        let winning = pick([4, 5, 6, 7, 8, 9]);
        let outcome = match_numbers(&ticket, Some(&winning));
        assert_eq!(outcome.status, MatchStatus::Settled);
        assert_eq!(outcome.matched, Some(3));
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = pick([6, 5, 4, 3, 2, 1]);
        let b = pick([9, 4, 8, 5, 7, 6]);
        assert_eq!(match_numbers(&a, Some(&b)), match_numbers(&b, Some(&a)));
        assert_eq!(match_numbers(&a, Some(&b)).matched, Some(3));
    }

    #[test]
    fn no_overlap_and_full_overlap() {
        let ticket = pick([1, 2, 3, 4, 5, 6]);
        assert_eq!(
            match_numbers(&ticket, Some(&pick([10, 11, 12, 13, 14, 15]))).matched,
            Some(0)
        );
        assert_eq!(match_numbers(&ticket, Some(&ticket)).matched, Some(6));
    }

    #[test]
    fn missing_winning_numbers_is_pending() {
        for ticket in [pick([1, 2, 3, 4, 5, 6]), pick([44, 45, 46, 47, 48, 49])] {
            let outcome = match_numbers(&ticket, None);
            assert_eq!(outcome, MatchOutcome::pending());
            assert_eq!(outcome.matched, None);
        }
    }
}
