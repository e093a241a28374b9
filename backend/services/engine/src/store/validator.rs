use crate::types::ticket_types::{TicketError, TicketNumbers, MAX_NUMBER, MIN_NUMBER, PICK_COUNT};

/// Checks a candidate pick against the game rules.
///
/// Count is checked first, then range, then uniqueness; the first failure
/// wins. On success the numbers come back sorted.
pub fn validate_numbers(candidate: &[i64]) -> Result<TicketNumbers, TicketError> {
    if candidate.len() != PICK_COUNT {
        return Err(TicketError::InvalidCount(candidate.len()));
    }

    if let Some(&number) = candidate
        .iter()
        .find(|n| !(MIN_NUMBER..=MAX_NUMBER).contains(*n))
    {
        return Err(TicketError::OutOfRange(number));
    }

    let mut seen = [false; MAX_NUMBER as usize + 1];
    let mut numbers = Vec::with_capacity(PICK_COUNT);
    for &number in candidate {
        let slot = number as usize;
        if seen[slot] {
            return Err(TicketError::Duplicate(number));
        }
        seen[slot] = true;
        numbers.push(number as u8);
    }

    numbers.sort_unstable();
    Ok(TicketNumbers::from_sorted(numbers))
}
