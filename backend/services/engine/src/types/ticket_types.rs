use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::validator::validate_numbers;

pub const PICK_COUNT: usize = 6;
pub const MIN_NUMBER: i64 = 1;
pub const MAX_NUMBER: i64 = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("Exactly {PICK_COUNT} numbers are required, got {0}")]
    InvalidCount(usize),
    #[error("Number {0} is outside the range {MIN_NUMBER}-{MAX_NUMBER}")]
    OutOfRange(i64),
    #[error("Number {0} was picked more than once")]
    Duplicate(i64),
}

impl TicketError {
    pub fn kind(&self) -> &'static str {
        match self {
            TicketError::InvalidCount(_) => "invalid_count",
            TicketError::OutOfRange(_) => "out_of_range",
            TicketError::Duplicate(_) => "duplicate",
        }
    }
}

/// A validated pick: six distinct numbers from 1 to 49, kept in ascending
/// order. The only way to build one is through [`validate_numbers`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u8>")]
pub struct TicketNumbers(Vec<u8>);

impl TicketNumbers {
    pub(crate) fn from_sorted(numbers: Vec<u8>) -> Self {
        debug_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        Self(numbers)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl TryFrom<Vec<i64>> for TicketNumbers {
    type Error = TicketError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        validate_numbers(&value)
    }
}

impl From<TicketNumbers> for Vec<u8> {
    fn from(value: TicketNumbers) -> Self {
        value.0
    }
}

impl fmt::Display for TicketNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_through_the_validator() {
        let numbers: TicketNumbers = serde_json::from_str("[6, 1, 5, 2, 4, 3]").unwrap();
        assert_eq!(numbers.as_slice(), &[1, 2, 3, 4, 5, 6]);

        let err = serde_json::from_str::<TicketNumbers>("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("Exactly 6 numbers"));
    }

    #[test]
    fn displays_comma_separated() {
        let numbers = validate_numbers(&[49, 7, 13, 1, 22, 30]).unwrap();
        assert_eq!(numbers.to_string(), "1, 7, 13, 22, 30, 49");
        assert!(numbers.contains(22));
        assert!(!numbers.contains(23));
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(TicketError::InvalidCount(5).kind(), "invalid_count");
        assert_eq!(TicketError::OutOfRange(50).kind(), "out_of_range");
        assert_eq!(TicketError::Duplicate(7).kind(), "duplicate");
    }
}
