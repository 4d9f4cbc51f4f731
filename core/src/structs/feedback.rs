#[cfg(feature = "terminal")]
use colored::Colorize;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::word::WORD_LENGTH;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("\"{0}\" is not a non-negative integer feedback code")]
    Malformed(String),
    #[error("feedback code \"{input}\" contains digit {digit}, only 0, 1 and 2 are allowed")]
    InvalidDigit { input: String, digit: u32 },
    #[error("feedback code \"{0}\" has more than 5 digits")]
    TooLong(String),
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hint {
    Wrong,
    OutOfPlace,
    Correct,
}

impl Hint {
    pub fn digit(self) -> u16 {
        match self {
            Hint::Wrong => 0,
            Hint::OutOfPlace => 1,
            Hint::Correct => 2,
        }
    }

    fn from_digit(digit: u16) -> Option<Self> {
        match digit {
            0 => Some(Hint::Wrong),
            1 => Some(Hint::OutOfPlace),
            2 => Some(Hint::Correct),
            _ => None,
        }
    }
}

/// Feedback for a whole guess: five decimal digits, each 0 (absent),
/// 1 (present elsewhere) or 2 (exact). The leftmost letter is the most
/// significant digit, so `22222` means solved.
#[derive(
    Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct FeedbackCode(u16);

pub const WEIGHTS: [u16; WORD_LENGTH] = [10000, 1000, 100, 10, 1];

impl FeedbackCode {
    pub const SOLVED: Self = Self(22222);

    /// Number of distinct codes, 3^5.
    pub const COUNT: usize = 243;

    pub(crate) const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn is_solved(self) -> bool {
        self == Self::SOLVED
    }

    pub fn from_hints(hints: [Hint; WORD_LENGTH]) -> Self {
        Self(
            hints
                .iter()
                .zip(WEIGHTS)
                .map(|(h, weight)| h.digit() * weight)
                .sum(),
        )
    }

    pub fn hints(self) -> [Hint; WORD_LENGTH] {
        let mut hints = [Hint::Wrong; WORD_LENGTH];
        for (hint, weight) in hints.iter_mut().zip(WEIGHTS) {
            // codes are only ever built from valid digits
            *hint = Hint::from_digit(self.0 / weight % 10).unwrap_or(Hint::Wrong);
        }
        hints
    }

    /// Dense base-3 index in `0..COUNT`, used to count buckets without hashing.
    pub fn to_ind(self) -> usize {
        WEIGHTS
            .iter()
            .fold(0, |ind, &weight| ind * 3 + (self.0 / weight % 10) as usize)
    }

    pub fn from_ind(ind: usize) -> Self {
        let mut ind = ind;
        let mut raw = 0;
        for weight in WEIGHTS.iter().rev() {
            raw += (ind % 3) as u16 * weight;
            ind /= 3;
        }
        Self(raw)
    }

    #[cfg(feature = "terminal")]
    pub fn squares(self) -> String {
        self.hints()
            .iter()
            .map(|hint| match hint {
                Hint::Wrong => "■".red().to_string(),
                Hint::OutOfPlace => "■".yellow().to_string(),
                Hint::Correct => "■".green().to_string(),
            })
            .collect()
    }

    #[cfg(not(feature = "terminal"))]
    pub fn squares(self) -> String {
        self.hints()
            .iter()
            .map(|hint| match hint {
                Hint::Wrong => 'W',
                Hint::OutOfPlace => 'O',
                Hint::Correct => 'C',
            })
            .collect()
    }
}

impl fmt::Display for FeedbackCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl FromStr for FeedbackCode {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(FeedbackError::Malformed(s.to_string()));
        }

        if s.len() > WORD_LENGTH {
            return Err(FeedbackError::TooLong(s.to_string()));
        }

        let mut raw = 0;
        for c in s.chars() {
            let digit = c.to_digit(10).unwrap_or_default();
            if digit > 2 {
                return Err(FeedbackError::InvalidDigit {
                    input: s.to_string(),
                    digit,
                });
            }
            raw = raw * 10 + digit as u16;
        }

        Ok(Self(raw))
    }
}

impl TryFrom<u16> for FeedbackCode {
    type Error = FeedbackError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        let mut rest = raw;
        for _ in 0..WORD_LENGTH {
            let digit = rest % 10;
            if digit > 2 {
                return Err(FeedbackError::InvalidDigit {
                    input: raw.to_string(),
                    digit: digit.into(),
                });
            }
            rest /= 10;
        }
        if rest > 0 {
            return Err(FeedbackError::TooLong(raw.to_string()));
        }
        Ok(Self(raw))
    }
}

impl From<FeedbackCode> for u16 {
    fn from(code: FeedbackCode) -> Self {
        code.0
    }
}

impl From<[Hint; WORD_LENGTH]> for FeedbackCode {
    fn from(hints: [Hint; WORD_LENGTH]) -> Self {
        Self::from_hints(hints)
    }
}
