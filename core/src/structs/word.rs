use core::fmt;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use thiserror::Error;

pub const WORD_LENGTH: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("Expected word of length: {expected_length}. Found word \"{word}\" of length {}", word.chars().count())]
    IncorrectLength {
        word: String,
        expected_length: usize,
    },
    #[error("Word \"{word}\" contains '{character}', only lowercase ascii letters are allowed")]
    InvalidCharacter { word: String, character: char },
}

/// A five letter lowercase word, stored as ascii bytes.
#[derive(
    Copy, Clone, Debug, SerializeDisplay, DeserializeFromStr, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Word(pub [u8; WORD_LENGTH]);

impl Word {
    pub fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.0.iter() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Word {
    type Error = WordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if let Some(character) = value.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacter {
                word: value.to_string(),
                character,
            });
        }

        let array = value
            .as_bytes()
            .to_vec()
            .try_into()
            .map_err(|_: Vec<_>| WordError::IncorrectLength {
                word: value.to_string(),
                expected_length: WORD_LENGTH,
            })?;

        Ok(Self(array))
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Word::try_from(s)
    }
}
