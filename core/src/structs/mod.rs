pub mod feedback;
pub mod word;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub use feedback::{FeedbackCode, FeedbackError, Hint};
pub use word::{Word, WordError, WORD_LENGTH};

/// The vocabulary backing every word index.
///
/// Answers occupy `0..answers_len()`, extra guesses (words that may be
/// typed but are never the secret) occupy `answers_len()..len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Word>,
    scores: Vec<Option<u64>>,
    answers: usize,
}

impl Dictionary {
    pub fn new(answers: Vec<Word>, extra_guesses: Vec<Word>) -> Self {
        let unscored = |words: Vec<Word>| -> Vec<(Word, Option<u64>)> {
            words.into_iter().map(|w| (w, None)).collect()
        };
        Self::with_scores(unscored(answers), unscored(extra_guesses))
    }

    /// Duplicates are dropped keeping the first occurrence, and extra guesses
    /// that are also answers are dropped so the two ranges stay disjoint.
    pub fn with_scores(
        answers: Vec<(Word, Option<u64>)>,
        extra_guesses: Vec<(Word, Option<u64>)>,
    ) -> Self {
        let mut seen = FxHashSet::default();
        let answers = answers
            .into_iter()
            .filter(|(w, _)| seen.insert(*w))
            .collect::<Vec<_>>();
        let answers_len = answers.len();

        let (words, scores) = answers
            .into_iter()
            .chain(extra_guesses.into_iter().filter(|(w, _)| seen.insert(*w)))
            .unzip();

        Self {
            words,
            scores,
            answers: answers_len,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, ind: usize) -> &Word {
        &self.words[ind]
    }

    pub fn score(&self, ind: usize) -> Option<u64> {
        self.scores[ind]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn answers_len(&self) -> usize {
        self.answers
    }

    pub fn answers(&self) -> Range<usize> {
        0..self.answers
    }

    pub fn extra_guesses(&self) -> Range<usize> {
        self.answers..self.words.len()
    }

    pub fn position(&self, word: &Word) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }
}
