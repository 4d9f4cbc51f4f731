use fxhash::FxHashMap;
use thiserror::Error;

use crate::{
    pool::PoolError,
    score_matrix::ScoreMatrix,
    structs::{
        feedback::{FeedbackCode, WEIGHTS},
        word::{Word, WordError, WORD_LENGTH},
    },
};

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("cannot search over an empty candidate set")]
    EmptyCandidateSet,
    #[error("guess \"{guess}\" does not split a set of {size} candidates")]
    NoProgress { guess: Word, size: usize },
    #[error("word index {target} is not one of the {answers} answers")]
    NotAnAnswer { target: usize, answers: usize },
    #[error(transparent)]
    Pool(#[from] PoolError),
}

pub type Buckets = FxHashMap<FeedbackCode, Vec<usize>>;

/// Feedback for `guess` when the secret is `target`.
///
/// Exact matches are resolved first. Each remaining guess letter then takes
/// the leftmost unconsumed target letter equal to it that is not itself an
/// exact match, so every target letter credits at most one guess position.
pub fn score(target: &Word, guess: &Word) -> FeedbackCode {
    let (target, guess) = (target.as_bytes(), guess.as_bytes());
    let mut consumed = [false; WORD_LENGTH];
    let mut code = 0;

    for j in 0..WORD_LENGTH {
        if guess[j] == target[j] {
            code += 2 * WEIGHTS[j];
            consumed[j] = true;
        }
    }

    for j in 0..WORD_LENGTH {
        if guess[j] == target[j] {
            continue;
        }
        for i in 0..WORD_LENGTH {
            if !consumed[i] && target[i] == guess[j] && target[i] != guess[i] {
                code += WEIGHTS[j];
                consumed[i] = true;
                break;
            }
        }
    }

    FeedbackCode::from_raw(code)
}

pub fn score_words(target: &str, guess: &str) -> Result<FeedbackCode, WordError> {
    let target: Word = target.try_into()?;
    let guess: Word = guess.try_into()?;
    Ok(score(&target, &guess))
}

/// Groups `candidates` by the feedback each would give to `guess`, keeping
/// their relative order inside every bucket.
pub fn partition(
    matrix: &ScoreMatrix,
    candidates: &[usize],
    guess: usize,
) -> Result<Buckets, SolverError> {
    if candidates.is_empty() {
        return Err(SolverError::EmptyCandidateSet);
    }

    let mut buckets = Buckets::default();
    for &candidate in candidates {
        buckets
            .entry(matrix.get(candidate, guess))
            .or_default()
            .push(candidate);
    }

    Ok(buckets)
}

fn bucket_sizes(
    matrix: &ScoreMatrix,
    candidates: &[usize],
    guess: usize,
) -> [usize; FeedbackCode::COUNT] {
    let mut sizes = [0; FeedbackCode::COUNT];
    for &candidate in candidates {
        sizes[matrix.get(candidate, guess).to_ind()] += 1;
    }
    sizes
}

/// Size of the largest bucket `guess` splits `candidates` into.
pub fn largest_bucket(matrix: &ScoreMatrix, candidates: &[usize], guess: usize) -> usize {
    bucket_sizes(matrix, candidates, guess)
        .into_iter()
        .max()
        .unwrap_or_default()
}

/// Members of the largest bucket, the lowest feedback code winning ties.
pub fn worst_bucket(matrix: &ScoreMatrix, candidates: &[usize], guess: usize) -> Vec<usize> {
    let sizes = bucket_sizes(matrix, candidates, guess);
    let mut worst = 0;
    for (ind, &size) in sizes.iter().enumerate() {
        if size > sizes[worst] {
            worst = ind;
        }
    }

    let code = FeedbackCode::from_ind(worst);
    candidates
        .iter()
        .copied()
        .filter(|&candidate| matrix.get(candidate, guess) == code)
        .collect()
}
