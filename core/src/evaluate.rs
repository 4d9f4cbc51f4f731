use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{algo::SolverError, engine::Engine, selectors::GuessSelector};

/// `counts()[n]` is the number of answers that took `n` guesses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram(Vec<usize>);

impl Histogram {
    pub fn counts(&self) -> &[usize] {
        &self.0
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.;
        }
        let guesses: usize = self.0.iter().enumerate().map(|(n, &c)| n * c).sum();
        guesses as f64 / total as f64
    }

    pub fn record(&mut self, guesses: usize) {
        if self.0.len() <= guesses {
            self.0.resize(guesses + 1, 0);
        }
        self.0[guesses] += 1;
    }

    fn merge_shifted(&mut self, other: &Histogram) {
        if self.0.len() < other.0.len() + 1 {
            self.0.resize(other.0.len() + 1, 0);
        }
        for (n, &count) in other.0.iter().enumerate() {
            self.0[n + 1] += count;
        }
    }
}

impl From<Vec<usize>> for Histogram {
    fn from(counts: Vec<usize>) -> Self {
        Self(counts)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, &count) in self.0.iter().enumerate().filter(|&(_, &c)| c > 0) {
            writeln!(f, "  {n} tries to guess {count:>4} words")?;
        }
        Ok(())
    }
}

/// Plays `selector` against every word of `candidates` at once by walking
/// the tree of feedback buckets.
pub fn evaluate<S>(
    engine: &Engine,
    selector: &S,
    candidates: &[usize],
) -> Result<Histogram, SolverError>
where
    S: GuessSelector + ?Sized,
{
    match candidates.len() {
        0 => return Err(SolverError::EmptyCandidateSet),
        1 => return Ok(Histogram(vec![0, 1])),
        _ => (),
    }

    let guess = *selector
        .select(engine, candidates)?
        .first()
        .ok_or(SolverError::EmptyCandidateSet)?;

    let mut histogram = Histogram(vec![0, 0]);
    for (code, bucket) in engine.partition(candidates, guess)? {
        if code.is_solved() {
            histogram.0[1] += 1;
            continue;
        }
        if bucket.len() == candidates.len() {
            return Err(SolverError::NoProgress {
                guess: *engine.word(guess),
                size: bucket.len(),
            });
        }

        histogram.merge_shifted(&evaluate(engine, selector, &bucket)?);
    }

    Ok(histogram)
}
