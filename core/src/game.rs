use itertools::Itertools;
use log::debug;
use rand::{seq::IteratorRandom, Rng};
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::{
    algo::SolverError,
    engine::Engine,
    selectors::GuessSelector,
    structs::{FeedbackCode, FeedbackError, Word},
};

/// Remaining candidates are listed once there are at most this many.
const SHOW_REMAINING: usize = 10;

#[derive(Error, Debug)]
pub enum PlayError {
    #[error("cannot understand reply \"{input}\": {source}")]
    UserInput {
        input: String,
        #[source]
        source: FeedbackError,
    },
    #[error("input ended before the word was found")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Solver(#[from] SolverError),
}

fn next_guess<S>(engine: &Engine, selector: &S, candidates: &[usize]) -> Result<usize, SolverError>
where
    S: GuessSelector + ?Sized,
{
    if let [only] = candidates {
        return Ok(*only);
    }
    selector
        .select(engine, candidates)?
        .first()
        .copied()
        .ok_or(SolverError::EmptyCandidateSet)
}

fn describe(engine: &Engine, candidates: &[usize]) -> String {
    candidates
        .iter()
        .map(|&i| match engine.dictionary().score(i) {
            Some(score) => format!("{} ({score})", engine.word(i)),
            None => engine.word(i).to_string(),
        })
        .join(", ")
}

/// Plays a live game: recommends a guess, reads the feedback code the game
/// showed, and narrows the answers until one is left.
pub fn play<S, R, W>(
    engine: &Engine,
    selector: &S,
    mut input: R,
    mut output: W,
) -> Result<Word, PlayError>
where
    S: GuessSelector + ?Sized,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Lets play...")?;
    let mut candidates = engine.answers();
    if candidates.is_empty() {
        return Err(SolverError::EmptyCandidateSet.into());
    }

    while candidates.len() > 1 {
        let guess = next_guess(engine, selector, &candidates)?;
        writeln!(
            output,
            "There are {} possible words remaining",
            candidates.len()
        )?;
        if candidates.len() <= SHOW_REMAINING {
            writeln!(output, "They are: {}", describe(engine, &candidates))?;
        }
        writeln!(output, "Your next guess should be: {}", engine.word(guess))?;
        write!(output, "What does the game say? ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PlayError::UnexpectedEof);
        }
        let code: FeedbackCode = line.parse().map_err(|source| PlayError::UserInput {
            input: line.trim().to_string(),
            source,
        })?;
        debug!("{} scored {}", engine.word(guess), code.squares());

        if code.is_solved() {
            if !candidates.contains(&guess) {
                return Err(SolverError::EmptyCandidateSet.into());
            }
            candidates = vec![guess];
            break;
        }

        candidates = engine
            .partition(&candidates, guess)?
            .remove(&code)
            .ok_or(SolverError::EmptyCandidateSet)?;
    }

    let answer = *engine.word(candidates[0]);
    writeln!(output, "And the answer is... {answer}!")?;
    Ok(answer)
}

/// Plays against a known answer and returns every guess with its feedback.
pub fn solve<S>(
    engine: &Engine,
    selector: &S,
    target: usize,
) -> Result<Vec<(usize, FeedbackCode)>, SolverError>
where
    S: GuessSelector + ?Sized,
{
    let answers = engine.dictionary().answers_len();
    if target >= answers {
        return Err(SolverError::NotAnAnswer { target, answers });
    }

    let mut candidates = engine.answers();
    let mut trail = Vec::new();

    loop {
        let guess = next_guess(engine, selector, &candidates)?;
        let code = engine.feedback(target, guess);
        trail.push((guess, code));
        if code.is_solved() {
            return Ok(trail);
        }

        let remaining = engine
            .partition(&candidates, guess)?
            .remove(&code)
            .ok_or(SolverError::EmptyCandidateSet)?;
        if remaining.len() == candidates.len() {
            return Err(SolverError::NoProgress {
                guess: *engine.word(guess),
                size: remaining.len(),
            });
        }
        candidates = remaining;
    }
}

/// Up to `n` distinct answers, chosen at random.
pub fn sample_targets<R: Rng + ?Sized>(engine: &Engine, n: usize, rng: &mut R) -> Vec<usize> {
    let mut targets = engine.dictionary().answers().choose_multiple(rng, n);
    targets.sort_unstable();
    targets
}
