use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    algo::{largest_bucket, worst_bucket, SolverError},
    engine::Engine,
};

pub const DEFAULT_LOOKAHEAD_WEIGHT: usize = 100;

/// Picks the next guess for a candidate set.
pub trait GuessSelector {
    /// Returns every guess tied for best, in vocabulary order. Never empty
    /// on success; callers normally play the first one.
    fn select(&self, engine: &Engine, candidates: &[usize]) -> Result<Vec<usize>, SolverError>;
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SelectorKind {
    #[default]
    Greedy,
    TwoPly,
}

/// Which words the greedy selector tries as guesses.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchScope {
    /// Only words still consistent with the feedback so far.
    #[default]
    Candidates,
    /// The whole answer list, whatever has been ruled out.
    Answers,
}

/// One-step minimax: minimise the largest bucket left after the guess.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GreedyMinimax {
    pub scope: SearchScope,
}

impl GreedyMinimax {
    pub fn new(scope: SearchScope) -> Self {
        Self { scope }
    }
}

impl GuessSelector for GreedyMinimax {
    fn select(&self, engine: &Engine, candidates: &[usize]) -> Result<Vec<usize>, SolverError> {
        if candidates.is_empty() {
            return Err(SolverError::EmptyCandidateSet);
        }

        let guesses = match self.scope {
            SearchScope::Candidates => candidates.to_vec(),
            SearchScope::Answers => engine.answers(),
        };

        let mut minimax = usize::MAX;
        let mut best = Vec::new();
        for guess in guesses {
            let size = largest_bucket(engine.matrix(), candidates, guess);
            if size < minimax {
                minimax = size;
                best.clear();
            }
            if size == minimax {
                best.push(guess);
            }
        }

        debug!(
            "greedy: {} candidates, largest bucket {minimax}, {} tied guesses",
            candidates.len(),
            best.len()
        );
        Ok(best)
    }
}

/// Two-step minimax over the whole vocabulary.
///
/// A first guess is scored by the adversary's best reply, its largest
/// bucket, and then by the best answer-list follow-up for that bucket:
/// `second_ply_max * weight + first_ply_max`, minimised over follow-ups.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TwoPlyMinimax {
    pub weight: usize,
}

impl Default for TwoPlyMinimax {
    fn default() -> Self {
        Self {
            weight: DEFAULT_LOOKAHEAD_WEIGHT,
        }
    }
}

impl TwoPlyMinimax {
    pub fn new(weight: usize) -> Self {
        Self { weight }
    }

    fn score(&self, engine: &Engine, candidates: &[usize], first: usize) -> usize {
        let matrix = engine.matrix();
        let worst = worst_bucket(matrix, candidates, first);
        // no follow-up can leave less than one word
        let floor = self.weight.saturating_add(worst.len());

        let mut best = usize::MAX;
        for second in engine.dictionary().answers() {
            let score = largest_bucket(matrix, &worst, second)
                .saturating_mul(self.weight)
                .saturating_add(worst.len());
            best = best.min(score);
            if best == floor {
                break;
            }
        }
        best
    }
}

impl GuessSelector for TwoPlyMinimax {
    fn select(&self, engine: &Engine, candidates: &[usize]) -> Result<Vec<usize>, SolverError> {
        if candidates.is_empty() {
            return Err(SolverError::EmptyCandidateSet);
        }

        let mut scores = vec![usize::MAX; engine.dictionary().len()];
        engine.pool().run_strided(&mut scores, |first, score| {
            *score = self.score(engine, candidates, first);
        });

        let minimum = scores.iter().copied().min().unwrap_or(usize::MAX);
        let best = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == minimum)
            .map(|(guess, _)| guess)
            .collect::<Vec<_>>();

        debug!(
            "two-ply: {} candidates, best score {minimum}, {} tied guesses",
            candidates.len(),
            best.len()
        );
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{Dictionary, Word};
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn parse(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| w.parse().unwrap()).collect()
    }

    fn engine(answers: &[&str], extra: &[&str], workers: usize) -> Engine {
        Engine::new(Dictionary::new(parse(answers), parse(extra)), workers).unwrap()
    }

    const ANSWERS: [&str; 8] = [
        "mount", "count", "fount", "plane", "crane", "train", "boobs", "zyzzy",
    ];

    #[test]
    fn greedy_returns_all_ties_in_order() {
        let engine = engine(&["plane", "train"], &[], 1);
        let best = GreedyMinimax::default().select(&engine, &[0, 1]).unwrap();
        assert_eq!(best, vec![0, 1]);
    }

    #[test]
    fn greedy_minimises_largest_bucket() {
        let engine = engine(&ANSWERS, &[], 2);
        let candidates = engine.answers();
        let best = GreedyMinimax::default().select(&engine, &candidates).unwrap();

        let sizes = candidates
            .iter()
            .map(|&g| largest_bucket(engine.matrix(), &candidates, g))
            .collect::<Vec<_>>();
        let minimum = *sizes.iter().min().unwrap();
        let expected = candidates
            .iter()
            .zip(&sizes)
            .filter(|&(_, &s)| s == minimum)
            .map(|(&g, _)| g)
            .collect::<Vec<_>>();
        assert_eq!(best, expected);
    }

    #[test]
    fn answers_scope_may_pick_ruled_out_words() {
        // "mount", "count" and "fount" differ only in their first letter,
        // "mcfly" tells them apart in a single guess
        let engine = engine(&["mount", "count", "fount", "mcfly"], &[], 1);
        let candidates = vec![0, 1, 2];

        let narrow = GreedyMinimax::new(SearchScope::Candidates)
            .select(&engine, &candidates)
            .unwrap();
        let wide = GreedyMinimax::new(SearchScope::Answers)
            .select(&engine, &candidates)
            .unwrap();

        assert_eq!(narrow, vec![0, 1, 2]);
        assert_eq!(wide, vec![3]);
    }

    #[rstest]
    #[case(GreedyMinimax::new(SearchScope::Candidates))]
    #[case(GreedyMinimax::new(SearchScope::Answers))]
    fn greedy_rejects_empty(#[case] selector: GreedyMinimax) {
        let engine = engine(&ANSWERS, &[], 1);
        assert!(matches!(
            selector.select(&engine, &[]),
            Err(SolverError::EmptyCandidateSet)
        ));
    }

    #[test]
    fn two_ply_rejects_empty() {
        let engine = engine(&ANSWERS, &[], 1);
        assert!(matches!(
            TwoPlyMinimax::default().select(&engine, &[]),
            Err(SolverError::EmptyCandidateSet)
        ));
    }

    #[test]
    fn two_ply_matches_reference_scores() {
        let engine = engine(&ANSWERS, &["strew", "topaz", "mcfly"], 2);
        let candidates = engine.answers();
        let selector = TwoPlyMinimax::default();
        let best = selector.select(&engine, &candidates).unwrap();

        let matrix = engine.matrix();
        let reference = (0..engine.dictionary().len())
            .map(|first| {
                let worst = worst_bucket(matrix, &candidates, first);
                engine
                    .dictionary()
                    .answers()
                    .map(|second| largest_bucket(matrix, &worst, second) * 100 + worst.len())
                    .min()
                    .unwrap()
            })
            .collect::<Vec<_>>();
        let minimum = *reference.iter().min().unwrap();
        let expected = (0..reference.len())
            .filter(|&g| reference[g] == minimum)
            .collect::<Vec<_>>();

        assert!(!best.is_empty());
        assert_eq!(best, expected);
    }

    #[test]
    fn two_ply_searches_extra_guesses() {
        let engine = engine(&["mount", "count", "fount"], &["mcfly"], 1);
        let best = TwoPlyMinimax::default()
            .select(&engine, &engine.answers())
            .unwrap();
        assert_eq!(best, vec![3]);
    }

    #[test]
    fn two_ply_is_independent_of_worker_count() {
        let serial = engine(&ANSWERS, &["strew", "topaz", "mcfly"], 1);
        let parallel = engine(&ANSWERS, &["strew", "topaz", "mcfly"], 4);
        let selector = TwoPlyMinimax::new(7);

        for candidates in [vec![0, 1, 2, 3, 4, 5, 6, 7], vec![0, 1, 2], vec![3, 4, 5]] {
            assert_eq!(
                selector.select(&serial, &candidates).unwrap(),
                selector.select(&parallel, &candidates).unwrap()
            );
        }
    }

    #[test]
    fn kinds_round_trip_by_name() {
        for kind in SelectorKind::iter() {
            assert_eq!(SelectorKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert_eq!(SelectorKind::from_str("two-ply").unwrap(), SelectorKind::TwoPly);
        assert_eq!(SearchScope::from_str("answers").unwrap(), SearchScope::Answers);
        assert!(SearchScope::from_str("everything").is_err());
    }
}
