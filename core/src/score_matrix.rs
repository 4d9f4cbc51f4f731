use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    algo,
    pool::WorkerPool,
    structs::{Dictionary, FeedbackCode},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreMatrix {
    // Outer vector is indexed by answer, the target
    // Inner vector is indexed by any vocabulary word, the guess
    // Value is the feedback code
    rows: Vec<Vec<FeedbackCode>>,
    columns: usize,
}

impl ScoreMatrix {
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, target: usize, guess: usize) -> FeedbackCode {
        self.rows[target][guess]
    }

    pub fn row(&self, target: usize) -> &[FeedbackCode] {
        &self.rows[target]
    }

    /// Scores every answer against every vocabulary word on the pool,
    /// worker `k` filling rows `k, k + workers, ...`.
    pub fn build(dictionary: &Dictionary, pool: &WorkerPool) -> Self {
        let start = Instant::now();
        let words = dictionary.words();
        let mut rows = vec![Vec::new(); dictionary.answers_len()];

        pool.run_strided(&mut rows, |target, row| {
            let target = &words[target];
            *row = words.iter().map(|guess| algo::score(target, guess)).collect();
        });

        info!(
            "Score matrix of {}x{} computed in {}ms",
            rows.len(),
            words.len(),
            start.elapsed().as_millis()
        );

        Self {
            rows,
            columns: words.len(),
        }
    }
}
