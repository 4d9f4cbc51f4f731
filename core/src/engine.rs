use crate::{
    algo::{self, Buckets, SolverError},
    pool::WorkerPool,
    score_matrix::ScoreMatrix,
    structs::{Dictionary, FeedbackCode, Word},
};

/// Everything a search needs: the vocabulary, its score matrix and the
/// worker pool. Built once, then only read.
#[derive(Debug)]
pub struct Engine {
    dictionary: Dictionary,
    matrix: ScoreMatrix,
    pool: WorkerPool,
}

impl Engine {
    pub fn new(dictionary: Dictionary, workers: usize) -> Result<Self, SolverError> {
        let pool = WorkerPool::new(workers)?;
        let matrix = ScoreMatrix::build(&dictionary, &pool);
        Ok(Self {
            dictionary,
            matrix,
            pool,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn word(&self, ind: usize) -> &Word {
        self.dictionary.word(ind)
    }

    /// The initial candidate set: every answer, in vocabulary order.
    pub fn answers(&self) -> Vec<usize> {
        self.dictionary.answers().collect()
    }

    pub fn feedback(&self, target: usize, guess: usize) -> FeedbackCode {
        self.matrix.get(target, guess)
    }

    pub fn partition(&self, candidates: &[usize], guess: usize) -> Result<Buckets, SolverError> {
        algo::partition(&self.matrix, candidates, guess)
    }

    pub fn answer_index(&self, word: &Word) -> Option<usize> {
        self.dictionary
            .position(word)
            .filter(|&ind| ind < self.dictionary.answers_len())
    }
}
