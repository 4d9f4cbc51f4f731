use serde::{Deserialize, Serialize};

use crate::{
    data::RecordFormat,
    pool,
    selectors::{
        GreedyMinimax, GuessSelector, SearchScope, SelectorKind, TwoPlyMinimax,
        DEFAULT_LOOKAHEAD_WEIGHT,
    },
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub selector: SelectorKind,
    /// Guess space of the greedy selector.
    pub scope: SearchScope,
    /// Weight of the second ply in the two-ply score.
    pub lookahead_weight: usize,
    /// Worker pool size, all available cores when unset.
    pub workers: Option<usize>,
    pub format: RecordFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selector: SelectorKind::default(),
            scope: SearchScope::default(),
            lookahead_weight: DEFAULT_LOOKAHEAD_WEIGHT,
            workers: None,
            format: RecordFormat::default(),
        }
    }
}

impl Config {
    pub fn workers(&self) -> usize {
        self.workers
            .filter(|&w| w > 0)
            .unwrap_or_else(pool::available_workers)
    }

    pub fn selector(&self) -> Box<dyn GuessSelector + Send + Sync> {
        match self.selector {
            SelectorKind::Greedy => Box::new(GreedyMinimax::new(self.scope)),
            SelectorKind::TwoPly => Box::new(TwoPlyMinimax::new(self.lookahead_weight)),
        }
    }
}
