use std::{num::NonZeroUsize, thread};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("unable to start a pool of {workers} workers: {reason}")]
    Build { workers: usize, reason: String },
}

pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Fixed number of worker threads used for batch jobs over a table.
#[derive(Debug)]
pub struct WorkerPool {
    workers: usize,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, PoolError> {
        let workers = workers.max(1);

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|k| format!("minimax-worker-{k}"))
            .build()
            .map_err(|e| PoolError::Build {
                workers,
                reason: e.to_string(),
            })?;

        Ok(Self {
            workers,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `work(i, &mut slots[i])` for every slot and returns once all
    /// workers are done.
    ///
    /// Worker `k` owns slots `k, k + workers, k + 2 * workers, ...`. The
    /// slots are handed out as disjoint `&mut` borrows before anything
    /// starts, so no locking is needed. A panic inside `work` propagates to
    /// the caller once the other workers have finished.
    pub fn run_strided<T, F>(&self, slots: &mut [T], work: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync,
    {
        let workers = self.workers.min(slots.len()).max(1);
        let mut shards = (0..workers).map(|_| Vec::new()).collect::<Vec<_>>();
        for (i, slot) in slots.iter_mut().enumerate() {
            shards[i % workers].push((i, slot));
        }

        #[cfg(feature = "parallel")]
        {
            let work = &work;
            self.pool.scope(|scope| {
                for shard in shards {
                    scope.spawn(move |_| {
                        for (i, slot) in shard {
                            work(i, slot);
                        }
                    });
                }
            });
        }

        #[cfg(not(feature = "parallel"))]
        for shard in shards {
            for (i, slot) in shard {
                work(i, slot);
            }
        }
    }
}
