//! Fixed-size worker pool.
//!
//! A bounded job queue feeds a fixed set of worker threads; outcomes
//! fan in over a result channel in completion order. Workers block on
//! their encoder subprocesses, so threads carry no compute of their
//! own; a hung encoder parks one worker without deadlocking the rest.
//! There is no retry, timeout, or cancellation, and teardown waits for
//! every in-flight job.

use std::thread;

use crossbeam_channel::{bounded, unbounded};

use crate::models::BatchJob;
use crate::pipeline::{self, JobOutcome};

/// Pool of worker threads executing batch jobs.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    worker_count: usize,
}

impl WorkerPool {
    /// Create a pool with an explicit worker count (minimum 1).
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    /// Create a pool sized to the machine: available cores minus one,
    /// leaving headroom for the dispatching process.
    pub fn with_default_size() -> Self {
        Self::new(num_cpus::get().saturating_sub(1))
    }

    /// Number of workers this pool runs.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Run all jobs to completion and collect their outcomes.
    ///
    /// `observe` is called once per completed job, in completion order
    /// (which is not dispatch order). Returns after every worker has
    /// finished.
    pub fn run<F>(&self, jobs: Vec<BatchJob>, mut observe: F) -> Vec<JobOutcome>
    where
        F: FnMut(&JobOutcome),
    {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }

        let (job_tx, job_rx) = bounded::<BatchJob>(self.worker_count);
        let (outcome_tx, outcome_rx) = unbounded::<JobOutcome>();

        thread::scope(|scope| {
            for _ in 0..self.worker_count {
                let job_rx = job_rx.clone();
                let outcome_tx = outcome_tx.clone();
                scope.spawn(move || {
                    while let Ok(job) = job_rx.recv() {
                        let outcome = pipeline::run_job(&job);
                        if outcome_tx.send(outcome).is_err() {
                            break;
                        }
                    }
                });
            }
            // Workers hold the only remaining clones; the channels
            // disconnect as they finish.
            drop(job_rx);
            drop(outcome_tx);

            scope.spawn(move || {
                for job in jobs {
                    if job_tx.send(job).is_err() {
                        break;
                    }
                }
            });

            let mut outcomes = Vec::with_capacity(total);
            for outcome in outcome_rx.iter() {
                observe(&outcome);
                outcomes.push(outcome);
            }
            outcomes
        })
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::with_default_size()
    }
}
